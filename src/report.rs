//! Text rendering of a lookup for the terminal
//!
//! Record lines are tab separated: kind, value, (MX preference,) TTL and
//! whether the answering server is authoritative.

use std::io::{self, Write};

use log::debug;

use crate::config::Config;
use crate::dns_parser::{Packet, RRData, ResourceRecord};
use crate::fsm::{Error, Reply};

pub fn write_request<W: Write>(out: &mut W, config: &Config) -> io::Result<()> {
    writeln!(out, "DnsClient sending request for {}", config.name)?;
    writeln!(out, "Server: {}", config.server)?;
    writeln!(out, "Request type: {}", config.kind)
}

/// `attempt` counts from zero
pub fn write_timeout<W: Write>(out: &mut W, attempt: u32) -> io::Result<()> {
    writeln!(out, "ERROR\tTimeout on attempt {}, retrying", attempt + 1)
}

pub fn write_reply<W: Write>(out: &mut W, reply: &Reply) -> io::Result<()> {
    writeln!(
        out,
        "Response received after {:.3} seconds ({} retries)",
        reply.elapsed.as_secs_f64(),
        reply.retries
    )
}

/// Writes the answer section, then the additional section if it has records
pub fn write_records<W: Write>(out: &mut W, packet: &Packet) -> io::Result<()> {
    let authoritative = packet.header.authoritative;

    writeln!(out, "***Answer Section ({} records)***", packet.answers.len())?;
    write_section(out, &packet.answers, authoritative)?;
    if packet.answers.is_empty() {
        writeln!(out, "NOTFOUND")?;
    }

    if !packet.additional.is_empty() {
        writeln!(
            out,
            "***Additional Section ({} records)***",
            packet.additional.len()
        )?;
        write_section(out, &packet.additional, authoritative)?;
    }
    Ok(())
}

fn write_section<W: Write>(
    out: &mut W,
    records: &[ResourceRecord],
    authoritative: bool,
) -> io::Result<()> {
    for record in records {
        match record_line(record, authoritative) {
            Some(line) => writeln!(out, "{}", line)?,
            None => debug!(
                "not rendering {:?} record for {}",
                record.data.typ(),
                record.name
            ),
        }
    }
    Ok(())
}

/// Formats one record, `None` for types without a rendering
pub fn record_line(record: &ResourceRecord, authoritative: bool) -> Option<String> {
    let auth = if authoritative { "auth" } else { "nonauth" };
    let line = match record.data {
        RRData::A(ip) => format!("IP\t{}\t{}\t{}", ip, record.ttl, auth),
        RRData::CNAME(ref name) => format!("CNAME\t{}\t{}\t{}", name, record.ttl, auth),
        RRData::NS(ref name) => format!("NS\t{}\t{}\t{}", name, record.ttl, auth),
        RRData::MX {
            preference,
            ref exchange,
        } => format!("MX\t{}\t{}\t{}\t{}", exchange, preference, record.ttl, auth),
        RRData::Unknown { .. } => return None,
    };
    Some(line)
}

/// A missing name gets its own line, everything else is an error
pub fn write_failure<W: Write>(out: &mut W, err: &Error) -> io::Result<()> {
    if err.is_not_found() {
        writeln!(out, "NOTFOUND")
    } else {
        writeln!(out, "ERROR\t{}", err)
    }
}
