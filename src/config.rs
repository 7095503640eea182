use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::dns_parser::QueryType;

pub const DEFAULT_PORT: u16 = 53;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// The kind of record a lookup asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    A,
    MX,
    NS,
}

impl RecordKind {
    pub fn query_type(self) -> QueryType {
        match self {
            RecordKind::A => QueryType::A,
            RecordKind::MX => QueryType::MX,
            RecordKind::NS => QueryType::NS,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            RecordKind::A => "A",
            RecordKind::MX => "MX",
            RecordKind::NS => "NS",
        })
    }
}

/// A validated lookup request
///
/// Values are trusted as given; checking them is up to whoever builds the
/// config (the command line parser does).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: Ipv4Addr,
    pub port: u16,
    pub name: String,
    pub kind: RecordKind,
    /// How long to wait for each reply
    pub timeout: Duration,
    /// Retransmissions allowed after the first attempt
    pub max_retries: u32,
}

impl Config {
    pub fn new<N: Into<String>>(server: Ipv4Addr, name: N) -> Config {
        Config {
            server,
            port: DEFAULT_PORT,
            name: name.into(),
            kind: RecordKind::A,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn port(mut self, port: u16) -> Config {
        self.port = port;
        self
    }

    pub fn kind(mut self, kind: RecordKind) -> Config {
        self.kind = kind;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Config {
        self.timeout = timeout;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Config {
        self.max_retries = max_retries;
        self
    }

    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.into(), self.port)
    }
}
