//! The query/retry state machine driving one lookup

use std::io;
use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use rand::Rng;
use thiserror::Error;

use crate::config::Config;
use crate::dns_parser::{self, Name, Packet, QueryClass, ResponseCode};
use crate::net::Transport;
use crate::report;

const RECV_BUFFER_SIZE: usize = 65536;

/// Why a lookup did not produce an answer
#[derive(Debug, Error)]
pub enum Error {
    #[error("Maximum number of retries {retries} exceeded")]
    RetriesExhausted { retries: u32 },
    #[error("Malformed response: {0}")]
    Malformed(#[from] dns_parser::Error),
    #[error("Socket error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid name: {0}")]
    InvalidName(dns_parser::Error),
    #[error("Name not found")]
    NotFound,
    #[error("Format error: the name server was unable to interpret the query")]
    FormatError,
    #[error("Server failure: the name server was unable to process this query")]
    ServerFailure,
    #[error("Not implemented: the name server does not support the requested kind of query")]
    NotImplemented,
    #[error("Refused: the name server refuses to perform the requested operation")]
    Refused,
    #[error("Unknown response code {0}")]
    UnknownResponse(u8),
}

impl Error {
    /// The server answered that the name does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(*self, Error::NotFound)
    }
}

/// A reply datagram and what it took to get it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub bytes: Vec<u8>,
    /// Time since the first attempt was sent
    pub elapsed: Duration,
    /// Attempts beyond the first
    pub retries: u32,
}

/// States of a lookup
///
/// `attempt` counts from zero, so it is also the number of retries spent.
#[derive(Debug)]
pub enum State {
    Idle,
    Sending { attempt: u32 },
    AwaitingReply { attempt: u32 },
    TimedOut { attempt: u32 },
    Success(Reply),
    Failed(Error),
    Done(Result<(), Error>),
}

/// Maps the response code of a reply onto the lookup outcome
pub fn check_response_code(rcode: ResponseCode) -> Result<(), Error> {
    match rcode {
        ResponseCode::NoError => Ok(()),
        ResponseCode::FormatError => Err(Error::FormatError),
        ResponseCode::ServerFailure => Err(Error::ServerFailure),
        ResponseCode::NameError => Err(Error::NotFound),
        ResponseCode::NotImplemented => Err(Error::NotImplemented),
        ResponseCode::Refused => Err(Error::Refused),
        ResponseCode::Reserved(code) => Err(Error::UnknownResponse(code)),
    }
}

/// Owns one UDP conversation with a name server
///
/// The transport is dropped, closing the socket, once `resolve` returns.
pub struct Resolver<T: Transport, R: Rng, W: io::Write> {
    config: Config,
    transport: T,
    rng: R,
    out: W,
    id: u16,
    query: Vec<u8>,
    started: Option<Instant>,
    recv_buf: Vec<u8>,
}

impl<T: Transport, R: Rng, W: io::Write> Resolver<T, R, W> {
    /// `rng` picks the transaction id, `out` receives the report
    pub fn new(config: Config, transport: T, rng: R, out: W) -> Resolver<T, R, W> {
        Resolver {
            config,
            transport,
            rng,
            out,
            id: 0,
            query: Vec::new(),
            started: None,
            recv_buf: vec![0u8; RECV_BUFFER_SIZE],
        }
    }

    /// Runs the lookup to completion, writing the report as it goes
    pub fn resolve(mut self) -> Result<(), Error> {
        let mut state = State::Idle;
        loop {
            state = match self.step(state) {
                State::Done(result) => return result,
                next => next,
            };
        }
    }

    /// Performs a single transition
    pub fn step(&mut self, state: State) -> State {
        trace!("lookup state: {:?}", state);
        match state {
            State::Idle => match report::write_request(&mut self.out, &self.config) {
                Ok(()) => State::Sending { attempt: 0 },
                Err(err) => State::Failed(err.into()),
            },
            State::Sending { attempt } => {
                if self.query.is_empty() {
                    match self.encode_query() {
                        Ok(query) => self.query = query,
                        Err(err) => return State::Failed(err),
                    }
                    self.started = Some(Instant::now());
                }
                debug!(
                    "sending query {:#06x} to {} (attempt {})",
                    self.id,
                    self.config.server_addr(),
                    attempt + 1
                );
                match self.transport.send(&self.query) {
                    Ok(()) => State::AwaitingReply { attempt },
                    Err(err) => State::Failed(err.into()),
                }
            }
            State::AwaitingReply { attempt } => {
                match self.transport.recv(&mut self.recv_buf, self.config.timeout) {
                    Ok(Some(len)) => State::Success(Reply {
                        bytes: self.recv_buf[..len].to_vec(),
                        elapsed: self.started.map(|t| t.elapsed()).unwrap_or_default(),
                        retries: attempt,
                    }),
                    Ok(None) => State::TimedOut { attempt },
                    Err(err) => State::Failed(err.into()),
                }
            }
            State::TimedOut { attempt } => {
                debug!("attempt {} timed out", attempt + 1);
                if attempt < self.config.max_retries {
                    match report::write_timeout(&mut self.out, attempt) {
                        Ok(()) => State::Sending {
                            attempt: attempt + 1,
                        },
                        Err(err) => State::Failed(err.into()),
                    }
                } else {
                    State::Failed(Error::RetriesExhausted {
                        retries: self.config.max_retries,
                    })
                }
            }
            State::Success(reply) => match self.report(&reply) {
                Ok(()) => State::Done(Ok(())),
                Err(err) => State::Failed(err),
            },
            State::Failed(err) => {
                if let Err(io_err) = report::write_failure(&mut self.out, &err) {
                    warn!("couldn't write failure report: {}", io_err);
                }
                State::Done(Err(err))
            }
            State::Done(result) => State::Done(result),
        }
    }

    fn encode_query(&mut self) -> Result<Vec<u8>, Error> {
        self.id = self.rng.gen();
        let name = Name::from_str(self.config.name.as_str()).map_err(Error::InvalidName)?;
        let query = dns_parser::Builder::new_query(self.id, true)
            .add_question(&name, self.config.kind.query_type(), QueryClass::IN)?
            .build();
        Ok(query)
    }

    fn report(&mut self, reply: &Reply) -> Result<(), Error> {
        let packet = Packet::parse(&reply.bytes)?;
        if packet.header.id != self.id {
            warn!(
                "reply id {:#06x} does not match query id {:#06x}",
                packet.header.id, self.id
            );
        }
        if packet.header.truncated {
            warn!("reply is truncated, records may be missing");
        }

        report::write_reply(&mut self.out, reply)?;
        check_response_code(packet.header.response_code)?;
        report::write_records(&mut self.out, &packet)?;
        Ok(())
    }
}
