//! A command line DNS client
//!
//! Sends one query over UDP to a chosen name server, retransmitting on
//! timeout, and renders the reply as text. The wire codec lives in
//! [`dns_parser`], the retry logic in [`fsm`].

pub mod config;
pub mod dns_parser;
pub mod fsm;
pub mod net;
pub mod report;

pub use crate::config::{Config, RecordKind};
pub use crate::fsm::{Error, Reply, Resolver, State};
pub use crate::net::{Transport, UdpTransport};
