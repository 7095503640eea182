//! Encoding of DNS queries and decoding of DNS replies
//!
//! The parser borrows the received buffer; names are kept as references
//! into it and compression pointers are followed lazily once validated.

mod builder;
mod enums;
mod error;
mod header;
mod name;
mod parser;
mod rrdata;
mod structs;

pub use self::builder::{Additional, Answers, Builder, Nameservers, Questions};
pub use self::enums::{Class, Opcode, QueryClass, QueryType, ResponseCode, Type};
pub use self::error::Error;
pub use self::header::Header;
pub use self::name::{Labels, Name};
pub use self::rrdata::RRData;
pub use self::structs::{Packet, Question, ResourceRecord};
