use byteorder::{BigEndian, ByteOrder};

use super::{Error, Opcode, ResponseCode};

mod flag {
    pub const QUERY: u16 = 0b1000_0000_0000_0000;
    pub const OPCODE_MASK: u16 = 0b0111_1000_0000_0000;
    pub const AUTHORITATIVE: u16 = 0b0000_0100_0000_0000;
    pub const TRUNCATED: u16 = 0b0000_0010_0000_0000;
    pub const RECURSION_DESIRED: u16 = 0b0000_0001_0000_0000;
    pub const RECURSION_AVAILABLE: u16 = 0b0000_0000_1000_0000;
    pub const RESPONSE_CODE_MASK: u16 = 0b0000_0000_0000_1111;
}

pub const HEADER_SIZE: usize = 12;

/// Represents parsed header of the packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub query: bool,
    pub opcode: Opcode,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub response_code: ResponseCode,
    pub questions: u16,
    pub answers: u16,
    pub nameservers: u16,
    pub additional: u16,
}

impl Header {
    pub fn parse(data: &[u8]) -> Result<Header, Error> {
        if data.len() < HEADER_SIZE {
            return Err(Error::HeaderTooShort);
        }
        let flags = BigEndian::read_u16(&data[2..4]);
        Ok(Header {
            id: BigEndian::read_u16(&data[..2]),
            query: flags & flag::QUERY == 0,
            opcode: Opcode::from(
                ((flags & flag::OPCODE_MASK) >> flag::OPCODE_MASK.trailing_zeros()) as u8,
            ),
            authoritative: flags & flag::AUTHORITATIVE != 0,
            truncated: flags & flag::TRUNCATED != 0,
            recursion_desired: flags & flag::RECURSION_DESIRED != 0,
            recursion_available: flags & flag::RECURSION_AVAILABLE != 0,
            response_code: ResponseCode::from((flags & flag::RESPONSE_CODE_MASK) as u8),
            questions: BigEndian::read_u16(&data[4..6]),
            answers: BigEndian::read_u16(&data[6..8]),
            nameservers: BigEndian::read_u16(&data[8..10]),
            additional: BigEndian::read_u16(&data[10..12]),
        })
    }

    /// Write a header to a buffer
    pub fn write(&self, data: &mut [u8; HEADER_SIZE]) {
        let mut flags = 0u16;
        flags |= (u8::from(self.opcode) as u16) << flag::OPCODE_MASK.trailing_zeros()
            & flag::OPCODE_MASK;
        flags |= u8::from(self.response_code) as u16 & flag::RESPONSE_CODE_MASK;
        if !self.query {
            flags |= flag::QUERY;
        }
        if self.authoritative {
            flags |= flag::AUTHORITATIVE;
        }
        if self.recursion_desired {
            flags |= flag::RECURSION_DESIRED;
        }
        if self.recursion_available {
            flags |= flag::RECURSION_AVAILABLE;
        }
        if self.truncated {
            flags |= flag::TRUNCATED;
        }
        BigEndian::write_u16(&mut data[..2], self.id);
        BigEndian::write_u16(&mut data[2..4], flags);
        BigEndian::write_u16(&mut data[4..6], self.questions);
        BigEndian::write_u16(&mut data[6..8], self.answers);
        BigEndian::write_u16(&mut data[8..10], self.nameservers);
        BigEndian::write_u16(&mut data[10..12], self.additional);
    }

    pub fn set_response_code(data: &mut [u8], rcode: ResponseCode) {
        let oldflags = BigEndian::read_u16(&data[2..4]) & !flag::RESPONSE_CODE_MASK;
        let code = u8::from(rcode) as u16 & flag::RESPONSE_CODE_MASK;
        BigEndian::write_u16(&mut data[2..4], oldflags | code);
    }

    fn inc_count(data: &mut [u8], at: usize) -> Option<u16> {
        let count = BigEndian::read_u16(&data[at..at + 2]).checked_add(1)?;
        BigEndian::write_u16(&mut data[at..at + 2], count);
        Some(count)
    }

    /// Returns `None` when there are already 65535 questions
    pub fn inc_questions(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(data, 4)
    }

    pub fn inc_answers(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(data, 6)
    }

    pub fn inc_nameservers(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(data, 8)
    }

    pub fn inc_additional(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(data, 10)
    }
}
