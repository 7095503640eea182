/// The TYPE value of a resource record
///
/// Only the types this client renders are named; everything else is kept
/// as its raw numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// a host address
    A,
    /// an authoritative name server
    NS,
    /// the canonical name for an alias
    CNAME,
    /// mail exchange
    MX,
    /// any other type, passed through untouched
    Other(u16),
}

/// The QTYPE value of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    A,
    NS,
    CNAME,
    MX,
    Other(u16),
}

/// The CLASS value of a resource record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// the Internet
    IN,
    Other(u16),
}

/// The QCLASS value of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryClass {
    /// the Internet
    IN,
    Other(u16),
}

/// The OPCODE value of the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    StandardQuery,
    InverseQuery,
    ServerStatusRequest,
    Reserved(u8),
}

/// The RCODE value of the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    Reserved(u8),
}

impl From<u16> for Type {
    fn from(code: u16) -> Type {
        match code {
            1 => Type::A,
            2 => Type::NS,
            5 => Type::CNAME,
            15 => Type::MX,
            x => Type::Other(x),
        }
    }
}

impl From<Type> for u16 {
    fn from(typ: Type) -> u16 {
        match typ {
            Type::A => 1,
            Type::NS => 2,
            Type::CNAME => 5,
            Type::MX => 15,
            Type::Other(x) => x,
        }
    }
}

impl From<u16> for QueryType {
    fn from(code: u16) -> QueryType {
        match Type::from(code) {
            Type::A => QueryType::A,
            Type::NS => QueryType::NS,
            Type::CNAME => QueryType::CNAME,
            Type::MX => QueryType::MX,
            Type::Other(x) => QueryType::Other(x),
        }
    }
}

impl From<QueryType> for u16 {
    fn from(qtype: QueryType) -> u16 {
        match qtype {
            QueryType::A => Type::A.into(),
            QueryType::NS => Type::NS.into(),
            QueryType::CNAME => Type::CNAME.into(),
            QueryType::MX => Type::MX.into(),
            QueryType::Other(x) => x,
        }
    }
}

impl From<u16> for Class {
    fn from(code: u16) -> Class {
        match code {
            1 => Class::IN,
            x => Class::Other(x),
        }
    }
}

impl From<Class> for u16 {
    fn from(cls: Class) -> u16 {
        match cls {
            Class::IN => 1,
            Class::Other(x) => x,
        }
    }
}

impl From<u16> for QueryClass {
    fn from(code: u16) -> QueryClass {
        match code {
            1 => QueryClass::IN,
            x => QueryClass::Other(x),
        }
    }
}

impl From<QueryClass> for u16 {
    fn from(qclass: QueryClass) -> u16 {
        match qclass {
            QueryClass::IN => 1,
            QueryClass::Other(x) => x,
        }
    }
}

impl From<u8> for Opcode {
    fn from(code: u8) -> Opcode {
        match code {
            0 => Opcode::StandardQuery,
            1 => Opcode::InverseQuery,
            2 => Opcode::ServerStatusRequest,
            x => Opcode::Reserved(x),
        }
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> u8 {
        match opcode {
            Opcode::StandardQuery => 0,
            Opcode::InverseQuery => 1,
            Opcode::ServerStatusRequest => 2,
            Opcode::Reserved(x) => x,
        }
    }
}

impl From<u8> for ResponseCode {
    fn from(code: u8) -> ResponseCode {
        match code {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NameError,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            x => ResponseCode::Reserved(x),
        }
    }
}

impl From<ResponseCode> for u8 {
    fn from(rcode: ResponseCode) -> u8 {
        match rcode {
            ResponseCode::NoError => 0,
            ResponseCode::FormatError => 1,
            ResponseCode::ServerFailure => 2,
            ResponseCode::NameError => 3,
            ResponseCode::NotImplemented => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Reserved(x) => x,
        }
    }
}
