use std::io;
use std::net::Ipv4Addr;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use super::{Error, Name, Type};

/// The enumeration that represents known types of DNS resource records data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RRData<'a> {
    A(Ipv4Addr),
    NS(Name<'a>),
    CNAME(Name<'a>),
    MX {
        preference: u16,
        exchange: Name<'a>,
    },
    // Anything that can't be parsed yet
    Unknown {
        typ: Type,
        data: &'a [u8],
    },
}

impl<'a> RRData<'a> {
    pub fn typ(&self) -> Type {
        match *self {
            RRData::A(..) => Type::A,
            RRData::NS(..) => Type::NS,
            RRData::CNAME(..) => Type::CNAME,
            RRData::MX { .. } => Type::MX,
            RRData::Unknown { typ, .. } => typ,
        }
    }

    pub fn write_to<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        match *self {
            RRData::A(ip) => writer.write_u32::<BigEndian>(ip.into()),
            RRData::NS(ref name) | RRData::CNAME(ref name) => name.write_to(writer),
            RRData::MX {
                preference,
                ref exchange,
            } => {
                writer.write_u16::<BigEndian>(preference)?;
                exchange.write_to(writer)
            }
            RRData::Unknown { data, .. } => writer.write_all(data),
        }
    }

    /// Parses `len` bytes of RDATA found at `offset` in `original`
    ///
    /// The caller guarantees the RDATA lies within `original`. Names may
    /// point anywhere before themselves in the message but their own
    /// labels must fill the RDATA exactly.
    pub fn parse(
        typ: Type,
        original: &'a [u8],
        offset: usize,
        len: usize,
    ) -> Result<RRData<'a>, Error> {
        let rdata = &original[offset..offset + len];
        match typ {
            Type::A => {
                if rdata.len() != 4 {
                    return Err(Error::WrongRdataLength);
                }
                Ok(RRData::A(Ipv4Addr::from(BigEndian::read_u32(rdata))))
            }
            Type::NS => Ok(RRData::NS(scan_exact(original, offset, len)?)),
            Type::CNAME => Ok(RRData::CNAME(scan_exact(original, offset, len)?)),
            Type::MX => {
                if rdata.len() < 3 {
                    return Err(Error::WrongRdataLength);
                }
                Ok(RRData::MX {
                    preference: BigEndian::read_u16(&rdata[..2]),
                    exchange: scan_exact(original, offset + 2, len - 2)?,
                })
            }
            typ => Ok(RRData::Unknown { typ, data: rdata }),
        }
    }
}

fn scan_exact(original: &[u8], offset: usize, len: usize) -> Result<Name<'_>, Error> {
    let (name, consumed) = Name::scan(&original[..offset + len], offset)?;
    if consumed != len {
        return Err(Error::WrongRdataLength);
    }
    Ok(name)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_address() {
        let msg = b"\x5d\xb8\xd8\x22";
        let data = RRData::parse(Type::A, msg, 0, 4).unwrap();
        assert_eq!(data, RRData::A(Ipv4Addr::new(93, 184, 216, 34)));
        assert_eq!(
            RRData::parse(Type::A, msg, 0, 3).unwrap_err(),
            Error::WrongRdataLength
        );
    }

    #[test]
    fn parse_mx_with_compressed_exchange() {
        let msg = b"\x07example\x03com\x00\x00\x0a\x04mail\xc0\x00";
        match RRData::parse(Type::MX, msg, 13, 9).unwrap() {
            RRData::MX {
                preference,
                exchange,
            } => {
                assert_eq!(preference, 10);
                assert_eq!(exchange.to_string(), "mail.example.com");
            }
            other => panic!("unexpected rdata: {:?}", other),
        }
    }

    #[test]
    fn name_must_fill_rdata() {
        let msg = b"\x02ns\x07example\x03com\x00";
        assert!(RRData::parse(Type::NS, msg, 0, msg.len()).is_ok());
        assert_eq!(
            RRData::parse(Type::CNAME, msg, 0, msg.len() - 4).unwrap_err(),
            Error::UnexpectedEOF
        );
    }

    #[test]
    fn unknown_types_are_opaque() {
        let msg = b"\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x01";
        let data = RRData::parse(Type::Other(28), msg, 0, 16).unwrap();
        assert_eq!(
            data,
            RRData::Unknown {
                typ: Type::Other(28),
                data: &msg[..],
            }
        );
    }
}
