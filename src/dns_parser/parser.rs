use byteorder::{BigEndian, ByteOrder};

use super::header::HEADER_SIZE;
use super::{Class, Error, Header, Name, QueryClass, QueryType, RRData, Type};
use super::{Packet, Question, ResourceRecord};

impl<'a> Packet<'a> {
    /// Parse a full DNS Packet and return a structure that has all the
    /// data borrowed from the passed buffer.
    ///
    /// Sections are read in wire order and each holds exactly as many
    /// entries as the header announces. Bytes after the last record are
    /// ignored.
    pub fn parse(data: &'a [u8]) -> Result<Packet<'a>, Error> {
        let header = Header::parse(data)?;
        let mut offset = HEADER_SIZE;

        let mut questions = Vec::new();
        for _ in 0..header.questions {
            let (qname, consumed) = Name::scan(data, offset)?;
            offset += consumed;
            let fixed = data.get(offset..offset + 4).ok_or(Error::UnexpectedEOF)?;
            questions.push(Question {
                qname,
                qtype: QueryType::from(BigEndian::read_u16(&fixed[..2])),
                qclass: QueryClass::from(BigEndian::read_u16(&fixed[2..4])),
            });
            offset += 4;
        }

        let answers = parse_records(data, &mut offset, header.answers)?;
        let nameservers = parse_records(data, &mut offset, header.nameservers)?;
        let additional = parse_records(data, &mut offset, header.additional)?;

        Ok(Packet {
            header,
            questions,
            answers,
            nameservers,
            additional,
        })
    }
}

fn parse_records<'a>(
    data: &'a [u8],
    offset: &mut usize,
    count: u16,
) -> Result<Vec<ResourceRecord<'a>>, Error> {
    let mut records = Vec::new();
    for _ in 0..count {
        records.push(parse_record(data, offset)?);
    }
    Ok(records)
}

// Generic function to parse answer, nameservers, and additional records.
fn parse_record<'a>(data: &'a [u8], offset: &mut usize) -> Result<ResourceRecord<'a>, Error> {
    let (name, consumed) = Name::scan(data, *offset)?;
    *offset += consumed;
    let fixed = data
        .get(*offset..*offset + 10)
        .ok_or(Error::UnexpectedEOF)?;
    let typ = Type::from(BigEndian::read_u16(&fixed[..2]));
    let cls = Class::from(BigEndian::read_u16(&fixed[2..4]));
    let ttl = BigEndian::read_u32(&fixed[4..8]);
    let rdlen = BigEndian::read_u16(&fixed[8..10]) as usize;
    *offset += 10;
    if data.len() < *offset + rdlen {
        return Err(Error::UnexpectedEOF);
    }
    let rdata = RRData::parse(typ, data, *offset, rdlen)?;
    *offset += rdlen;
    Ok(ResourceRecord {
        name,
        cls,
        ttl,
        data: rdata,
    })
}

#[cfg(test)]
mod test {
    use std::net::Ipv4Addr;

    use super::super::{Builder, Opcode, ResponseCode};
    use super::*;

    #[test]
    fn parse_example_query() {
        let query = b"\x06%\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
                      \x07example\x03com\x00\x00\x01\x00\x01";
        let packet = Packet::parse(query).unwrap();
        assert_eq!(packet.header.id, 1573);
        assert!(packet.header.query);
        assert_eq!(packet.header.opcode, Opcode::StandardQuery);
        assert_eq!(packet.questions.len(), 1);
        assert_eq!(packet.questions[0].qtype, QueryType::A);
        assert_eq!(packet.questions[0].qclass, QueryClass::IN);
        assert_eq!(&packet.questions[0].qname.to_string()[..], "example.com");
        assert_eq!(packet.answers.len(), 0);
    }

    #[test]
    fn parse_example_response() {
        let response = b"\xc3\x02\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00\
                         \x07example\x03com\x00\x00\x01\x00\x01\
                         \xc0\x0c\x00\x01\x00\x01\x00\x00\x0e\x10\x00\x04\
                         \x5d\xb8\xd8\x22";
        let packet = Packet::parse(response).unwrap();
        assert!(!packet.header.query);
        assert!(!packet.header.authoritative);
        assert_eq!(packet.header.response_code, ResponseCode::NoError);
        assert_eq!(packet.answers.len(), 1);
        assert_eq!(&packet.answers[0].name.to_string()[..], "example.com");
        assert_eq!(packet.answers[0].cls, Class::IN);
        assert_eq!(packet.answers[0].ttl, 3600);
        assert_eq!(
            packet.answers[0].data,
            RRData::A(Ipv4Addr::new(93, 184, 216, 34))
        );
    }

    #[test]
    fn parse_ns_response_with_glue() {
        let response = b"\x4a\xf0\x81\x80\x00\x01\x00\x01\x00\x00\x00\x01\
                         \x07example\x03com\x00\x00\x02\x00\x01\
                         \xc0\x0c\x00\x02\x00\x01\x00\x01\x51\x80\x00\x06\
                         \x03ns1\xc0\x0c\
                         \xc0\x29\x00\x01\x00\x01\x00\x01\x51\x80\x00\x04\
                         \xc0\x00\x02\x01";
        let packet = Packet::parse(response).unwrap();
        assert_eq!(packet.questions[0].qtype, QueryType::NS);
        match packet.answers[0].data {
            RRData::NS(ref name) => assert_eq!(name.to_string(), "ns1.example.com"),
            ref other => panic!("unexpected rdata: {:?}", other),
        }
        assert_eq!(packet.additional.len(), 1);
        assert_eq!(packet.additional[0].name.to_string(), "ns1.example.com");
        assert_eq!(
            packet.additional[0].data,
            RRData::A(Ipv4Addr::new(192, 0, 2, 1))
        );
    }

    #[test]
    fn answer_count_larger_than_records() {
        let response = b"\xc3\x02\x81\x80\x00\x01\x00\x03\x00\x00\x00\x00\
                         \x07example\x03com\x00\x00\x01\x00\x01\
                         \xc0\x0c\x00\x01\x00\x01\x00\x00\x0e\x10\x00\x04\
                         \x5d\xb8\xd8\x22";
        assert_eq!(Packet::parse(response).unwrap_err(), Error::UnexpectedEOF);
    }

    #[test]
    fn rdata_past_end_of_buffer() {
        let response = b"\xc3\x02\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00\
                         \x07example\x03com\x00\x00\x01\x00\x01\
                         \xc0\x0c\x00\x01\x00\x01\x00\x00\x0e\x10\x00\x04\
                         \x5d\xb8";
        assert_eq!(Packet::parse(response).unwrap_err(), Error::UnexpectedEOF);
    }

    #[test]
    fn header_only() {
        assert_eq!(
            Packet::parse(b"\xc3\x02\x81\x80\x00\x00\x00").unwrap_err(),
            Error::HeaderTooShort
        );
        let empty = Packet::parse(b"\xc3\x02\x81\x80\x00\x00\x00\x00\x00\x00\x00\x00").unwrap();
        assert!(empty.questions.is_empty());
    }

    #[test]
    fn parsing_is_repeatable() {
        let response = b"\xc3\x02\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00\
                         \x07example\x03com\x00\x00\x0f\x00\x01\
                         \xc0\x0c\x00\x0f\x00\x01\x00\x00\x0e\x10\x00\x09\
                         \x00\x0a\x04mail\xc0\x0c";
        assert_eq!(
            Packet::parse(response).unwrap(),
            Packet::parse(response).unwrap()
        );
    }

    #[test]
    fn echoed_question_keeps_type_and_class() {
        let name = Name::from_str("example.com").unwrap();
        let target = Name::from_str("host.example.com").unwrap();
        let cases = vec![
            (QueryType::A, RRData::A(Ipv4Addr::new(192, 0, 2, 7))),
            (QueryType::NS, RRData::NS(target.clone())),
            (QueryType::CNAME, RRData::CNAME(target.clone())),
            (
                QueryType::MX,
                RRData::MX {
                    preference: 5,
                    exchange: target.clone(),
                },
            ),
        ];
        for (qtype, data) in cases {
            let query = Builder::new_query(99, true)
                .add_question(&name, qtype, QueryClass::IN)
                .unwrap()
                .build();
            let asked = Packet::parse(&query).unwrap();
            let question = &asked.questions[0];

            let reply = Builder::new_response(99, true, false)
                .add_question(&question.qname, question.qtype, question.qclass)
                .unwrap()
                .add_answer(&question.qname, QueryClass::IN, 60, &data)
                .unwrap()
                .build();
            let packet = Packet::parse(&reply).unwrap();
            assert_eq!(packet.questions[0].qtype, qtype);
            assert_eq!(packet.questions[0].qclass, QueryClass::IN);
            assert_eq!(packet.questions[0].qname, name);
            assert_eq!(packet.answers[0].data, data);
        }
    }
}
