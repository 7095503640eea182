use std::io;
use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use super::header::HEADER_SIZE;
use super::{Header, Name, Opcode, QueryClass, QueryType, RRData, ResponseCode};

pub enum Questions {}
pub enum Answers {}
pub enum Nameservers {}
pub enum Additional {}

pub trait MoveTo<T> {}
impl<T> MoveTo<T> for T {}

impl MoveTo<Answers> for Questions {}

impl MoveTo<Nameservers> for Questions {}
impl MoveTo<Nameservers> for Answers {}

impl MoveTo<Additional> for Questions {}
impl MoveTo<Additional> for Answers {}
impl MoveTo<Additional> for Nameservers {}

/// Allows to build a DNS packet
///
/// Sections can only be filled in wire order: questions, answers,
/// nameservers, then additional records. Names are written uncompressed.
pub struct Builder<S> {
    buf: Vec<u8>,
    _state: PhantomData<S>,
}

impl Builder<Questions> {
    /// Creates a new query
    ///
    /// Initially all sections are empty. You're expected to fill
    /// the questions section with `add_question`
    pub fn new_query(id: u16, recursion: bool) -> Builder<Questions> {
        Builder::with_header(Header {
            id,
            query: true,
            opcode: Opcode::StandardQuery,
            authoritative: false,
            truncated: false,
            recursion_desired: recursion,
            recursion_available: false,
            response_code: ResponseCode::NoError,
            questions: 0,
            answers: 0,
            nameservers: 0,
            additional: 0,
        })
    }

    pub fn new_response(id: u16, recursion: bool, authoritative: bool) -> Builder<Questions> {
        Builder::with_header(Header {
            id,
            query: false,
            opcode: Opcode::StandardQuery,
            authoritative,
            truncated: false,
            recursion_desired: recursion,
            recursion_available: recursion,
            response_code: ResponseCode::NoError,
            questions: 0,
            answers: 0,
            nameservers: 0,
            additional: 0,
        })
    }

    fn with_header(head: Header) -> Builder<Questions> {
        let mut raw = [0u8; HEADER_SIZE];
        head.write(&mut raw);
        let mut buf = Vec::with_capacity(512);
        buf.extend_from_slice(&raw);
        Builder {
            buf,
            _state: PhantomData,
        }
    }
}

impl<T> Builder<T> {
    fn write_rr(&mut self, name: &Name, cls: QueryClass, ttl: u32, data: &RRData) -> io::Result<()> {
        name.write_to(&mut self.buf)?;
        self.buf.write_u16::<BigEndian>(data.typ().into())?;
        self.buf.write_u16::<BigEndian>(cls.into())?;
        self.buf.write_u32::<BigEndian>(ttl)?;

        let size_offset = self.buf.len();
        self.buf.write_u16::<BigEndian>(0)?;

        let data_offset = self.buf.len();
        data.write_to(&mut self.buf)?;
        let data_size = self.buf.len() - data_offset;

        BigEndian::write_u16(
            &mut self.buf[size_offset..size_offset + 2],
            data_size as u16,
        );
        Ok(())
    }

    /// Returns the final packet
    pub fn build(self) -> Vec<u8> {
        self.buf
    }

    pub fn move_to<U>(self) -> Builder<U>
    where
        T: MoveTo<U>,
    {
        Builder {
            buf: self.buf,
            _state: PhantomData,
        }
    }

    pub fn set_response_code(&mut self, rcode: ResponseCode) {
        Header::set_response_code(&mut self.buf[..HEADER_SIZE], rcode);
    }
}

fn section_full(section: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("too many {} for one packet", section),
    )
}

impl<T: MoveTo<Questions>> Builder<T> {
    /// Adds a question to the packet
    ///
    /// Fails when there are already 65535 questions in the buffer.
    pub fn add_question(
        self,
        qname: &Name,
        qtype: QueryType,
        qclass: QueryClass,
    ) -> io::Result<Builder<Questions>> {
        let mut builder = self.move_to::<Questions>();

        qname.write_to(&mut builder.buf)?;
        builder.buf.write_u16::<BigEndian>(qtype.into())?;
        builder.buf.write_u16::<BigEndian>(qclass.into())?;
        Header::inc_questions(&mut builder.buf)
            .ok_or_else(|| section_full("questions"))?;
        Ok(builder)
    }
}

impl<T: MoveTo<Answers>> Builder<T> {
    pub fn add_answer(
        self,
        name: &Name,
        cls: QueryClass,
        ttl: u32,
        data: &RRData,
    ) -> io::Result<Builder<Answers>> {
        let mut builder = self.move_to::<Answers>();

        builder.write_rr(name, cls, ttl, data)?;
        Header::inc_answers(&mut builder.buf)
            .ok_or_else(|| section_full("answers"))?;

        Ok(builder)
    }
}

impl<T: MoveTo<Nameservers>> Builder<T> {
    pub fn add_nameserver(
        self,
        name: &Name,
        cls: QueryClass,
        ttl: u32,
        data: &RRData,
    ) -> io::Result<Builder<Nameservers>> {
        let mut builder = self.move_to::<Nameservers>();

        builder.write_rr(name, cls, ttl, data)?;
        Header::inc_nameservers(&mut builder.buf)
            .ok_or_else(|| section_full("nameservers"))?;

        Ok(builder)
    }
}

impl<T: MoveTo<Additional>> Builder<T> {
    pub fn add_additional(
        self,
        name: &Name,
        cls: QueryClass,
        ttl: u32,
        data: &RRData,
    ) -> io::Result<Builder<Additional>> {
        let mut builder = self.move_to::<Additional>();

        builder.write_rr(name, cls, ttl, data)?;
        Header::inc_additional(&mut builder.buf)
            .ok_or_else(|| section_full("additional records"))?;

        Ok(builder)
    }
}

#[cfg(test)]
mod test {
    use std::net::Ipv4Addr;

    use super::super::{Header, Packet};
    use super::Builder;
    use super::Name;
    use super::QueryClass as QC;
    use super::QueryType as QT;
    use super::RRData;

    #[test]
    fn build_query() {
        let name = Name::from_str("example.com").unwrap();
        let bld = Builder::new_query(1573, true)
            .add_question(&name, QT::A, QC::IN)
            .unwrap();
        let result = b"\x06%\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
                      \x07example\x03com\x00\x00\x01\x00\x01";
        assert_eq!(&bld.build()[..], &result[..]);
    }

    #[test]
    fn build_mx_query() {
        let name = Name::from_str("gmail.com").unwrap();
        let bld = Builder::new_query(23513, true)
            .add_question(&name, QT::MX, QC::IN)
            .unwrap();
        let result = b"[\xd9\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
            \x05gmail\x03com\x00\x00\x0f\x00\x01";
        assert_eq!(&bld.build()[..], &result[..]);
    }

    #[test]
    fn build_response_with_every_section() {
        let name = Name::from_str("example.com").unwrap();
        let ns = Name::from_str("ns1.example.com").unwrap();
        let packet = Builder::new_response(7, true, true)
            .add_question(&name, QT::NS, QC::IN)
            .unwrap()
            .add_answer(&name, QC::IN, 300, &RRData::NS(ns.clone()))
            .unwrap()
            .add_nameserver(&name, QC::IN, 300, &RRData::NS(ns.clone()))
            .unwrap()
            .add_additional(&ns, QC::IN, 60, &RRData::A(Ipv4Addr::new(192, 0, 2, 1)))
            .unwrap()
            .build();

        let parsed = Packet::parse(&packet).unwrap();
        assert!(parsed.header.authoritative);
        assert_eq!(parsed.answers.len(), 1);
        assert_eq!(parsed.nameservers.len(), 1);
        assert_eq!(parsed.additional.len(), 1);
        assert_eq!(parsed.answers[0].data, RRData::NS(ns.clone()));
        assert_eq!(parsed.additional[0].name, ns);
        assert_eq!(parsed.additional[0].ttl, 60);
    }

    #[test]
    fn full_section_is_an_error() {
        let name = Name::from_str("example.com").unwrap();
        let mut header = Header::parse(&Builder::new_response(1, true, false).build()).unwrap();
        header.answers = u16::MAX;
        let result = Builder::with_header(header).add_answer(
            &name,
            QC::IN,
            60,
            &RRData::A(Ipv4Addr::new(192, 0, 2, 1)),
        );
        assert_eq!(
            result.err().map(|err| err.kind()),
            Some(std::io::ErrorKind::InvalidInput)
        );
    }
}
