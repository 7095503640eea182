use std::borrow::Cow;
use std::fmt;
use std::fmt::Write;
use std::io;
use std::str::from_utf8;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use super::Error;

/// Longest name allowed on the wire, length octets included
const MAX_NAME_LENGTH: usize = 255;
const MAX_LABEL_LENGTH: usize = 63;
/// Upper bound on compression pointers followed while reading one name
const MAX_POINTERS: usize = 127;

const POINTER_MASK: u8 = 0b1100_0000;

/// The DNS name as stored in the original packet
///
/// This is contains just a reference to a slice that contains the data.
/// You may turn this into a string using `.to_string()`
#[derive(Debug, Clone)]
pub enum Name<'a> {
    FromPacket {
        /// Offset of the first label in `original`
        start: usize,
        /// The whole message. Compression pointers are offsets into it
        original: &'a [u8],
    },

    FromStr(Cow<'a, str>),
}

impl<'a> Name<'a> {
    /// Validates the name found at `start` in `original`
    ///
    /// Returns the name along with the number of bytes it occupies at
    /// `start`. A compression pointer ends the name, so only the labels up to
    /// and including the first pointer are counted.
    ///
    /// Every pointer must refer strictly before the run of labels it ends,
    /// which makes pointer chasing terminate on any input.
    pub fn scan(original: &'a [u8], start: usize) -> Result<(Name<'a>, usize), Error> {
        let mut pos = start;
        let mut run_start = start;
        let mut consumed = None;
        let mut pointers = 0;
        let mut length = 0;
        loop {
            let byte = *original.get(pos).ok_or(Error::UnexpectedEOF)?;
            if byte == 0 {
                if length + 1 > MAX_NAME_LENGTH {
                    return Err(Error::NameTooLong);
                }
                let consumed = consumed.unwrap_or_else(|| pos + 1 - start);
                return Ok((Name::FromPacket { start, original }, consumed));
            } else if byte & POINTER_MASK == POINTER_MASK {
                let raw = original.get(pos..pos + 2).ok_or(Error::UnexpectedEOF)?;
                let target = (BigEndian::read_u16(raw) & !0b1100_0000_0000_0000) as usize;
                if target >= run_start {
                    return Err(Error::BadPointer { at: pos, target });
                }
                pointers += 1;
                if pointers > MAX_POINTERS {
                    return Err(Error::TooManyPointers);
                }
                if consumed.is_none() {
                    consumed = Some(pos + 2 - start);
                }
                pos = target;
                run_start = target;
            } else if byte & POINTER_MASK == 0 {
                let end = pos + byte as usize + 1;
                let label = original.get(pos + 1..end).ok_or(Error::UnexpectedEOF)?;
                if from_utf8(label).is_err() {
                    return Err(Error::LabelIsNotAscii);
                }
                length += label.len() + 1;
                if length > MAX_NAME_LENGTH {
                    return Err(Error::NameTooLong);
                }
                pos = end;
            } else {
                return Err(Error::UnknownLabelFormat);
            }
        }
    }

    /// Wraps a dotted name for encoding
    ///
    /// A single trailing dot is accepted and ignored, so `example.com.` and
    /// `example.com` encode the same way. Case is kept as given.
    pub fn from_str<T: Into<Cow<'a, str>>>(name: T) -> Result<Name<'a>, Error> {
        let name = name.into();
        if let Some(label) = str_labels(&name)
            .into_iter()
            .flatten()
            .find(|label| label.len() > MAX_LABEL_LENGTH)
        {
            return Err(Error::LabelTooLong(label.to_owned()));
        }
        Ok(Name::FromStr(name))
    }

    /// Iterates over the labels of the name, following compression pointers
    pub fn labels(&self) -> Labels<'_> {
        match *self {
            Name::FromPacket { start, original } => Labels::Packet {
                original,
                pos: Some(start),
                pointers: 0,
            },
            Name::FromStr(ref name) => Labels::Str(str_labels(name)),
        }
    }

    /// Writes the name uncompressed
    pub fn write_to<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        for label in self.labels() {
            if label.len() > MAX_LABEL_LENGTH {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    Error::LabelTooLong(label.to_owned()),
                ));
            }
            writer.write_u8(label.len() as u8)?;
            writer.write_all(label.as_bytes())?;
        }
        writer.write_u8(0)
    }
}

fn str_labels(name: &str) -> Option<std::str::Split<'_, char>> {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() {
        None
    } else {
        Some(name.split('.'))
    }
}

/// Iterator over the labels of a [`Name`]
pub enum Labels<'a> {
    Packet {
        original: &'a [u8],
        pos: Option<usize>,
        pointers: usize,
    },
    Str(Option<std::str::Split<'a, char>>),
}

impl<'a> Iterator for Labels<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        match self {
            Labels::Packet {
                original,
                pos,
                pointers,
            } => {
                let original: &'a [u8] = *original;
                loop {
                    let at = (*pos)?;
                    *pos = None;
                    let byte = *original.get(at)?;
                    if byte == 0 {
                        return None;
                    } else if byte & POINTER_MASK == POINTER_MASK {
                        *pointers += 1;
                        if *pointers > MAX_POINTERS {
                            return None;
                        }
                        let raw = original.get(at..at + 2)?;
                        *pos = Some((BigEndian::read_u16(raw) & !0b1100_0000_0000_0000) as usize);
                    } else {
                        let end = at + byte as usize + 1;
                        let label = from_utf8(original.get(at + 1..end)?).ok()?;
                        *pos = Some(end);
                        return Some(label);
                    }
                }
            }
            Labels::Str(split) => split.as_mut()?.next(),
        }
    }
}

impl<'a> fmt::Display for Name<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Name::FromPacket { .. } => {
                for (i, label) in self.labels().enumerate() {
                    if i != 0 {
                        fmt.write_char('.')?;
                    }
                    fmt.write_str(label)?;
                }
                Ok(())
            }

            Name::FromStr(ref name) => fmt.write_str(name),
        }
    }
}

/// Names compare label by label, ignoring ASCII case
impl<'a, 'b> PartialEq<Name<'b>> for Name<'a> {
    fn eq(&self, other: &Name<'b>) -> bool {
        let mut ours = self.labels();
        let mut theirs = other.labels();
        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => continue,
                _ => return false,
            }
        }
    }
}

impl<'a> Eq for Name<'a> {}
