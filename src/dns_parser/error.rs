use thiserror::Error;

/// Error parsing DNS packet
///
/// Every variant but `LabelTooLong` means the received message is malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("packet is smaller than header size")]
    HeaderTooShort,
    #[error("packet has incomplete data")]
    UnexpectedEOF,
    #[error("wrong (too short or too long) size of RDATA")]
    WrongRdataLength,
    #[error("label in domain name has unknown label format")]
    UnknownLabelFormat,
    #[error("compression pointer at offset {at} refers forward to offset {target}")]
    BadPointer { at: usize, target: usize },
    #[error("too many compression pointers in domain name")]
    TooManyPointers,
    #[error("domain name is longer than 255 bytes")]
    NameTooLong,
    #[error("invalid characters encountered while reading label")]
    LabelIsNotAscii,
    #[error("label {0:?} is longer than 63 bytes")]
    LabelTooLong(String),
}
