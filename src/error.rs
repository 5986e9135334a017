//! Error type for message content

use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
};

/// The errors that may occur while assembling a message
#[derive(Debug)]
pub enum Error {
    /// The message has no originator mailbox
    MissingFrom,
    /// Reading a body or attachment failed
    Io(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingFrom => f.write_str("missing source address, invalid envelope"),
            Error::Io(e) => e.fmt(f),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}
