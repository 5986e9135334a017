//! Transports for delivering composed messages
//!
//! The following transports are available:
//!
//! * The [`smtp`] transport delivers the message to a relay server over the
//!   network. It is the preferred way of sending emails.
//! * The [`stub`] transport only records the messages it is given. It is
//!   useful for testing.

pub mod smtp;
pub mod stub;

use crate::{address::Envelope, message::Message};

/// Blocking transport method for emails
pub trait Transport {
    /// Response produced by the transport
    type Ok;
    /// Error produced by the transport
    type Error;

    /// Sends the email
    fn send(&self, message: &Message) -> Result<Self::Ok, Self::Error> {
        let raw = message.formatted();
        self.send_raw(message.envelope(), &raw)
    }

    /// Sends pre-formatted message bytes with the given envelope
    fn send_raw(&self, envelope: &Envelope, email: &[u8]) -> Result<Self::Ok, Self::Error>;
}
