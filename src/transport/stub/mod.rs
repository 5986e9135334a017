//! The stub transport only records the messages it is given, without
//! talking to any server. It is useful for testing.

use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
    sync::{Arc, Mutex},
};

use crate::address::Envelope;
use crate::transport::Transport;

/// The error produced by a failing [`StubTransport`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Error;

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("stub transport error")
    }
}

impl StdError for Error {}

/// A transport that records the envelopes and message bytes handed to it
/// and returns a configured outcome
#[derive(Debug, Clone, Default)]
pub struct StubTransport {
    messages: Arc<Mutex<Vec<(Envelope, Vec<u8>)>>>,
    fail: bool,
}

impl StubTransport {
    /// Creates a new transport that records messages and succeeds
    pub fn new_ok() -> StubTransport {
        StubTransport {
            messages: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Creates a new transport that records messages and then fails
    pub fn new_error() -> StubTransport {
        StubTransport {
            messages: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Everything sent through this transport so far
    pub fn messages(&self) -> Vec<(Envelope, Vec<u8>)> {
        self.messages.lock().unwrap().clone()
    }
}

impl Transport for StubTransport {
    type Ok = ();
    type Error = Error;

    fn send_raw(&self, envelope: &Envelope, email: &[u8]) -> Result<Self::Ok, Self::Error> {
        self.messages
            .lock()
            .unwrap()
            .push((envelope.clone(), email.to_vec()));
        if self.fail {
            Err(Error)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::StubTransport;
    use crate::address::Envelope;
    use crate::transport::Transport;

    #[test]
    fn stub_records_raw_sends() {
        let stub = StubTransport::new_ok();
        let envelope = Envelope::new(
            Some("a@example.com".parse().unwrap()),
            vec!["b@example.com".parse().unwrap()],
        );

        stub.send_raw(&envelope, b"hello").unwrap();

        let messages = stub.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, envelope);
        assert_eq!(messages[0].1, b"hello");
    }
}
