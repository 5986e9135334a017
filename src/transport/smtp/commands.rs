//! SMTP commands

use std::fmt::{self, Display, Formatter};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::address::Address;
use crate::transport::smtp::{
    authentication::{Credentials, Mechanism},
    error::{self, Error},
    extension::ClientId,
    response::Response,
};

/// EHLO command
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Ehlo {
    client_id: ClientId,
}

impl Display for Ehlo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "EHLO {}\r\n", self.client_id)
    }
}

impl Ehlo {
    /// Creates an EHLO command
    pub fn new(client_id: ClientId) -> Ehlo {
        Ehlo { client_id }
    }
}

/// STARTTLS command
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Starttls;

impl Display for Starttls {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("STARTTLS\r\n")
    }
}

/// MAIL command
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Mail {
    sender: Option<Address>,
    eight_bit_mime: bool,
}

impl Display for Mail {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MAIL FROM:<{}>",
            self.sender.as_ref().map(AsRef::as_ref).unwrap_or("")
        )?;
        if self.eight_bit_mime {
            f.write_str(" BODY=8BITMIME")?;
        }
        f.write_str("\r\n")
    }
}

impl Mail {
    /// Creates a MAIL command
    pub fn new(sender: Option<Address>, eight_bit_mime: bool) -> Mail {
        Mail {
            sender,
            eight_bit_mime,
        }
    }
}

/// RCPT command
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Rcpt {
    recipient: Address,
}

impl Display for Rcpt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "RCPT TO:<{}>\r\n", self.recipient)
    }
}

impl Rcpt {
    /// Creates an RCPT command
    pub fn new(recipient: Address) -> Rcpt {
        Rcpt { recipient }
    }
}

/// DATA command
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Data;

impl Display for Data {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("DATA\r\n")
    }
}

/// QUIT command
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Quit;

impl Display for Quit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("QUIT\r\n")
    }
}

/// AUTH command
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Auth {
    mechanism: Mechanism,
    response: Option<String>,
}

impl Display for Auth {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let encoded_response = self
            .response
            .as_ref()
            .map(|r| BASE64.encode(r.as_bytes()));

        if self.mechanism.supports_initial_response() {
            write!(f, "AUTH {} {}", self.mechanism, encoded_response.unwrap())?;
        } else {
            match encoded_response {
                Some(response) => f.write_str(&response)?,
                None => write!(f, "AUTH {}", self.mechanism)?,
            }
        }
        f.write_str("\r\n")
    }
}

impl Auth {
    /// Creates an AUTH command (from a challenge if provided)
    pub fn new(
        mechanism: Mechanism,
        credentials: Credentials,
        challenge: Option<String>,
    ) -> Result<Auth, Error> {
        let response = if mechanism.supports_initial_response() || challenge.is_some() {
            Some(mechanism.response(&credentials, challenge.as_deref())?)
        } else {
            None
        };
        Ok(Auth {
            mechanism,
            response,
        })
    }

    /// Creates an AUTH command from a server response, which must be a
    /// valid challenge (with a 334 response code)
    pub fn new_from_response(
        mechanism: Mechanism,
        credentials: Credentials,
        response: &Response,
    ) -> Result<Auth, Error> {
        if !response.has_code(334) {
            return Err(error::response("Expecting a challenge"));
        }

        let encoded_challenge = response
            .first_word()
            .ok_or_else(|| error::response("Could not read auth challenge"))?;

        let decoded_challenge = BASE64
            .decode(encoded_challenge)
            .map_err(error::response)
            .and_then(|c| String::from_utf8(c).map_err(error::response))?;

        let response = Some(mechanism.response(&credentials, Some(&decoded_challenge))?);

        Ok(Auth {
            mechanism,
            response,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::transport::smtp::response::Code;
    use std::str::FromStr;

    #[test]
    fn test_display() {
        let id = ClientId::Domain("localhost".to_owned());
        let email = Address::from_str("test@example.com").unwrap();
        assert_eq!(format!("{}", Ehlo::new(id)), "EHLO localhost\r\n");
        assert_eq!(format!("{}", Starttls), "STARTTLS\r\n");
        assert_eq!(
            format!("{}", Mail::new(Some(email.clone()), false)),
            "MAIL FROM:<test@example.com>\r\n"
        );
        assert_eq!(format!("{}", Mail::new(None, false)), "MAIL FROM:<>\r\n");
        assert_eq!(
            format!("{}", Mail::new(Some(email.clone()), true)),
            "MAIL FROM:<test@example.com> BODY=8BITMIME\r\n"
        );
        assert_eq!(
            format!("{}", Rcpt::new(email)),
            "RCPT TO:<test@example.com>\r\n"
        );
        assert_eq!(format!("{}", Data), "DATA\r\n");
        assert_eq!(format!("{}", Quit), "QUIT\r\n");

        let credentials = Credentials::new("user".to_owned(), "password".to_owned());
        assert_eq!(
            format!(
                "{}",
                Auth::new(Mechanism::Plain, credentials.clone(), None).unwrap()
            ),
            "AUTH PLAIN AHVzZXIAcGFzc3dvcmQ=\r\n"
        );
        assert_eq!(
            format!(
                "{}",
                Auth::new(Mechanism::Login, credentials, None).unwrap()
            ),
            "AUTH LOGIN\r\n"
        );
    }

    #[test]
    fn test_auth_challenge_response() {
        let credentials = Credentials::new("alice".to_owned(), "wonderland".to_owned());

        // "VXNlcm5hbWU6" is base64 for "Username:"
        let challenge = Response::new(Code::new(334).unwrap(), vec!["VXNlcm5hbWU6".to_owned()]);
        let auth =
            Auth::new_from_response(Mechanism::Login, credentials.clone(), &challenge).unwrap();
        assert_eq!(format!("{auth}"), "YWxpY2U=\r\n");

        let not_a_challenge = Response::new(Code::new(250).unwrap(), vec!["ok".to_owned()]);
        assert!(Auth::new_from_response(Mechanism::Login, credentials, &not_a_challenge).is_err());
    }
}
