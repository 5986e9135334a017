//! The SMTP transport sends emails using the SMTP protocol.
//!
//! This SMTP client follows [RFC
//! 5321](https://tools.ietf.org/html/rfc5321), and is designed to efficiently
//! send emails from an application to a relay email server, as it relies as
//! much as possible on the relay server for sanity and RFC compliance checks.
//!
//! It implements the following extensions:
//!
//! * 8BITMIME ([RFC 6152](https://tools.ietf.org/html/rfc6152))
//! * AUTH ([RFC 4954](http://tools.ietf.org/html/rfc4954)) with PLAIN and
//!   LOGIN mechanisms
//! * STARTTLS ([RFC 2487](http://tools.ietf.org/html/rfc2487))
//!
//! This client is designed to send emails to a relay server, and should
//! *not* be used to send emails directly to the destination server.
//!
//! #### Simple example
//!
//! ```rust,no_run
//! use missive::{Message, SmtpTransport, Transport};
//! use missive::transport::smtp::authentication::Credentials;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let email = Message::builder()
//!     .from("NoBody <nobody@domain.tld>".parse()?)
//!     .to("Hei <hei@domain.tld>".parse()?)
//!     .subject("Happy new year")
//!     .body(String::from("Be happy!"))?;
//!
//! // Submission endpoint with mandatory STARTTLS
//! let mailer = SmtpTransport::starttls_relay("smtp.example.com")?
//!     .credentials(Credentials::new(
//!         "user".to_owned(),
//!         "password".to_owned(),
//!     ))
//!     .build();
//!
//! let result = mailer.send(&email);
//! assert!(result.is_ok());
//! # Ok(())
//! # }
//! ```

pub mod authentication;
pub mod client;
pub mod commands;
mod error;
pub mod extension;
pub mod response;

pub use self::error::Error;

use std::time::Duration;

#[cfg(feature = "native-tls")]
use self::client::TlsParameters;
use self::{
    authentication::{Credentials, Mechanism, DEFAULT_MECHANISMS},
    client::SmtpConnection,
    extension::ClientId,
    response::Response,
};
use crate::{address::Envelope, Transport};

// Registered port numbers:
// https://www.iana.org/assignments/service-names-port-numbers/service-names-port-numbers.xhtml

/// Default smtp port
pub const SMTP_PORT: u16 = 25;
/// Default submission port
pub const SUBMISSION_PORT: u16 = 587;

/// Default timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How to apply TLS to a client connection
#[derive(Clone)]
pub enum Tls {
    /// Insecure connection only (for testing and local relays)
    None,
    /// Start with an insecure connection and require `STARTTLS` before any
    /// credential is transmitted
    #[cfg(feature = "native-tls")]
    Required(TlsParameters),
}

impl std::fmt::Debug for Tls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.pad("None"),
            #[cfg(feature = "native-tls")]
            Self::Required(_) => f.pad("Required"),
        }
    }
}

/// Sends emails using the SMTP protocol
#[derive(Debug, Clone)]
pub struct SmtpTransport {
    inner: SmtpClient,
}

impl Transport for SmtpTransport {
    type Ok = Response;
    type Error = Error;

    /// Sends an email
    ///
    /// A connection is opened, used for this one message and closed again,
    /// whatever the outcome.
    fn send_raw(&self, envelope: &Envelope, email: &[u8]) -> Result<Self::Ok, Self::Error> {
        let mut conn = self.inner.connection()?;

        let result = conn.send(envelope, email)?;
        conn.quit()?;

        Ok(result)
    }
}

impl SmtpTransport {
    /// Simple and secure transport, using STARTTLS to obtain encrypted
    /// connections
    ///
    /// Creates an encrypted transport over the submission port, by first
    /// connecting using an unencrypted connection and then upgrading it with
    /// STARTTLS. The provided domain is used to validate TLS certificates.
    ///
    /// An error is returned if the connection can't be upgraded. No
    /// credentials or emails will be sent to the server, protecting from
    /// downgrade attacks.
    #[cfg(feature = "native-tls")]
    pub fn starttls_relay(relay: &str) -> Result<SmtpTransportBuilder, Error> {
        let tls_parameters = TlsParameters::new(relay.into())?;

        Ok(Self::builder(relay).tls(Tls::Required(tls_parameters)))
    }

    /// Creates a new SMTP client builder
    ///
    /// Defaults are:
    ///
    /// * No authentication
    /// * No TLS
    /// * Port 587
    /// * A 60-seconds timeout for smtp commands
    ///
    /// Consider using [`SmtpTransport::starttls_relay`] instead, if possible.
    pub fn builder<T: Into<String>>(server: T) -> SmtpTransportBuilder {
        SmtpTransportBuilder::new(server)
    }
}

/// Contains client configuration
#[derive(Debug, Clone)]
struct SmtpInfo {
    /// Name sent during EHLO
    hello_name: ClientId,
    /// Server we are connecting to
    server: String,
    /// Port to connect to
    port: u16,
    /// TLS security configuration
    tls: Tls,
    /// Accepted authentication mechanisms
    authentication: Vec<Mechanism>,
    /// Credentials
    credentials: Option<Credentials>,
    /// Define network timeout
    timeout: Option<Duration>,
}

impl Default for SmtpInfo {
    fn default() -> Self {
        Self {
            server: "localhost".to_owned(),
            port: SUBMISSION_PORT,
            hello_name: ClientId::default(),
            credentials: None,
            authentication: DEFAULT_MECHANISMS.into(),
            timeout: Some(DEFAULT_TIMEOUT),
            tls: Tls::None,
        }
    }
}

/// Builder for the SMTP [`SmtpTransport`]
#[derive(Debug, Clone)]
pub struct SmtpTransportBuilder {
    info: SmtpInfo,
}

impl SmtpTransportBuilder {
    fn new<T: Into<String>>(server: T) -> Self {
        let info = SmtpInfo {
            server: server.into(),
            ..Default::default()
        };

        Self { info }
    }

    /// Set the name used during EHLO
    pub fn hello_name(mut self, name: ClientId) -> Self {
        self.info.hello_name = name;
        self
    }

    /// Set the credentials used for authentication
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.info.credentials = Some(credentials);
        self
    }

    /// Set the authentication mechanisms to use
    pub fn authentication(mut self, mechanisms: Vec<Mechanism>) -> Self {
        self.info.authentication = mechanisms;
        self
    }

    /// Set the timeout duration
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.info.timeout = timeout;
        self
    }

    /// Set the port to use
    pub fn port(mut self, port: u16) -> Self {
        self.info.port = port;
        self
    }

    /// Set the TLS settings to use
    #[cfg(feature = "native-tls")]
    pub fn tls(mut self, tls: Tls) -> Self {
        self.info.tls = tls;
        self
    }

    /// Build the transport
    pub fn build(self) -> SmtpTransport {
        SmtpTransport {
            inner: SmtpClient { info: self.info },
        }
    }
}

/// Build client
#[derive(Debug, Clone)]
struct SmtpClient {
    info: SmtpInfo,
}

impl SmtpClient {
    /// Creates a new connection directly usable to send emails
    ///
    /// Handles encryption and authentication. On any failure the partially
    /// established connection is torn down before the error is returned.
    fn connection(&self) -> Result<SmtpConnection, Error> {
        let mut conn = SmtpConnection::connect(
            (self.info.server.as_ref(), self.info.port),
            self.info.timeout,
            &self.info.hello_name,
        )?;

        #[cfg(feature = "native-tls")]
        if let Tls::Required(tls_parameters) = &self.info.tls {
            conn.starttls(tls_parameters, &self.info.hello_name)?;
        }

        if let Some(credentials) = &self.info.credentials {
            conn.auth(&self.info.authentication, credentials)?;
        }

        Ok(conn)
    }
}

#[cfg(test)]
mod test {
    use super::{SmtpTransport, Tls, SUBMISSION_PORT};

    #[test]
    fn builder_defaults() {
        let builder = SmtpTransport::builder("smtp.example.com");

        assert_eq!(builder.info.server, "smtp.example.com");
        assert_eq!(builder.info.port, SUBMISSION_PORT);
        assert!(builder.info.credentials.is_none());
        assert!(matches!(builder.info.tls, Tls::None));
    }

    #[cfg(feature = "native-tls")]
    #[test]
    fn starttls_relay_requires_tls() {
        use crate::transport::smtp::authentication::Credentials;

        let builder = SmtpTransport::starttls_relay("smtp.example.com")
            .unwrap()
            .credentials(Credentials::new("user".to_owned(), "secret".to_owned()));

        assert!(matches!(builder.info.tls, Tls::Required(_)));
        assert_eq!(builder.info.port, SUBMISSION_PORT);
        assert!(builder.info.credentials.is_some());
    }
}
