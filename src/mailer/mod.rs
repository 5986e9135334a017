//! High-level mail sending
//!
//! The [`Mailer`] ties the message builder and the SMTP transport together:
//! it resolves credentials once at construction, composes a
//! `multipart/mixed` message per send and submits it over a
//! STARTTLS-upgraded connection.
//!
//! ```rust,no_run
//! use missive::Mailer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Credentials can also come from the MISSIVE_ADDRESS / MISSIVE_SECRET
//! // environment variables, or from any custom `ConfigProvider`.
//! let mailer = Mailer::builder()
//!     .credentials("sender@example.com", "app-password")
//!     .build()?;
//!
//! mailer.send(
//!     &["recipient@example.com"],
//!     "Monthly report",
//!     "Please find the attached file.",
//!     false,
//!     &[std::path::Path::new("report.pdf")],
//! )?;
//! # Ok(())
//! # }
//! ```

mod config;

pub use self::config::{ConfigProvider, EnvProvider, ADDRESS_VAR, SECRET_VAR};

use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
    fs,
    path::Path,
    time::Duration,
};

use crate::address::AddressError;
use crate::error::Error as MessageError;
use crate::message::{Attachment, Mailbox, Message, MultiPart, SinglePart};
use crate::transport::smtp::authentication::Credentials;
#[cfg(feature = "native-tls")]
use crate::transport::smtp::SmtpTransport;
use crate::transport::Transport;
use crate::BoxError;

/// The submission endpoint used when none is configured
pub const DEFAULT_RELAY: &str = "smtp.gmail.com";

/// The errors that may occur when building or using a [`Mailer`]
#[derive(Debug)]
pub enum Error {
    /// Credential resolution failed at construction
    Credentials(String),
    /// A sender or recipient mailbox could not be parsed
    Address(AddressError),
    /// The message could not be assembled
    Message(MessageError),
    /// The transport could not hand the message to the relay
    Transport(BoxError),
}

impl Error {
    /// Returns true if the relay rejected the authentication exchange
    pub fn is_auth(&self) -> bool {
        self.as_smtp().is_some_and(|e| e.is_auth())
    }

    /// Returns true if the relay could not be reached
    pub fn is_connection(&self) -> bool {
        self.as_smtp().is_some_and(|e| e.is_connection())
    }

    /// Returns true if the relay reported a transient (4xx) condition
    ///
    /// Sending again later may succeed; any other failure is fatal for
    /// this message.
    pub fn is_transient(&self) -> bool {
        self.as_smtp().is_some_and(|e| e.is_transient())
    }

    /// Returns true if the transport timed out
    pub fn is_timeout(&self) -> bool {
        self.as_smtp().is_some_and(|e| e.is_timeout())
    }

    fn as_smtp(&self) -> Option<&crate::transport::smtp::Error> {
        match self {
            Error::Transport(e) => e.downcast_ref(),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Credentials(msg) => write!(f, "credential resolution failed: {msg}"),
            Error::Address(e) => e.fmt(f),
            Error::Message(e) => e.fmt(f),
            Error::Transport(e) => e.fmt(f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Credentials(_) => None,
            Error::Address(e) => Some(e),
            Error::Message(e) => Some(e),
            Error::Transport(e) => Some(&**e),
        }
    }
}

impl From<AddressError> for Error {
    fn from(err: AddressError) -> Self {
        Error::Address(err)
    }
}

impl From<MessageError> for Error {
    fn from(err: MessageError) -> Self {
        Error::Message(err)
    }
}

/// Builder for a [`Mailer`]
///
/// Credentials may be given explicitly; anything left unset is resolved
/// through the configured [`ConfigProvider`] (the process environment by
/// default). Both fields must be non-empty after resolution, or
/// [`build`][MailerBuilder::build] fails.
pub struct MailerBuilder {
    address: Option<String>,
    secret: Option<String>,
    relay: String,
    port: u16,
    timeout: Option<Duration>,
    provider: Box<dyn ConfigProvider>,
}

impl Default for MailerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MailerBuilder {
    /// Creates a builder with the default relay settings
    pub fn new() -> Self {
        Self {
            address: None,
            secret: None,
            relay: DEFAULT_RELAY.to_owned(),
            port: crate::transport::smtp::SUBMISSION_PORT,
            timeout: Some(crate::transport::smtp::DEFAULT_TIMEOUT),
            provider: Box::new(EnvProvider),
        }
    }

    /// Set the sender address and its authentication secret
    pub fn credentials<A: Into<String>, S: Into<String>>(mut self, address: A, secret: S) -> Self {
        self.address = Some(address.into());
        self.secret = Some(secret.into());
        self
    }

    /// Set the configuration provider used for unset fields
    pub fn config<P: ConfigProvider + 'static>(mut self, provider: P) -> Self {
        self.provider = Box::new(provider);
        self
    }

    /// Set the relay host to submit mail through
    pub fn relay<R: Into<String>>(mut self, relay: R) -> Self {
        self.relay = relay.into();
        self
    }

    /// Set the relay port
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the network timeout, `None` disabling it
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the credential pair, failing fast when a field stays empty
    fn resolve_credentials(&self) -> Result<(Mailbox, Credentials), Error> {
        let address = self
            .address
            .clone()
            .or_else(|| self.provider.get(ADDRESS_VAR))
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                Error::Credentials(format!(
                    "sender address is empty: pass it explicitly or set {ADDRESS_VAR}"
                ))
            })?;
        let secret = self
            .secret
            .clone()
            .or_else(|| self.provider.get(SECRET_VAR))
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                Error::Credentials(format!(
                    "authentication secret is empty: pass it explicitly or set {SECRET_VAR}"
                ))
            })?;

        let email = address.parse()?;
        Ok((
            Mailbox::new(None, email),
            Credentials::new(address, secret),
        ))
    }

    /// Build a [`Mailer`] submitting through an SMTP STARTTLS transport
    #[cfg(feature = "native-tls")]
    pub fn build(self) -> Result<Mailer, Error> {
        let (sender, credentials) = self.resolve_credentials()?;

        let transport = SmtpTransport::starttls_relay(&self.relay)
            .map_err(|e| Error::Transport(Box::new(e)))?
            .port(self.port)
            .timeout(self.timeout)
            .credentials(credentials)
            .build();

        Ok(Mailer { sender, transport })
    }

    /// Build a [`Mailer`] around any [`Transport`]
    ///
    /// Mostly useful for tests, with the
    /// [stub transport][crate::transport::stub::StubTransport].
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<Mailer<T>, Error> {
        let (sender, _credentials) = self.resolve_credentials()?;
        Ok(Mailer { sender, transport })
    }
}

impl fmt::Debug for MailerBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailerBuilder")
            .field("address", &self.address)
            .field("relay", &self.relay)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Composes messages for one sender and submits them through a transport
///
/// Credentials are resolved once, when the mailer is built, and reused for
/// every send. Each send opens its own connection.
#[cfg(feature = "native-tls")]
#[derive(Debug, Clone)]
pub struct Mailer<T = SmtpTransport> {
    sender: Mailbox,
    transport: T,
}

/// Composes messages for one sender and submits them through a transport
#[cfg(not(feature = "native-tls"))]
#[derive(Debug, Clone)]
pub struct Mailer<T> {
    sender: Mailbox,
    transport: T,
}

#[cfg(feature = "native-tls")]
impl Mailer {
    /// Creates a builder with the default relay settings
    pub fn builder() -> MailerBuilder {
        MailerBuilder::new()
    }
}

impl<T: Transport> Mailer<T> {
    /// The sender mailbox used in the `From` header
    pub fn sender(&self) -> &Mailbox {
        &self.sender
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Composes a message without sending it
    ///
    /// The body becomes a `text/plain` or `text/html` part depending on
    /// `is_html`; recipients are joined into the `To` header. Attachment
    /// paths that do not exist are skipped, matching the usual
    /// fire-and-forget semantics of upload forms; existing files that fail
    /// to read are an error.
    pub fn compose(
        &self,
        recipients: &[&str],
        subject: &str,
        body: &str,
        is_html: bool,
        attachment_paths: &[&Path],
    ) -> Result<Message, Error> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .subject(subject);
        for recipient in recipients {
            builder = builder.to(recipient.parse()?);
        }

        let content_type = if is_html {
            mime::TEXT_HTML_UTF_8
        } else {
            mime::TEXT_PLAIN_UTF_8
        };
        let mut multipart = MultiPart::mixed().singlepart(
            SinglePart::builder()
                .content_type(&content_type)
                .body(body.to_owned()),
        );

        for path in attachment_paths {
            if !path.exists() {
                continue;
            }
            let filename = match path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => continue,
            };
            let content = fs::read(path).map_err(MessageError::Io)?;
            multipart = multipart.singlepart(
                Attachment::new(filename).body(content, mime::APPLICATION_OCTET_STREAM),
            );
        }

        Ok(builder.multipart(multipart)?)
    }
}

impl<T: Transport> Mailer<T>
where
    T::Error: Into<BoxError>,
{
    /// Composes a message and submits it through the transport
    ///
    /// The connection is opened for this message and closed again on every
    /// outcome.
    pub fn send(
        &self,
        recipients: &[&str],
        subject: &str,
        body: &str,
        is_html: bool,
        attachment_paths: &[&Path],
    ) -> Result<(), Error> {
        let message = self.compose(recipients, subject, body, is_html, attachment_paths)?;
        self.transport
            .send(&message)
            .map_err(|e| Error::Transport(e.into()))?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::{Error, Mailer, ADDRESS_VAR, SECRET_VAR};
    use crate::transport::stub::StubTransport;

    fn provider(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn explicit_credentials() {
        let mailer = Mailer::builder()
            .credentials("user@example.com", "secret")
            .build_with_transport(StubTransport::new_ok())
            .unwrap();

        assert_eq!(mailer.sender().to_string(), "user@example.com");
    }

    #[test]
    fn provider_credentials() {
        let mailer = Mailer::builder()
            .config(provider(&[
                (ADDRESS_VAR, "user@example.com"),
                (SECRET_VAR, "secret"),
            ]))
            .build_with_transport(StubTransport::new_ok())
            .unwrap();

        assert_eq!(mailer.sender().to_string(), "user@example.com");
    }

    #[test]
    fn missing_credentials_fail_fast() {
        let err = Mailer::builder()
            .config(provider(&[]))
            .build_with_transport(StubTransport::new_ok())
            .unwrap_err();
        assert!(matches!(err, Error::Credentials(_)));

        let err = Mailer::builder()
            .credentials("user@example.com", "")
            .config(provider(&[]))
            .build_with_transport(StubTransport::new_ok())
            .unwrap_err();
        assert!(matches!(err, Error::Credentials(_)));
        assert!(err.to_string().contains(SECRET_VAR));
    }

    #[test]
    fn invalid_sender_address() {
        let err = Mailer::builder()
            .credentials("not-an-address", "secret")
            .build_with_transport(StubTransport::new_ok())
            .unwrap_err();
        assert!(matches!(err, Error::Address(_)));
    }

    #[test]
    fn invalid_recipient_address() {
        let mailer = Mailer::builder()
            .credentials("user@example.com", "secret")
            .build_with_transport(StubTransport::new_ok())
            .unwrap();

        let err = mailer
            .compose(&["not-an-address"], "subject", "body", false, &[])
            .unwrap_err();
        assert!(matches!(err, Error::Address(_)));
    }
}
