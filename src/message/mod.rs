//! Provides a strongly typed way to build emails
//!
//! ## Usage
//!
//! ### Plain body
//!
//! The easiest way of creating a message, which uses a plain text body.
//!
//! ```rust
//! use missive::message::Message;
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let m = Message::builder()
//!     .from("NoBody <nobody@domain.tld>".parse()?)
//!     .to("Hei <hei@domain.tld>".parse()?)
//!     .subject("Happy new year")
//!     .body(String::from("Be happy!"))?;
//! # Ok(())
//! # }
//! ```
//!
//! Which produces:
//!
//! ```sh
//! From: NoBody <nobody@domain.tld>
//! To: Hei <hei@domain.tld>
//! Subject: Happy new year
//! Date: Sat, 12 Dec 2020 16:33:19 GMT
//! Content-Transfer-Encoding: 7bit
//!
//! Be happy!
//! ```
//!
//! Unicode header data is encoded using _UTF8-Base64_ encoding, when
//! necessary. The `Content-Transfer-Encoding` is chosen based on the best
//! encoding available for the given body, between `7bit`,
//! `quoted-printable` and `base64`.
//!
//! ### Body with attachments
//!
//! A `multipart/mixed` body combines the message text with file parts.
//!
//! ```rust
//! # use std::error::Error;
//! use missive::message::{Attachment, Message, MultiPart, SinglePart};
//!
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let m = Message::builder()
//!     .from("NoBody <nobody@domain.tld>".parse()?)
//!     .to("Hei <hei@domain.tld>".parse()?)
//!     .subject("Happy new year")
//!     .multipart(
//!         MultiPart::mixed()
//!             .singlepart(
//!                 SinglePart::builder()
//!                     .content_type(&mime::TEXT_PLAIN_UTF_8)
//!                     .body(String::from("Hello, world! :)")),
//!             )
//!             .singlepart(
//!                 Attachment::new(String::from("example.rs")).body(
//!                     String::from("fn main() { println!(\"Hello, World!\") }"),
//!                     mime::APPLICATION_OCTET_STREAM,
//!                 ),
//!             ),
//!     )?;
//! # Ok(())
//! # }
//! ```

pub use self::attachment::Attachment;
pub use self::body::{Body, ContentTransferEncoding, IntoBody, MaybeString};
pub use self::headers::{HeaderName, Headers};
pub use self::mailbox::{Mailbox, Mailboxes};
pub use self::mimebody::{MultiPart, MultiPartBuilder, Part, SinglePart, SinglePartBuilder};

pub use mime;

mod attachment;
mod body;
mod headers;
mod mailbox;
mod mimebody;
mod utf8_b;

use std::{io::Write, time::SystemTime};

use uuid::Uuid;

use crate::{address::Envelope, error::Error as EmailError};

const DEFAULT_MESSAGE_ID_DOMAIN: &str = "localhost";

/// Something that can be formatted as an email message
pub(crate) trait EmailFormat {
    fn format(&self, out: &mut Vec<u8>);
}

/// A builder for messages
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    from: Option<Mailbox>,
    to: Mailboxes,
    subject: Option<String>,
    date: Option<SystemTime>,
    message_id: Option<String>,
}

impl MessageBuilder {
    /// Creates a new default message builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `From` mailbox
    ///
    /// Defined in [RFC5322](https://tools.ietf.org/html/rfc5322#section-3.6.2).
    pub fn from(mut self, mbox: Mailbox) -> Self {
        self.from = Some(mbox);
        self
    }

    /// Add a mailbox to the `To` header
    pub fn to(mut self, mbox: Mailbox) -> Self {
        self.to.push(mbox);
        self
    }

    /// Set the `Subject` header to the message
    pub fn subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the `Date` header
    ///
    /// Defaults to the current date/time when not set.
    pub fn date(mut self, date: SystemTime) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the [Message-ID
    /// header](https://tools.ietf.org/html/rfc5322#section-3.6.4)
    ///
    /// Should generally be inserted by the mail relay. If `None` is
    /// provided, an id is generated in the `<UUID@HOSTNAME>` form.
    pub fn message_id(mut self, id: Option<String>) -> Self {
        match id {
            Some(id) => self.message_id = Some(id),
            None => {
                #[cfg(feature = "hostname")]
                let host = hostname::get()
                    .ok()
                    .and_then(|s| s.into_string().ok())
                    .unwrap_or_else(|| DEFAULT_MESSAGE_ID_DOMAIN.to_owned());
                #[cfg(not(feature = "hostname"))]
                let host = DEFAULT_MESSAGE_ID_DOMAIN.to_owned();

                self.message_id = Some(format!("<{}@{}>", Uuid::new_v4(), host));
            }
        }
        self
    }

    /// Create message from a body
    fn build(self, body: MessageBody) -> Result<Message, EmailError> {
        // https://tools.ietf.org/html/rfc5322#section-3.6
        let from = self.from.ok_or(EmailError::MissingFrom)?;

        let envelope = Envelope::new(
            Some(from.email.clone()),
            self.to.iter().map(|mbox| mbox.email.clone()).collect(),
        );

        let mut headers = Headers::new();
        headers.set("From", from.to_string());
        headers.set("To", self.to.to_string());
        if let Some(subject) = self.subject {
            headers.set("Subject", utf8_b::encode(&subject));
        }
        let date = self.date.unwrap_or_else(SystemTime::now);
        headers.set("Date", httpdate::fmt_http_date(date));
        if let Some(id) = self.message_id {
            headers.set("Message-ID", id);
        }
        match &body {
            MessageBody::Mime(_) => headers.set("MIME-Version", "1.0".to_owned()),
            MessageBody::Raw(raw) => {
                headers.set("Content-Transfer-Encoding", raw.encoding().to_string());
            }
        }

        Ok(Message {
            headers,
            body,
            envelope,
        })
    }

    /// Create a [`Message`] using a [`Vec<u8>`], [`String`], or [`Body`] body
    ///
    /// The body gets encoded with the `7bit`, `quoted-printable` or `base64`
    /// `Content-Transfer-Encoding` best matching its content.
    pub fn body<T: IntoBody>(self, body: T) -> Result<Message, EmailError> {
        self.build(MessageBody::Raw(body.into_body()))
    }

    /// Create a message using a mime body ([`MultiPart`])
    pub fn multipart(self, part: MultiPart) -> Result<Message, EmailError> {
        self.build(MessageBody::Mime(Part::Multi(part)))
    }

    /// Create a message using a mime body ([`SinglePart`])
    pub fn singlepart(self, part: SinglePart) -> Result<Message, EmailError> {
        self.build(MessageBody::Mime(Part::Single(part)))
    }
}

/// Email message which can be formatted
#[derive(Clone, Debug)]
pub struct Message {
    headers: Headers,
    body: MessageBody,
    envelope: Envelope,
}

#[derive(Clone, Debug)]
enum MessageBody {
    Mime(Part),
    Raw(Body),
}

impl Message {
    /// Create a new message builder without headers
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// Get the headers from the Message
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get the `Message` envelope
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Get message content formatted for SMTP
    pub fn formatted(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.format(&mut out);
        out
    }
}

impl EmailFormat for Message {
    fn format(&self, out: &mut Vec<u8>) {
        write!(out, "{}", self.headers)
            .expect("A Write implementation panicked while formatting headers");

        match &self.body {
            MessageBody::Mime(p) => p.format(out),
            MessageBody::Raw(r) => {
                out.extend_from_slice(b"\r\n");
                out.extend_from_slice(r.as_ref());
            }
        }
    }
}
