//! missive is a mail composition and SMTP submission library for Rust.
//!
//! It provides a typed builder for RFC 5322 messages (plain text or HTML
//! bodies, file attachments) and a blocking SMTP client that submits them to
//! a relay over a STARTTLS-upgraded connection with password authentication.
//!
//! ## Features
//!
//! * **native-tls** *(default)*: STARTTLS support through the platform TLS
//!   library
//! * **hostname** *(default)*: use the local hostname in `EHLO` and generated
//!   `Message-ID`s
//! * **tracing**: log the SMTP conversation with [tracing]
//!
//! ## Example
//!
//! The [`Mailer`] ties composition and submission together. Credentials can
//! be passed explicitly or resolved from a [configuration
//! provider][mailer::ConfigProvider] (process environment variables by
//! default):
//!
//! ```rust,no_run
//! use missive::Mailer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mailer = Mailer::builder()
//!     .credentials("sender@example.com", "app-password")
//!     .relay("smtp.example.com")
//!     .build()?;
//!
//! mailer.send(
//!     &["recipient@example.com"],
//!     "Greetings",
//!     "Hello from missive!",
//!     false,
//!     &[],
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! Messages and transports can also be used on their own:
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
//! let mailer = SmtpTransport::starttls_relay("smtp.example.com")?
//!     .credentials(Credentials::new(
//!         "sender@example.com".to_owned(),
//!         "app-password".to_owned(),
//!     ))
//!     .build();
//!
//! mailer.send(&email)?;
//! # Ok(())
//! # }
//! ```
//!
//! [tracing]: https://docs.rs/tracing

#![doc(html_root_url = "https://docs.rs/missive/0.1.0")]
#![forbid(unsafe_code)]

pub mod address;
pub mod error;
pub mod mailer;
pub mod message;
pub mod transport;

pub use crate::address::Address;
pub use crate::mailer::Mailer;
pub use crate::message::Message;
pub use crate::transport::smtp::SmtpTransport;
pub use crate::transport::Transport;

/// Type-erased error cause carried by the error types of this crate
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
