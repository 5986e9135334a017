//! SMTP client

pub mod mock;
pub mod net;

#[cfg(feature = "native-tls")]
pub use self::net::TlsParameters;
pub use self::net::NetworkStream;

use std::{
    fmt::Display,
    io::{self, BufRead, BufReader, Write},
    net::{Shutdown, ToSocketAddrs},
    time::Duration,
};

use crate::address::Envelope;
#[cfg(feature = "native-tls")]
use crate::transport::smtp::commands::Starttls;
use crate::transport::smtp::{
    authentication::{Credentials, Mechanism},
    commands::{Auth, Data, Ehlo, Mail, Quit, Rcpt},
    error::{self, Error},
    extension::{ClientId, Extension, ServerInfo},
    response::{parse_response, Response},
};

/// The codec used for data transparency
///
/// Lines of the message starting with a dot get it doubled, so the server
/// does not mistake them for the end-of-data marker.
#[derive(Default, Clone, Copy, Debug)]
pub struct ClientCodec {
    escape_count: u8,
}

impl ClientCodec {
    /// Creates a new client codec
    pub fn new() -> Self {
        ClientCodec::default()
    }

    /// Adds transparency
    fn encode(&mut self, frame: &[u8], buf: &mut Vec<u8>) {
        match frame.len() {
            0 => {
                match self.escape_count {
                    0 => buf.extend_from_slice(b"\r\n.\r\n"),
                    1 => buf.extend_from_slice(b"\n.\r\n"),
                    2 => buf.extend_from_slice(b".\r\n"),
                    _ => unreachable!(),
                }
                self.escape_count = 0;
            }
            _ => {
                let mut start = 0;
                for (idx, byte) in frame.iter().enumerate() {
                    match self.escape_count {
                        0 => self.escape_count = u8::from(*byte == b'\r'),
                        1 => self.escape_count = if *byte == b'\n' { 2 } else { 0 },
                        2 => self.escape_count = if *byte == b'.' { 3 } else { 0 },
                        _ => unreachable!(),
                    }
                    if self.escape_count == 3 {
                        self.escape_count = 0;
                        buf.extend_from_slice(&frame[start..idx]);
                        buf.extend_from_slice(b".");
                        start = idx;
                    }
                }
                buf.extend_from_slice(&frame[start..]);
            }
        }
    }
}

/// Returns the string replacing all the CRLF with "\<CRLF\>"
///
/// Used for debug displays
#[cfg(feature = "tracing")]
fn escape_crlf(string: &str) -> String {
    string.replace("\r\n", "<CRLF>")
}

macro_rules! try_smtp (
    ($err: expr, $client: ident) => ({
        match $err {
            Ok(val) => val,
            Err(err) => {
                $client.abort();
                return Err(err);
            },
        }
    })
);

/// Structure that implements the SMTP client
pub struct SmtpConnection {
    /// TCP stream between client and server
    stream: BufReader<NetworkStream>,
    /// Panic state
    panic: bool,
    /// Information about the server
    server_info: ServerInfo,
}

impl SmtpConnection {
    /// Get information about the server
    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// Connects to the configured server
    ///
    /// Sends EHLO and parses the server information
    pub fn connect<A: ToSocketAddrs>(
        server: A,
        timeout: Option<Duration>,
        hello_name: &ClientId,
    ) -> Result<SmtpConnection, Error> {
        let stream = NetworkStream::connect(server, timeout)?;
        Self::setup(stream, timeout, hello_name)
    }

    fn setup(
        stream: NetworkStream,
        timeout: Option<Duration>,
        hello_name: &ClientId,
    ) -> Result<SmtpConnection, Error> {
        let mut conn = SmtpConnection {
            stream: BufReader::new(stream),
            panic: false,
            server_info: ServerInfo::default(),
        };
        conn.set_timeout(timeout).map_err(error::network)?;
        let _banner = conn.read_response()?;

        conn.ehlo(hello_name)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("server {}", conn.server_info);
        Ok(conn)
    }

    /// Sends an email through an established connection
    pub fn send(&mut self, envelope: &Envelope, email: &[u8]) -> Result<Response, Error> {
        if envelope.to().is_empty() {
            return Err(error::client("envelope contains no recipients"));
        }

        // 8BITMIME: https://tools.ietf.org/html/rfc6152
        let eight_bit_mime = !email.is_ascii();
        if eight_bit_mime && !self.server_info.supports_feature(Extension::EightBitMime) {
            return Err(error::client(
                "message contains non-ascii content but the server does not support 8BITMIME",
            ));
        }

        try_smtp!(
            self.command(Mail::new(envelope.from().cloned(), eight_bit_mime)),
            self
        );

        for to_address in envelope.to() {
            try_smtp!(self.command(Rcpt::new(to_address.clone())), self);
        }

        try_smtp!(self.command(Data), self);

        let result = try_smtp!(self.message(email), self);
        Ok(result)
    }

    /// Whether the connection encountered a protocol failure
    pub fn has_broken(&self) -> bool {
        self.panic
    }

    /// Whether the server announced STARTTLS on a still-plaintext connection
    pub fn can_starttls(&self) -> bool {
        !self.is_encrypted() && self.server_info.supports_feature(Extension::StartTls)
    }

    /// Upgrades the connection with STARTTLS and sends EHLO again
    #[cfg(feature = "native-tls")]
    pub fn starttls(
        &mut self,
        tls_parameters: &TlsParameters,
        hello_name: &ClientId,
    ) -> Result<(), Error> {
        if !self.server_info.supports_feature(Extension::StartTls) {
            return Err(error::client("STARTTLS is not supported on this server"));
        }

        try_smtp!(self.command(Starttls), self);
        try_smtp!(self.stream.get_mut().upgrade_tls(tls_parameters), self);
        #[cfg(feature = "tracing")]
        tracing::debug!("connection encrypted");

        // The server state is reset by the TLS handshake
        try_smtp!(self.ehlo(hello_name), self);
        Ok(())
    }

    /// Send EHLO and update server info
    fn ehlo(&mut self, hello_name: &ClientId) -> Result<(), Error> {
        let ehlo_response = try_smtp!(self.command(Ehlo::new(hello_name.clone())), self);
        self.server_info = try_smtp!(ServerInfo::from_response(&ehlo_response), self);
        Ok(())
    }

    /// Closes the SMTP transaction
    pub fn quit(&mut self) -> Result<Response, Error> {
        Ok(try_smtp!(self.command(Quit), self))
    }

    /// Tears the connection down, trying to QUIT first
    ///
    /// The underlying socket is closed on every path.
    pub fn abort(&mut self) {
        // Only try to quit if we are not already broken
        if !self.panic {
            self.panic = true;
            let _ = self.command(Quit);
        }
        let _ = self.stream.get_ref().shutdown(Shutdown::Both);
    }

    /// Tells if the underlying stream is currently encrypted
    pub fn is_encrypted(&self) -> bool {
        self.stream.get_ref().is_encrypted()
    }

    /// Set the read and write timeout
    pub fn set_timeout(&mut self, duration: Option<Duration>) -> io::Result<()> {
        self.stream.get_mut().set_read_timeout(duration)?;
        self.stream.get_mut().set_write_timeout(duration)
    }

    /// Sends an AUTH command with the given mechanism, and handles the
    /// challenge if needed
    pub fn auth(
        &mut self,
        mechanisms: &[Mechanism],
        credentials: &Credentials,
    ) -> Result<Response, Error> {
        let mechanism = self
            .server_info
            .get_auth_mechanism(mechanisms)
            .ok_or_else(|| error::auth("No compatible authentication mechanism was found"))?;

        // Limit challenges to avoid blocking
        let mut challenges = 10;
        let mut response = try_smtp!(
            self.command(Auth::new(mechanism, credentials.clone(), None)?)
                .map_err(error::into_auth),
            self
        );

        while challenges > 0 && response.has_code(334) {
            challenges -= 1;
            response = try_smtp!(
                self.command(Auth::new_from_response(
                    mechanism,
                    credentials.clone(),
                    &response,
                )?)
                .map_err(error::into_auth),
                self
            );
        }

        if challenges == 0 {
            Err(error::response("Unexpected number of challenges"))
        } else {
            Ok(response)
        }
    }

    /// Sends the message content
    pub fn message(&mut self, message: &[u8]) -> Result<Response, Error> {
        let mut out_buf: Vec<u8> = vec![];
        let mut codec = ClientCodec::new();
        codec.encode(message, &mut out_buf);
        self.write(out_buf.as_slice())?;
        self.write(b"\r\n.\r\n")?;
        self.read_response()
    }

    /// Sends an SMTP command
    pub fn command<C: Display>(&mut self, command: C) -> Result<Response, Error> {
        self.write(command.to_string().as_bytes())?;
        self.read_response()
    }

    /// Writes a string to the server
    fn write(&mut self, string: &[u8]) -> Result<(), Error> {
        self.stream
            .get_mut()
            .write_all(string)
            .map_err(error::network)?;
        self.stream.get_mut().flush().map_err(error::network)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Wrote: {}", escape_crlf(&String::from_utf8_lossy(string)));
        Ok(())
    }

    /// Gets the SMTP response
    pub fn read_response(&mut self) -> Result<Response, Error> {
        let mut buffer = String::with_capacity(100);

        while self
            .stream
            .read_line(&mut buffer)
            .map_err(error::network)?
            > 0
        {
            #[cfg(feature = "tracing")]
            tracing::debug!("<< {}", escape_crlf(&buffer));
            match parse_response(&buffer) {
                Ok((_remaining, response)) => {
                    return if response.is_positive() {
                        Ok(response)
                    } else {
                        Err(error::code(
                            response.code(),
                            Some(response.message().collect::<Vec<_>>().join("; ")),
                        ))
                    };
                }
                Err(nom::Err::Incomplete(_)) => { /* read more */ }
                Err(nom::Err::Failure(e)) => {
                    self.panic = true;
                    return Err(error::response(e.to_string()));
                }
                Err(nom::Err::Error(e)) => {
                    self.panic = true;
                    return Err(error::response(e.to_string()));
                }
            }
        }

        Err(error::response("incomplete response"))
    }
}
