//! The underlying network stream of an SMTP connection

use std::fmt::{self, Debug, Formatter};
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

#[cfg(feature = "native-tls")]
use native_tls::{Protocol, TlsConnector, TlsStream};

use super::mock::MockStream;
use crate::transport::smtp::error::{self, Error};

/// Parameters to use for secure clients
#[cfg(feature = "native-tls")]
#[derive(Clone)]
pub struct TlsParameters {
    connector: TlsConnector,
    /// The domain name expected in the TLS certificate of the server
    domain: String,
}

#[cfg(feature = "native-tls")]
impl TlsParameters {
    /// Creates `TlsParameters` for the given server domain
    ///
    /// TLS 1.2 is the accepted floor, as in rustls defaults.
    pub fn new(domain: String) -> Result<Self, Error> {
        let mut builder = TlsConnector::builder();
        builder.min_protocol_version(Some(Protocol::Tlsv12));
        let connector = builder.build().map_err(error::tls)?;
        Ok(Self { connector, domain })
    }

    /// The domain name which is expected in the TLS certificate
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

#[cfg(feature = "native-tls")]
impl Debug for TlsParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsParameters")
            .field("domain", &self.domain)
            .finish()
    }
}

/// Represents the different types of underlying network streams
pub enum NetworkStream {
    /// Plain TCP stream
    Tcp(TcpStream),
    /// Encrypted TCP stream
    #[cfg(feature = "native-tls")]
    Tls(Box<TlsStream<TcpStream>>),
    /// Mock stream, for tests
    Mock(MockStream),
}

impl Debug for NetworkStream {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NetworkStream::Tcp(_) => "NetworkStream::Tcp(..)",
            #[cfg(feature = "native-tls")]
            NetworkStream::Tls(_) => "NetworkStream::Tls(..)",
            NetworkStream::Mock(_) => "NetworkStream::Mock(..)",
        })
    }
}

impl NetworkStream {
    /// Opens a TCP connection to the given server
    ///
    /// Every resolved address is tried before giving up.
    pub fn connect<A: ToSocketAddrs>(
        server: A,
        timeout: Option<Duration>,
    ) -> Result<NetworkStream, Error> {
        fn try_connect(addr: &SocketAddr, timeout: Option<Duration>) -> io::Result<TcpStream> {
            match timeout {
                Some(timeout) => TcpStream::connect_timeout(addr, timeout),
                None => TcpStream::connect(addr),
            }
        }

        let mut last_err = None;
        for addr in server.to_socket_addrs().map_err(error::connection)? {
            match try_connect(&addr, timeout) {
                Ok(stream) => return Ok(NetworkStream::Tcp(stream)),
                Err(err) => last_err = Some(err),
            }
        }

        Err(match last_err {
            Some(err) => error::connection(err),
            None => error::connection("could not resolve to any address"),
        })
    }

    /// Upgrades to a TLS connection
    #[cfg(feature = "native-tls")]
    pub fn upgrade_tls(&mut self, tls_parameters: &TlsParameters) -> Result<(), Error> {
        match self {
            NetworkStream::Tcp(stream) => {
                let tcp_stream = stream.try_clone().map_err(error::network)?;
                let tls_stream = tls_parameters
                    .connector
                    .connect(&tls_parameters.domain, tcp_stream)
                    .map_err(|err| error::tls(err.to_string()))?;
                *self = NetworkStream::Tls(Box::new(tls_stream));
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Is the stream encrypted
    pub fn is_encrypted(&self) -> bool {
        match self {
            NetworkStream::Tcp(_) => false,
            #[cfg(feature = "native-tls")]
            NetworkStream::Tls(_) => true,
            NetworkStream::Mock(_) => false,
        }
    }

    /// Shuts down the connection
    pub fn shutdown(&self, how: Shutdown) -> io::Result<()> {
        match self {
            NetworkStream::Tcp(stream) => stream.shutdown(how),
            #[cfg(feature = "native-tls")]
            NetworkStream::Tls(stream) => stream.get_ref().shutdown(how),
            NetworkStream::Mock(_) => Ok(()),
        }
    }

    /// Set read timeout for IO calls
    pub fn set_read_timeout(&mut self, duration: Option<Duration>) -> io::Result<()> {
        match self {
            NetworkStream::Tcp(stream) => stream.set_read_timeout(duration),
            #[cfg(feature = "native-tls")]
            NetworkStream::Tls(stream) => stream.get_ref().set_read_timeout(duration),
            NetworkStream::Mock(_) => Ok(()),
        }
    }

    /// Set write timeout for IO calls
    pub fn set_write_timeout(&mut self, duration: Option<Duration>) -> io::Result<()> {
        match self {
            NetworkStream::Tcp(stream) => stream.set_write_timeout(duration),
            #[cfg(feature = "native-tls")]
            NetworkStream::Tls(stream) => stream.get_ref().set_write_timeout(duration),
            NetworkStream::Mock(_) => Ok(()),
        }
    }
}

impl Read for NetworkStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            NetworkStream::Tcp(stream) => stream.read(buf),
            #[cfg(feature = "native-tls")]
            NetworkStream::Tls(stream) => stream.read(buf),
            NetworkStream::Mock(stream) => stream.read(buf),
        }
    }
}

impl Write for NetworkStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            NetworkStream::Tcp(stream) => stream.write(buf),
            #[cfg(feature = "native-tls")]
            NetworkStream::Tls(stream) => stream.write(buf),
            NetworkStream::Mock(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            NetworkStream::Tcp(stream) => stream.flush(),
            #[cfg(feature = "native-tls")]
            NetworkStream::Tls(stream) => stream.flush(),
            NetworkStream::Mock(stream) => stream.flush(),
        }
    }
}
