use std::{
    fmt::{self, Display, Formatter},
    ops::Deref,
};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// The longest line a `7bit` body may contain
const SEVEN_BIT_MAX_LINE: usize = 78;

/// Base64 bodies are wrapped at this column
const BASE64_LINE: usize = 76;

/// `Content-Transfer-Encoding` of a message or part body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTransferEncoding {
    /// Short ASCII content, transmitted as-is
    SevenBit,
    /// Text content with non-ASCII characters or long lines
    QuotedPrintable,
    /// Arbitrary binary content
    Base64,
}

impl Display for ContentTransferEncoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContentTransferEncoding::SevenBit => "7bit",
            ContentTransferEncoding::QuotedPrintable => "quoted-printable",
            ContentTransferEncoding::Base64 => "base64",
        })
    }
}

/// A [`Message`][super::Message] or [`SinglePart`][super::SinglePart] body
/// that has already been encoded.
#[derive(Debug, Clone)]
pub struct Body {
    buf: Vec<u8>,
    encoding: ContentTransferEncoding,
}

/// Either a `Vec<u8>` or a `String`.
///
/// If the content is valid utf-8 a `String` should be passed, as it
/// makes for a more efficient `Content-Transfer-Encoding` to be chosen.
#[derive(Debug, Clone)]
pub enum MaybeString {
    /// Binary data
    Binary(Vec<u8>),
    /// UTF-8 string
    String(String),
}

impl Body {
    /// Encode the supplied `buf`, making it ready to be sent as a body.
    ///
    /// Takes a `Vec<u8>` or a `String`.
    ///
    /// Automatically chooses the most efficient encoding between
    /// `7bit`, `quoted-printable` and `base64`.
    ///
    /// If `String` is passed, line endings are converted to `CRLF`.
    pub fn new<B: Into<MaybeString>>(buf: B) -> Self {
        let buf: MaybeString = buf.into();

        let encoding = buf.encoding();
        let buf = match buf {
            MaybeString::String(s) => normalize_crlf(&s).into_bytes(),
            MaybeString::Binary(b) => b,
        };

        match encoding {
            ContentTransferEncoding::SevenBit => Self { buf, encoding },
            ContentTransferEncoding::QuotedPrintable => Self {
                buf: quoted_printable::encode(buf),
                encoding,
            },
            ContentTransferEncoding::Base64 => Self {
                buf: encode_base64(&buf),
                encoding,
            },
        }
    }

    /// Returns the length of this `Body` in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if this `Body` has a length of zero, `false` otherwise.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the `Content-Transfer-Encoding` of this `Body`.
    pub fn encoding(&self) -> ContentTransferEncoding {
        self.encoding
    }

    /// Consumes `Body` and returns the inner `Vec<u8>`
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

impl AsRef<[u8]> for Body {
    fn as_ref(&self) -> &[u8] {
        self.buf.as_ref()
    }
}

impl MaybeString {
    /// Suggests the best `Content-Transfer-Encoding` to be used for this content
    fn encoding(&self) -> ContentTransferEncoding {
        match self {
            Self::String(s) if is_seven_bit(s.as_bytes()) => ContentTransferEncoding::SevenBit,
            Self::String(_) => ContentTransferEncoding::QuotedPrintable,
            Self::Binary(b) if is_seven_bit(b) => ContentTransferEncoding::SevenBit,
            Self::Binary(_) => ContentTransferEncoding::Base64,
        }
    }
}

/// A trait for something that takes an encoded [`Body`].
///
/// Used by [`MessageBuilder::body`][super::MessageBuilder::body] and
/// [`SinglePartBuilder::body`][super::SinglePartBuilder::body],
/// which can either take something that can be encoded into [`Body`]
/// or a pre-encoded [`Body`].
pub trait IntoBody {
    /// Encode as valid body
    fn into_body(self) -> Body;
}

impl<T> IntoBody for T
where
    T: Into<MaybeString>,
{
    fn into_body(self) -> Body {
        Body::new(self)
    }
}

impl IntoBody for Body {
    fn into_body(self) -> Body {
        self
    }
}

impl From<Vec<u8>> for MaybeString {
    fn from(b: Vec<u8>) -> Self {
        Self::Binary(b)
    }
}

impl From<String> for MaybeString {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl Deref for MaybeString {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Binary(b) => b.as_ref(),
            Self::String(s) => s.as_ref(),
        }
    }
}

/// Whether `buf` can travel as `7bit`: ASCII, no NUL, no over-long lines
fn is_seven_bit(buf: &[u8]) -> bool {
    buf.is_ascii()
        && !buf.contains(&0)
        && buf
            .split(|b| *b == b'\n')
            .all(|line| line.len() <= SEVEN_BIT_MAX_LINE)
}

/// Conversion to CRLF line endings
fn normalize_crlf(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev = '\0';
    for c in s.chars() {
        if c == '\n' && prev != '\r' {
            out.push('\r');
        }
        out.push(c);
        prev = c;
    }
    out
}

/// Standard base64, wrapped with CRLF
fn encode_base64(buf: &[u8]) -> Vec<u8> {
    let encoded = BASE64.encode(buf);
    let mut out = Vec::with_capacity(encoded.len() + (encoded.len() / BASE64_LINE + 1) * 2);
    for (i, chunk) in encoded.as_bytes().chunks(BASE64_LINE).enumerate() {
        if i > 0 {
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(chunk);
    }
    out
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{normalize_crlf, Body, ContentTransferEncoding};

    #[test]
    fn seven_bit_detect() {
        let encoded = Body::new(String::from("Hello, world!"));

        assert_eq!(encoded.encoding(), ContentTransferEncoding::SevenBit);
        assert_eq!(encoded.as_ref(), b"Hello, world!");
    }

    #[test]
    fn seven_bit_too_long_detect() {
        let encoded = Body::new("Hello, world!".repeat(10));

        assert_eq!(encoded.encoding(), ContentTransferEncoding::QuotedPrintable);
        assert_eq!(
            encoded.as_ref(),
            concat!(
                "Hello, world!Hello, world!Hello, world!Hello, world!Hello, world!Hello, wor=\r\n",
                "ld!Hello, world!Hello, world!Hello, world!Hello, world!"
            )
            .as_bytes()
        );
    }

    #[test]
    fn quoted_printable_detect() {
        let encoded = Body::new(String::from("Questo messaggio è corto"));

        assert_eq!(encoded.encoding(), ContentTransferEncoding::QuotedPrintable);
        assert_eq!(encoded.as_ref(), b"Questo messaggio =C3=A8 corto");
    }

    #[test]
    fn base64_detect() {
        let encoded = Body::new(vec![0u8; 80]);

        assert_eq!(encoded.encoding(), ContentTransferEncoding::Base64);
        assert_eq!(
            encoded.as_ref(),
            concat!(
                "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA\r\n",
                "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA="
            )
            .as_bytes()
        );
    }

    #[test]
    fn short_binary_ascii_stays_seven_bit() {
        let encoded = Body::new(b"plain bytes".to_vec());

        assert_eq!(encoded.encoding(), ContentTransferEncoding::SevenBit);
        assert_eq!(encoded.as_ref(), b"plain bytes");
    }

    #[test]
    fn crlf() {
        assert_eq!(
            normalize_crlf("Send me a letter\nwith\nmissive!\n"),
            "Send me a letter\r\nwith\r\nmissive!\r\n"
        );
    }

    #[test]
    fn crlf_noop() {
        assert_eq!(
            normalize_crlf("\r\nalready\r\nnormalized\r\n"),
            "\r\nalready\r\nnormalized\r\n"
        );
    }

    #[test]
    fn crlf_mixed() {
        assert_eq!(normalize_crlf("\n\na\r\n\nb\n"), "\r\n\r\na\r\n\r\nb\r\n");
    }
}
