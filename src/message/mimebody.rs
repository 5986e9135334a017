use std::io::Write;

use mime::Mime;

use crate::message::{EmailFormat, Headers, IntoBody};

/// MIME part variants
#[derive(Debug, Clone)]
pub enum Part {
    /// Single part with content
    Single(SinglePart),

    /// Multiple parts of content
    Multi(MultiPart),
}

impl EmailFormat for Part {
    fn format(&self, out: &mut Vec<u8>) {
        match self {
            Part::Single(part) => part.format(out),
            Part::Multi(part) => part.format(out),
        }
    }
}

impl Part {
    /// Get message content formatted for SMTP
    pub fn formatted(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.format(&mut out);
        out
    }
}

/// Creates builder for single part
#[derive(Debug, Clone, Default)]
pub struct SinglePartBuilder {
    headers: Headers,
}

impl SinglePartBuilder {
    /// Creates a default singlepart builder
    pub fn new() -> Self {
        Self {
            headers: Headers::new(),
        }
    }

    /// Set the `Content-Type` header of the singlepart
    pub fn content_type(mut self, content_type: &Mime) -> Self {
        self.headers.set("Content-Type", content_type.to_string());
        self
    }

    /// Set a raw header of the singlepart
    pub fn header<V: Into<String>>(mut self, name: &'static str, value: V) -> Self {
        self.headers.set(name, value.into());
        self
    }

    /// Build singlepart using body
    ///
    /// The `Content-Transfer-Encoding` is chosen from the body content.
    pub fn body<T: IntoBody>(mut self, body: T) -> SinglePart {
        let body = body.into_body();

        self.headers
            .set("Content-Transfer-Encoding", body.encoding().to_string());

        SinglePart {
            headers: self.headers,
            body: body.into_vec(),
        }
    }
}

/// Single part
///
/// # Example
///
/// ```
/// use missive::message::SinglePart;
///
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let part = SinglePart::builder()
///     .content_type(&mime::TEXT_PLAIN_UTF_8)
///     .body(String::from("Текст письма в уникоде"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SinglePart {
    headers: Headers,
    body: Vec<u8>,
}

impl SinglePart {
    /// Creates a builder for singlepart
    pub fn builder() -> SinglePartBuilder {
        SinglePartBuilder::new()
    }

    /// Get the headers from singlepart
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get the encoded body
    pub fn raw_body(&self) -> &[u8] {
        &self.body
    }

    /// Get message content formatted for sending
    pub fn formatted(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.format(&mut out);
        out
    }
}

impl EmailFormat for SinglePart {
    fn format(&self, out: &mut Vec<u8>) {
        write!(out, "{}", self.headers)
            .expect("A Write implementation panicked while formatting headers");
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&self.body);
        out.extend_from_slice(b"\r\n");
    }
}

/// Create a random MIME boundary
fn make_boundary() -> String {
    std::iter::repeat_with(fastrand::alphanumeric).take(40).collect()
}

/// Multipart builder
#[derive(Debug, Clone)]
pub struct MultiPartBuilder {
    boundary: Option<String>,
}

impl MultiPartBuilder {
    /// Set a custom boundary
    pub fn boundary<S: Into<String>>(mut self, boundary: S) -> Self {
        self.boundary = Some(boundary.into());
        self
    }

    /// Creates multipart without parts
    pub fn build(self) -> MultiPart {
        let boundary = self.boundary.unwrap_or_else(make_boundary);
        let mut headers = Headers::new();
        headers.set(
            "Content-Type",
            format!("multipart/mixed; boundary=\"{boundary}\""),
        );
        MultiPart {
            headers,
            boundary,
            parts: Vec::new(),
        }
    }

    /// Creates multipart using a single part
    pub fn singlepart(self, part: SinglePart) -> MultiPart {
        self.build().singlepart(part)
    }

    /// Creates multipart using a part
    pub fn part(self, part: Part) -> MultiPart {
        self.build().part(part)
    }
}

/// Multipart variant with parts
///
/// Only the `multipart/mixed` kind is supported: a main body followed by
/// attachments.
#[derive(Debug, Clone)]
pub struct MultiPart {
    headers: Headers,
    boundary: String,
    parts: Vec<Part>,
}

impl MultiPart {
    /// Creates a mixed multipart builder
    pub fn mixed() -> MultiPartBuilder {
        MultiPartBuilder { boundary: None }
    }

    /// Add a part to multipart
    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Add a single part to multipart
    pub fn singlepart(mut self, part: SinglePart) -> Self {
        self.parts.push(Part::Single(part));
        self
    }

    /// Get the boundary of multipart contents
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Get the headers from the multipart
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get the parts from the multipart
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Get message content formatted for SMTP
    pub fn formatted(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.format(&mut out);
        out
    }
}

impl EmailFormat for MultiPart {
    fn format(&self, out: &mut Vec<u8>) {
        write!(out, "{}", self.headers)
            .expect("A Write implementation panicked while formatting headers");
        out.extend_from_slice(b"\r\n");

        for part in &self.parts {
            out.extend_from_slice(b"--");
            out.extend_from_slice(self.boundary.as_bytes());
            out.extend_from_slice(b"\r\n");
            part.format(out);
        }

        out.extend_from_slice(b"--");
        out.extend_from_slice(self.boundary.as_bytes());
        out.extend_from_slice(b"--\r\n");
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{make_boundary, MultiPart, SinglePart};

    #[test]
    fn single_part_seven_bit() {
        let part = SinglePart::builder()
            .content_type(&mime::TEXT_PLAIN_UTF_8)
            .body(String::from("Hello, world!"));

        assert_eq!(
            String::from_utf8(part.formatted()).unwrap(),
            concat!(
                "Content-Type: text/plain; charset=utf-8\r\n",
                "Content-Transfer-Encoding: 7bit\r\n",
                "\r\n",
                "Hello, world!\r\n"
            )
        );
    }

    #[test]
    fn single_part_quoted_printable() {
        let part = SinglePart::builder()
            .content_type(&mime::TEXT_PLAIN_UTF_8)
            .body(String::from("Текст письма в уникоде"));

        assert_eq!(
            String::from_utf8(part.formatted()).unwrap(),
            concat!(
                "Content-Type: text/plain; charset=utf-8\r\n",
                "Content-Transfer-Encoding: quoted-printable\r\n",
                "\r\n",
                "=D0=A2=D0=B5=D0=BA=D1=81=D1=82 =D0=BF=D0=B8=D1=81=D1=8C=D0=BC=D0=B0 =D0=B2 =\r\n",
                "=D1=83=D0=BD=D0=B8=D0=BA=D0=BE=D0=B4=D0=B5\r\n"
            )
        );
    }

    #[test]
    fn multi_part_mixed() {
        let part = MultiPart::mixed()
            .boundary("F2mTKN843loAAAAA8porEdAjCKhArPxGeahYoZYS")
            .singlepart(
                SinglePart::builder()
                    .content_type(&mime::TEXT_PLAIN_UTF_8)
                    .body(String::from("Hello, world!")),
            )
            .singlepart(
                SinglePart::builder()
                    .header(
                        "Content-Disposition",
                        "attachment; filename=\"example.c\"",
                    )
                    .content_type(&mime::TEXT_PLAIN_UTF_8)
                    .body(String::from("int main() { return 0; }")),
            );

        assert_eq!(
            String::from_utf8(part.formatted()).unwrap(),
            concat!(
                "Content-Type: multipart/mixed;",
                " boundary=\"F2mTKN843loAAAAA8porEdAjCKhArPxGeahYoZYS\"\r\n",
                "\r\n",
                "--F2mTKN843loAAAAA8porEdAjCKhArPxGeahYoZYS\r\n",
                "Content-Type: text/plain; charset=utf-8\r\n",
                "Content-Transfer-Encoding: 7bit\r\n",
                "\r\n",
                "Hello, world!\r\n",
                "--F2mTKN843loAAAAA8porEdAjCKhArPxGeahYoZYS\r\n",
                "Content-Disposition: attachment; filename=\"example.c\"\r\n",
                "Content-Type: text/plain; charset=utf-8\r\n",
                "Content-Transfer-Encoding: 7bit\r\n",
                "\r\n",
                "int main() { return 0; }\r\n",
                "--F2mTKN843loAAAAA8porEdAjCKhArPxGeahYoZYS--\r\n"
            )
        );
    }

    #[test]
    fn test_make_boundary() {
        let mut boundaries = std::collections::HashSet::with_capacity(1000);
        for _ in 0..1000 {
            boundaries.insert(make_boundary());
        }

        // Ensure there are no duplicates
        assert_eq!(1000, boundaries.len());

        // Ensure correct length
        for boundary in boundaries {
            assert_eq!(40, boundary.len());
        }
    }
}
