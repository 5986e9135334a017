//! Email headers, kept in insertion order
// https://tools.ietf.org/html/rfc5322#section-2.2

use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
    ops::Deref,
};

/// The name of a header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderName(Cow<'static, str>);

impl HeaderName {
    /// Creates a header name from a static string
    pub const fn new_from_ascii_str(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<&'static str> for HeaderName {
    fn from(name: &'static str) -> Self {
        Self::new_from_ascii_str(name)
    }
}

impl Display for HeaderName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for HeaderName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

/// An ordered set of email headers
#[derive(Debug, Clone, Default)]
pub struct Headers {
    headers: Vec<(HeaderName, String)>,
}

impl Headers {
    /// Creates a new empty header set
    pub const fn new() -> Self {
        Self {
            headers: Vec::new(),
        }
    }

    /// Sets a header, replacing an existing one with the same name
    pub fn set<N: Into<HeaderName>>(&mut self, name: N, value: String) {
        let name = name.into();
        match self.find_header_mut(&name) {
            Some(current_value) => {
                *current_value = value;
            }
            None => {
                self.headers.push((name, value));
            }
        }
    }

    /// Gets the value of the header with the given name, if set
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name_, _value)| name.eq_ignore_ascii_case(name_))
            .map(|(_name, value)| value.as_str())
    }

    fn find_header_mut(&mut self, name: &str) -> Option<&mut String> {
        self.headers
            .iter_mut()
            .find(|(name_, _value)| name.eq_ignore_ascii_case(name_))
            .map(|(_name, value)| value)
    }
}

impl Display for Headers {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.headers {
            write!(f, "{name}: {value}\r\n")?;
        }
        Ok(())
    }
}
