//! SMTP response, containing a mandatory return code and an optional text
//! message

use std::fmt::{Display, Formatter, Result as FmtResult};

use nom::{
    bytes::streaming::{tag, take_until, take_while_m_n},
    character::streaming::char,
    combinator::map_opt,
    multi::many0,
    IResult,
};

/// First digit of a response code, indicating severity
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Severity {
    /// 2yz
    PositiveCompletion = 2,
    /// 3yz
    PositiveIntermediate = 3,
    /// 4yz
    TransientNegativeCompletion = 4,
    /// 5yz
    PermanentNegativeCompletion = 5,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", *self as u8)
    }
}

/// A 3-digit SMTP response code
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct Code(u16);

impl Code {
    /// Creates a `Code`, which must be in the 200..=599 range
    pub fn new(value: u16) -> Option<Code> {
        match value {
            200..=599 => Some(Code(value)),
            _ => None,
        }
    }

    /// The severity class of the code (its first digit)
    pub fn severity(self) -> Severity {
        match self.0 / 100 {
            2 => Severity::PositiveCompletion,
            3 => Severity::PositiveIntermediate,
            4 => Severity::TransientNegativeCompletion,
            // Guaranteed by the constructor
            _ => Severity::PermanentNegativeCompletion,
        }
    }

    /// Tells if the code is positive
    pub fn is_positive(self) -> bool {
        matches!(
            self.severity(),
            Severity::PositiveCompletion | Severity::PositiveIntermediate
        )
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl From<Code> for u16 {
    fn from(code: Code) -> Self {
        code.0
    }
}

/// Contains an SMTP reply, with separated code and message
///
/// The text message is optional, only the code is mandatory
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Response {
    /// Response code
    code: Code,
    /// Server response string (optional)
    /// Handles multiline responses
    message: Vec<String>,
}

impl Response {
    /// Creates a new `Response`
    pub fn new(code: Code, message: Vec<String>) -> Response {
        Response { code, message }
    }

    /// Tells if the response is positive
    pub fn is_positive(&self) -> bool {
        self.code.is_positive()
    }

    /// Tests code equality
    pub fn has_code(&self, code: u16) -> bool {
        u16::from(self.code) == code
    }

    /// Returns only the first word of the message if possible
    pub fn first_word(&self) -> Option<&str> {
        self.message
            .first()
            .and_then(|line| line.split_whitespace().next())
    }

    /// Returns only the first line of the message if possible
    pub fn first_line(&self) -> Option<&str> {
        self.message.first().map(String::as_str)
    }

    /// Response code
    pub fn code(&self) -> Code {
        self.code
    }

    /// Server response string (array of lines)
    pub fn message(&self) -> impl Iterator<Item = &str> {
        self.message.iter().map(String::as_str)
    }
}

fn parse_code(i: &str) -> IResult<&str, Code> {
    map_opt(
        take_while_m_n(3, 3, |c: char| c.is_ascii_digit()),
        |code: &str| code.parse().ok().and_then(Code::new),
    )(i)
}

/// One reply line: code, separator, text, CRLF
///
/// The separator is `-` for continuation lines and a space for the final one.
fn reply_line(sep: char) -> impl Fn(&str) -> IResult<&str, (Code, &str)> {
    move |i| {
        let (i, code) = parse_code(i)?;
        let (i, _) = char(sep)(i)?;
        let (i, text) = take_until("\r\n")(i)?;
        let (i, _) = tag("\r\n")(i)?;
        Ok((i, (code, text)))
    }
}

pub(crate) fn parse_response(i: &str) -> IResult<&str, Response> {
    let (i, head) = many0(reply_line('-'))(i)?;
    let (i, (code, last)) = reply_line(' ')(i)?;

    // All lines of a reply must carry the same code
    if !head.iter().all(|&(line_code, _)| line_code == code) {
        return Err(nom::Err::Failure(nom::error::Error::new(
            i,
            nom::error::ErrorKind::Verify,
        )));
    }

    let mut message: Vec<String> = head.into_iter().map(|(_code, text)| text.into()).collect();
    message.push(last.into());

    Ok((i, Response { code, message }))
}
