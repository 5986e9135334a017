//! Mailboxes: addresses with an optional display name

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::address::{Address, AddressError};
use crate::message::utf8_b;

/// Represents an email address with an optional name for the sender/recipient.
///
/// # Examples
///
/// ```
/// use missive::message::Mailbox;
///
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let plain: Mailbox = "kayo@example.com".parse()?;
/// let named: Mailbox = "Kayo <kayo@example.com>".parse()?;
/// assert_eq!(named.email, plain.email);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    /// The display name associated with the address
    pub name: Option<String>,
    /// The email address itself
    pub email: Address,
}

impl Mailbox {
    /// Creates a new `Mailbox` using an email address and the name of the user
    pub fn new(name: Option<String>, email: Address) -> Self {
        Mailbox { name, email }
    }
}

impl Display for Mailbox {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) if !name.is_empty() => {
                write!(f, "{} <{}>", utf8_b::encode(name), self.email)
            }
            _ => self.email.fmt(f),
        }
    }
}

impl From<Address> for Mailbox {
    fn from(email: Address) -> Self {
        Mailbox { name: None, email }
    }
}

impl FromStr for Mailbox {
    type Err = AddressError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let src = src.trim();
        match src.find('<') {
            Some(addr_open) => {
                let addr_close = src.rfind('>').ok_or(AddressError::Unbalanced)?;
                if addr_close < addr_open || addr_close != src.len() - 1 {
                    return Err(AddressError::Unbalanced);
                }

                let name = src[..addr_open].trim().trim_matches('"').trim();
                let email = src[addr_open + 1..addr_close].trim().parse()?;

                let name = if name.is_empty() {
                    None
                } else {
                    Some(name.to_owned())
                };
                Ok(Mailbox { name, email })
            }
            None => Ok(Mailbox {
                name: None,
                email: src.parse()?,
            }),
        }
    }
}

/// A list of [`Mailbox`]es
///
/// Renders as the mailboxes joined with `", "`, the form expected in `To`,
/// `From` and friends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mailboxes(Vec<Mailbox>);

impl Mailboxes {
    /// Creates an empty list
    pub fn new() -> Self {
        Mailboxes(Vec::new())
    }

    /// Appends a mailbox
    pub fn push(&mut self, mbox: Mailbox) {
        self.0.push(mbox);
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the mailboxes
    pub fn iter(&self) -> std::slice::Iter<'_, Mailbox> {
        self.0.iter()
    }
}

impl From<Mailbox> for Mailboxes {
    fn from(mbox: Mailbox) -> Self {
        Mailboxes(vec![mbox])
    }
}

impl From<Vec<Mailbox>> for Mailboxes {
    fn from(mboxes: Vec<Mailbox>) -> Self {
        Mailboxes(mboxes)
    }
}

impl IntoIterator for Mailboxes {
    type Item = Mailbox;
    type IntoIter = std::vec::IntoIter<Mailbox>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for Mailboxes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut mboxes = self.0.iter();
        if let Some(mbox) = mboxes.next() {
            mbox.fmt(f)?;
            for mbox in mboxes {
                f.write_str(", ")?;
                mbox.fmt(f)?;
            }
        }
        Ok(())
    }
}
