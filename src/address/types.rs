//! Representation of an email address

use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
    net::IpAddr,
    str::FromStr,
};

use email_address::EmailAddress;

/// Represents an email address with a user and a domain name.
///
/// This type contains the email in canonical form (_user@domain.tld_).
/// Only ASCII addresses are accepted; the relay is expected to reject
/// anything else anyway when SMTPUTF8 is not negotiated.
///
/// # Examples
///
/// ```
/// use missive::Address;
///
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let address = "user@email.com".parse::<Address>()?;
/// assert_eq!(address.user(), "user");
/// assert_eq!(address.domain(), "email.com");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Address {
    /// Complete address
    serialized: String,
    /// Index into `serialized` before the '@'
    at_start: usize,
}

impl Address {
    /// Creates a new email address from a user and domain.
    pub fn new<U: AsRef<str>, D: AsRef<str>>(user: U, domain: D) -> Result<Self, AddressError> {
        let user = user.as_ref();
        let domain = domain.as_ref();
        Address::check_user(user)?;
        Address::check_domain(domain)?;

        let serialized = format!("{user}@{domain}");
        Ok(Address {
            at_start: user.len(),
            serialized,
        })
    }

    /// Gets the user portion of the `Address`.
    pub fn user(&self) -> &str {
        &self.serialized[..self.at_start]
    }

    /// Gets the domain portion of the `Address`.
    pub fn domain(&self) -> &str {
        &self.serialized[self.at_start + 1..]
    }

    fn check_user(user: &str) -> Result<(), AddressError> {
        if !user.is_ascii() || user.is_empty() || !EmailAddress::is_valid_local_part(user) {
            return Err(AddressError::InvalidUser);
        }
        Ok(())
    }

    fn check_domain(domain: &str) -> Result<(), AddressError> {
        if !domain.is_ascii() || domain.is_empty() {
            return Err(AddressError::InvalidDomain);
        }

        if EmailAddress::is_valid_domain(domain) {
            return Ok(());
        }

        // Address literals like [127.0.0.1]
        let ip = domain
            .strip_prefix('[')
            .and_then(|ip| ip.strip_suffix(']'))
            .unwrap_or(domain);

        if ip.parse::<IpAddr>().is_ok() {
            return Ok(());
        }

        Err(AddressError::InvalidDomain)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialized)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.serialized
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(val: &str) -> Result<Self, AddressError> {
        let at_start = val.rfind('@').ok_or(AddressError::MissingParts)?;
        Address::check_user(&val[..at_start])?;
        Address::check_domain(&val[at_start + 1..])?;
        Ok(Address {
            serialized: val.into(),
            at_start,
        })
    }
}

/// Errors in email addresses parsing
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Missing @ in the address
    MissingParts,
    /// Unbalanced angle brackets around a mailbox
    Unbalanced,
    /// Invalid local part
    InvalidUser,
    /// Invalid domain
    InvalidDomain,
}

impl Display for AddressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::MissingParts => f.write_str("missing @ in the email address"),
            AddressError::Unbalanced => f.write_str("unbalanced angle brackets around mailbox"),
            AddressError::InvalidUser => f.write_str("invalid user in the email address"),
            AddressError::InvalidDomain => f.write_str("invalid domain in the email address"),
        }
    }
}

impl StdError for AddressError {}
