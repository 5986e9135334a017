use super::Address;

/// Simple email envelope representation
///
/// We only accept mailboxes, and do not support source routes (as per RFC).
///
/// An envelope may carry no recipients. The builder allows it so that a
/// message with an empty `To` header can still be represented; the SMTP
/// transport refuses to transmit such an envelope.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Envelope {
    /// The envelope recipients' addresses
    forward_path: Vec<Address>,
    /// The envelope sender address
    reverse_path: Option<Address>,
}

impl Envelope {
    /// Creates a new envelope
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str::FromStr;
    /// # use missive::Address;
    /// # use missive::address::Envelope;
    ///
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// let sender = Address::from_str("from@email.com")?;
    /// let recipients = vec![Address::from_str("to@email.com")?];
    ///
    /// let envelope = Envelope::new(Some(sender), recipients);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(from: Option<Address>, to: Vec<Address>) -> Envelope {
        Envelope {
            forward_path: to,
            reverse_path: from,
        }
    }

    /// Gets the destination addresses of the envelope.
    pub fn to(&self) -> &[Address] {
        self.forward_path.as_slice()
    }

    /// Gets the sender of the envelope.
    pub fn from(&self) -> Option<&Address> {
        self.reverse_path.as_ref()
    }
}

#[cfg(test)]
mod test {
    use super::Envelope;
    use crate::Address;

    #[test]
    fn envelope_accessors() {
        let from: Address = "from@example.com".parse().unwrap();
        let to: Address = "to@example.com".parse().unwrap();
        let envelope = Envelope::new(Some(from.clone()), vec![to.clone()]);

        assert_eq!(envelope.from(), Some(&from));
        assert_eq!(envelope.to(), &[to]);
    }

    #[test]
    fn envelope_may_be_empty() {
        let envelope = Envelope::new(None, vec![]);
        assert!(envelope.from().is_none());
        assert!(envelope.to().is_empty());
    }
}
