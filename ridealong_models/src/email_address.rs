use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress(pub lettre::Address);

#[derive(Debug, Error)]
pub enum EmailAddressError {
    #[error(transparent)]
    Syntax(#[from] lettre::address::AddressError),
    #[error("Local part contains unsupported characters")]
    LocalPart,
    #[error("Domain must end in a top level domain")]
    Domain,
}

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EmailAddress {
    type Err = EmailAddressError;

    /// Parses an address the way web forms expect it: a plain local part and
    /// a dotted domain ending in an alphabetic top level domain. RFC 5322
    /// forms such as quoted local parts or dotless domains are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let address = s.parse::<lettre::Address>()?;

        if !is_plain_local_part(address.user()) {
            return Err(EmailAddressError::LocalPart);
        }
        if !is_public_domain(address.domain()) {
            return Err(EmailAddressError::Domain);
        }

        Ok(Self(address))
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn is_plain_local_part(user: &str) -> bool {
    !user.starts_with('.')
        && !user.ends_with('.')
        && !user.contains("..")
        && user
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '\'' | '+' | '-' | '.'))
}

fn is_public_domain(domain: &str) -> bool {
    let Some((labels, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
        && labels.split('.').all(|label| {
            label.starts_with(|c: char| c.is_ascii_alphanumeric())
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}
