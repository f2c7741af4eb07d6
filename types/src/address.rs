//! Account identity type with `prcl_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// An opaque account identity, always prefixed with `prcl_`.
///
/// The body is any non-empty string. A body made only of `0` characters is
/// the null identity: it never holds a balance and is the counterparty of
/// mint and burn notifications.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// The standard prefix for all account identities.
    pub const PREFIX: &'static str = "prcl_";

    /// Create an account id from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `prcl_` or has an empty body.
    /// Use [`AccountId::parse`] for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(Self::well_formed(&s), "account id must be prcl_<body>");
        Self(s)
    }

    /// Parse an account id, rejecting malformed input.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if Self::well_formed(&s) {
            Ok(Self(s))
        } else {
            Err(TypesError::InvalidAccount(s))
        }
    }

    /// The null identity.
    pub fn null() -> Self {
        Self(format!("{}{}", Self::PREFIX, "0".repeat(40)))
    }

    /// Whether this is the null identity.
    pub fn is_null(&self) -> bool {
        self.body().bytes().all(|b| b == b'0')
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn body(&self) -> &str {
        &self.0[Self::PREFIX.len()..]
    }

    fn well_formed(s: &str) -> bool {
        s.starts_with(Self::PREFIX) && s.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}
