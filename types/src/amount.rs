//! Amount types for balances and voting power.
//!
//! Both are raw unsigned integers (u128). They are deliberately distinct types:
//! an account's balance and its voting power are independent quantities and
//! nothing forces them to agree.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! raw_amount {
    ($(#[$meta:meta])* $name:ident, $unit:literal) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            Debug,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u128);

        impl $name {
            pub const ZERO: Self = Self(0);

            pub const fn new(raw: u128) -> Self {
                Self(raw)
            }

            pub const fn raw(&self) -> u128 {
                self.0
            }

            pub const fn is_zero(&self) -> bool {
                self.0 == 0
            }

            pub fn checked_add(self, other: Self) -> Option<Self> {
                self.0.checked_add(other.0).map(Self)
            }

            pub fn checked_sub(self, other: Self) -> Option<Self> {
                self.0.checked_sub(other.0).map(Self)
            }
        }

        impl From<u128> for $name {
            fn from(raw: u128) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", self.0, $unit)
            }
        }
    };
}

raw_amount!(
    /// Ownership units held by an account; total supply is the sum of these.
    Units,
    "units"
);

raw_amount!(
    /// Governance weight used to tally votes.
    Weight,
    "votes"
);
