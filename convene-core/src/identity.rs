// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opaque identifiers for users, conventions and editions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size of entity identifiers in bytes.
pub const ID_LEN: usize = 16;

macro_rules! entity_id {
    ($name:ident, $label:literal) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(#[serde(with = "hex::serde")] [u8; ID_LEN]);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(rand::random())
            }

            /// Create an identifier from its raw bytes representation.
            pub const fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
                Self(bytes)
            }

            /// Bytes of the identifier.
            pub fn as_bytes(&self) -> &[u8; ID_LEN] {
                &self.0
            }

            /// Convert the identifier to a hex string.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple($label).field(&self.to_hex()).finish()
            }
        }

        impl From<[u8; ID_LEN]> for $name {
            fn from(value: [u8; ID_LEN]) -> Self {
                Self(value)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = IdError;

            fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
                let value_len = value.len();

                let checked_value: [u8; ID_LEN] = value
                    .try_into()
                    .map_err(|_| IdError::InvalidLength(value_len, ID_LEN))?;

                Ok(Self(checked_value))
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::try_from(hex::decode(value)?.as_slice())
            }
        }
    };
}

entity_id!(UserId, "UserId");
entity_id!(ConventionId, "ConventionId");
entity_id!(EditionId, "EditionId");

/// Errors which can occur when parsing identifiers.
#[derive(Error, Debug)]
pub enum IdError {
    /// Identifier string does not have the correct length.
    #[error("invalid identifier length {0}, expected {1}")]
    InvalidLength(usize, usize),

    /// Identifier string contains invalid hex characters.
    #[error(transparent)]
    InvalidHexEncoding(#[from] hex::FromHexError),
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{ConventionId, IdError, UserId};

    #[test]
    fn hex_representation() {
        let id = UserId::from_bytes([7; 16]);
        assert_eq!(id.to_hex(), "07070707070707070707070707070707");
        assert_eq!(id.to_string(), id.to_hex());
    }

    #[test]
    fn from_str_round_trip() {
        let id = ConventionId::random();
        assert_eq!(ConventionId::from_str(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn invalid_identifiers() {
        assert!(matches!(
            UserId::from_str("0707"),
            Err(IdError::InvalidLength(2, 16))
        ));
        assert!(matches!(
            UserId::from_str("zz070707070707070707070707070707"),
            Err(IdError::InvalidHexEncoding(_))
        ));
    }

    #[test]
    fn serde_round_trip() {
        let id = UserId::random();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.to_hex()));
        assert_eq!(serde_json::from_str::<UserId>(&json).unwrap(), id);
    }
}
