//! Resource identifier types.
//!
//! Identifiers are interpolated into request paths, so anything that would
//! change the shape of the URL is rejected at construction time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

fn validate(kind: &'static str, s: &str) -> Result<(), Error> {
    let invalid = |reason: String| -> Error {
        InvalidInputError::Id {
            kind,
            value: s.to_string(),
            reason,
        }
        .into()
    };

    if s.is_empty() {
        return Err(invalid("cannot be empty".to_string()));
    }

    if s == "." || s == ".." {
        return Err(invalid("cannot be '.' or '..'".to_string()));
    }

    if let Some(c) = s
        .chars()
        .find(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
    {
        return Err(invalid(format!("contains invalid character '{}'", c)));
    }

    Ok(())
}

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier, validating that it is path-safe.
            pub fn new(s: impl Into<String>) -> Result<Self, Error> {
                let s = s.into();
                validate($kind, &s)?;
                Ok(Self(s))
            }

            /// Returns the identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

resource_id!(
    /// Identifier of a quote list returned by a quote search.
    QuoteListId,
    "quote list id"
);

resource_id!(
    /// Identifier of a single quote inside a quote list.
    QuoteId,
    "quote id"
);

resource_id!(
    /// Identifier of a booking.
    BookingId,
    "booking id"
);
