//! Bearer and refresh token types.
//!
//! Both decode straight from the auth endpoints' JSON. An empty token is a
//! malformed response, not a usable credential.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

macro_rules! secret_token {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Deserialize)]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl $name {
            /// Wrap a token string.
            pub fn new(token: impl Into<String>) -> Self {
                Self(token.into())
            }

            /// Returns the raw token value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = &'static str;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                if s.is_empty() {
                    return Err(concat!(stringify!($name), " must not be empty"));
                }
                Ok(Self(s))
            }
        }

        // Only request bodies serialize tokens; Debug never shows them.
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&"[REDACTED]").finish()
            }
        }
    };
}

secret_token!(
    /// Sent as `Authorization: Bearer <token>` on resource calls.
    AccessToken
);

secret_token!(
    /// Exchanged for a new access token once the current one expires.
    /// The service keeps it valid across refreshes.
    RefreshToken
);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn debug_is_redacted() {
        let access = format!("{:?}", AccessToken::new("eyJhbGciOiJIUzI1NiJ9.payload"));
        let refresh = format!("{:?}", RefreshToken::new("r-5f2c"));

        assert_eq!(access, r#"AccessToken("[REDACTED]")"#);
        assert_eq!(refresh, r#"RefreshToken("[REDACTED]")"#);
    }

    #[test]
    fn decodes_from_json_string() {
        let token: RefreshToken = serde_json::from_value(json!("r1")).unwrap();
        assert_eq!(token.as_str(), "r1");
        assert_eq!(serde_json::to_value(&token).unwrap(), json!("r1"));
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = serde_json::from_value::<AccessToken>(json!("")).unwrap_err();
        assert!(err.to_string().contains("AccessToken must not be empty"));
        assert!(serde_json::from_value::<AccessToken>(json!(null)).is_err());
    }
}
