//! Newtype resource identifiers.
//!
//! Every resource the encoding service hands out an identity for is wrapped in
//! a distinct newtype. This prevents accidentally passing a [`ProfileId`] where
//! a [`VideoId`] is expected even though both are opaque strings on the wire.
//!
//! Identifiers are always assigned by the service. The client only ever
//! constructs them from values it was given (responses, configuration, user
//! input); it never generates one.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display, FromStr.
// Deserialisation goes through new(), so an empty string is rejected.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = EmptyIdentifier;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(EmptyIdentifier)
            }
        }

        impl TryFrom<String> for $name {
            type Error = EmptyIdentifier;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(EmptyIdentifier)
            }
        }
    };
}

/// Returned when parsing an identifier from an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("identifier must not be empty")]
pub struct EmptyIdentifier;

/// Reads an optional identifier field, treating `null` and `""` as absent.
pub(crate) fn optional_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

string_id! {
    /// Identifies an uploaded source video.
    VideoId
}

string_id! {
    /// Identifies one encoding job (a video converted under a profile).
    EncodingId
}

string_id! {
    /// Identifies an encoding profile.
    ///
    /// Profiles also have a human-readable name; see [`crate::Profile::name`].
    ProfileId
}

string_id! {
    /// Identifies a cloud, the tenant that owns videos, profiles and
    /// notification settings.
    CloudId
}
