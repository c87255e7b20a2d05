//! Identifier newtypes.
//!
//! The planning API hands out numeric identifiers, while identifiers typed by
//! a user (filters, CLI arguments) arrive as text. Every identifier is stored
//! in one canonical string form so that `7`, `7.0` and `"7"` compare equal.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl IdRepr {
    fn canonical(self) -> String {
        match self {
            IdRepr::Int(n) => n.to_string(),
            IdRepr::Unsigned(n) => n.to_string(),
            IdRepr::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{}", f as i64),
            IdRepr::Float(f) => f.to_string(),
            IdRepr::Text(s) => s.trim().to_string(),
        }
    }
}

macro_rules! canonical_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl AsRef<str>) -> Self {
                $name(raw.as_ref().trim().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                $name::new(raw)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                $name::new(raw)
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                $name(n.to_string())
            }
        }

        impl Serialize for $name {
            // The API stores identifiers as unsigned integers; keep them numeric on the wire.
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self.0.parse::<u64>() {
                    Ok(n) => serializer.serialize_u64(n),
                    Err(_) => serializer.serialize_str(&self.0),
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Ok($name(IdRepr::deserialize(deserializer)?.canonical()))
            }
        }
    };
}

canonical_id!(
    /// Store-assigned identifier of a persisted event.
    EventId
);

canonical_id!(
    /// Identifier of the employee an event is assigned to.
    AssigneeId
);

canonical_id!(
    /// Identifier of the client an event is performed for.
    ClientId
);
