//! Parse errors for wire values (identifiers and closed enumerations).

use thiserror::Error;

/// A wire value could not be interpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An identifier was not a valid integer.
    #[error("invalid {kind}: {detail}")]
    InvalidId { kind: &'static str, detail: String },

    /// A string was not one of the values of a closed enumeration.
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

impl ParseError {
    pub fn invalid_id(kind: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidId {
            kind,
            detail: detail.into(),
        }
    }

    pub fn unknown_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}

/// Implements `as_str`, `Display` and `FromStr` for a closed enumeration whose
/// wire form is the upper-case variant name.
///
/// Parsing is case-insensitive and ignores surrounding whitespace, matching
/// how the backend normalizes these values.
#[macro_export]
macro_rules! wire_enum {
    ($t:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $t {
            /// All values, in declaration order.
            pub const ALL: &'static [$t] = &[$($t::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($t::$variant => $wire),+
                }
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $t {
            type Err = $crate::ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_uppercase();
                match normalized.as_str() {
                    $($wire => Ok($t::$variant),)+
                    _ => Err($crate::ParseError::unknown_variant($kind, s)),
                }
            }
        }
    };
}
