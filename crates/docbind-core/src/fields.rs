//! Typed field vocabulary.
//!
//! Each scalar wrapper validates on construction and on deserialization, so a
//! document that made it into memory is known to hold store-representable
//! values. Bound checks are strict: the exclusive bounds themselves are
//! rejected, which means the nominal maximum of each integer kind (e.g.
//! `i64::MAX` for [`Long`]) does not validate. Callers that need the full
//! nominal range must use an unmapped field instead.

use serde::{Deserialize, Serialize};

use crate::error::DocbindError;

/// The closed set of field kinds with a known store-side mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Keyword,
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Date,
}

impl FieldKind {
    /// Canonical store type name emitted into index mappings.
    pub fn store_type(&self) -> &'static str {
        match self {
            FieldKind::Keyword => "keyword",
            FieldKind::Boolean => "boolean",
            FieldKind::Byte => "byte",
            FieldKind::Short => "short",
            FieldKind::Integer => "integer",
            FieldKind::Long => "long",
            FieldKind::Date => "date",
        }
    }

    /// Exclusive `(lower, upper)` bound pair for integer kinds.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        match self {
            FieldKind::Byte => Some((-128, 128)),
            FieldKind::Short => Some((-32_768, 32_768)),
            FieldKind::Integer => Some((-2_147_483_648, 2_147_483_647)),
            FieldKind::Long => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }
}

/// Check `value` against the exclusive bound pair of `kind`.
///
/// A value equal to either bound is rejected.
fn check_bounds(kind: FieldKind, value: i64) -> Result<i64, DocbindError> {
    let (lower, upper) = kind
        .bounds()
        .expect("check_bounds called for a kind without bounds");
    if value <= lower || value >= upper {
        return Err(DocbindError::Validation(format!(
            "{} value {} out of range {} - {}",
            kind.store_type(),
            value,
            lower,
            upper
        )));
    }
    Ok(value)
}

/// A string stored as a non-analyzed `keyword` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyword(String);

impl Keyword {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Keyword {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Keyword {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! integer_field {
    ($(#[$doc:meta])* $name:ident, $kind:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            pub fn new(value: i64) -> Result<Self, DocbindError> {
                check_bounds($kind, value).map(Self)
            }

            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = DocbindError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> i64 {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

integer_field!(
    /// An 8-bit integer field (`byte` in the store).
    Byte,
    FieldKind::Byte
);
integer_field!(
    /// A 16-bit integer field (`short` in the store).
    Short,
    FieldKind::Short
);
integer_field!(
    /// A 32-bit integer field (`integer` in the store).
    Integer,
    FieldKind::Integer
);
integer_field!(
    /// A 64-bit integer field (`long` in the store).
    Long,
    FieldKind::Long
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_exclusive() {
        // Every kind rejects its bound values and accepts the step inside.
        for kind in [
            FieldKind::Byte,
            FieldKind::Short,
            FieldKind::Integer,
            FieldKind::Long,
        ] {
            let (lower, upper) = kind.bounds().unwrap();
            assert!(check_bounds(kind, lower).is_err());
            assert!(check_bounds(kind, upper).is_err());
            assert!(check_bounds(kind, lower + 1).is_ok());
            assert!(check_bounds(kind, upper - 1).is_ok());
        }
    }

    #[test]
    fn nominal_maxima_are_rejected() {
        // The strict upper bound rejects each kind's nominal maximum; this
        // pins the behavior so a switch to inclusive bounds has to be
        // deliberate.
        assert!(Byte::new(127).is_ok());
        assert!(Integer::new(i32::MAX as i64).is_err());
        assert!(Integer::new(i32::MAX as i64 - 1).is_ok());
        assert!(Long::new(i64::MAX).is_err());
        assert!(Long::new(i64::MIN).is_err());
    }

    #[test]
    fn wrappers_validate_on_deserialize() {
        assert!(serde_json::from_str::<Byte>("256").is_err());
        assert!(serde_json::from_str::<Byte>("128").is_err());
        assert_eq!(serde_json::from_str::<Byte>("5").unwrap(), Byte::new(5).unwrap());
        assert!(serde_json::from_str::<Short>("32768").is_err());
    }

    #[test]
    fn wrappers_serialize_as_bare_values() {
        assert_eq!(
            serde_json::to_string(&Integer::new(42).unwrap()).unwrap(),
            "42"
        );
        assert_eq!(
            serde_json::to_string(&Keyword::new("tag")).unwrap(),
            "\"tag\""
        );
    }

    #[test]
    fn keyword_is_a_plain_string() {
        let k: Keyword = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(k.as_str(), "abc");
        assert!(serde_json::from_str::<Keyword>("17").is_err());
    }
}
