//! Newtype IDs for Shopify entities.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing product and variant IDs. IDs deserialize from a JSON
//! number, a numeric string, or a Shopify GID (`gid://shopify/<Kind>/<n>`),
//! and always serialize as a plain number, which is what the REST Admin API
//! expects.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Prefix of every Shopify global ID.
const GID_PREFIX: &str = "gid://shopify/";

/// Errors that can occur when parsing an ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    /// The input is neither a positive integer nor a well-formed GID.
    #[error("malformed id: {0:?}")]
    Malformed(String),
    /// The input is a GID for a different resource type.
    #[error("expected a {expected} id, got a {found} id")]
    WrongKind {
        /// Resource kind the caller asked for.
        expected: &'static str,
        /// Resource kind found in the GID.
        found: String,
    },
}

/// Parse a numeric ID or a GID of the given resource kind.
///
/// # Errors
///
/// Returns an error if the input is not a positive integer or a GID of `kind`.
#[doc(hidden)]
pub fn parse_id(input: &str, kind: &'static str) -> Result<i64, IdParseError> {
    let trimmed = input.trim();

    let numeric = match trimmed.strip_prefix(GID_PREFIX) {
        Some(rest) => {
            let (found, id) = rest
                .split_once('/')
                .ok_or_else(|| IdParseError::Malformed(input.to_owned()))?;
            if found != kind {
                return Err(IdParseError::WrongKind {
                    expected: kind,
                    found: found.to_owned(),
                });
            }
            // GIDs may carry query parameters (`?session=...`)
            id.split('?').next().unwrap_or(id)
        }
        None => trimmed,
    };

    numeric
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| IdParseError::Malformed(input.to_owned()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

/// Deserialize an ID from a number, numeric string, or GID.
///
/// # Errors
///
/// Returns a deserialization error if the value cannot be parsed.
#[doc(hidden)]
pub fn deserialize_id<'de, D>(deserializer: D, kind: &'static str) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Number(id) if id > 0 => Ok(id),
        RawId::Number(id) => Err(serde::de::Error::custom(IdParseError::Malformed(
            id.to_string(),
        ))),
        RawId::Text(text) => parse_id(&text, kind).map_err(serde::de::Error::custom),
    }
}

/// Macro to define a type-safe Shopify ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize` as a bare number, `Deserialize` from number, string, or GID
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - Conversion methods: `new()`, `as_i64()`, `to_gid()`
/// - `FromStr`, `Display`, `From<i64>` and `Into<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use catalog_bridge_core::define_id;
/// define_id!(ProductId, "Product");
/// define_id!(OrderId, "Order");
///
/// let product_id: ProductId = "gid://shopify/Product/42".parse().unwrap();
/// assert_eq!(product_id.as_i64(), 42);
///
/// // Different resource kinds are rejected:
/// assert!("gid://shopify/Order/42".parse::<ProductId>().is_err());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $kind:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Shopify resource kind used in GIDs.
            pub const KIND: &'static str = $kind;

            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }

            /// Format as a Shopify GID.
            #[must_use]
            pub fn to_gid(&self) -> String {
                format!("gid://shopify/{}/{}", $kind, self.0)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::IdParseError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                $crate::types::id::parse_id(s, $kind).map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::types::id::deserialize_id(deserializer, $kind).map(Self)
            }
        }
    };
}

define_id!(ProductId, "Product");
define_id!(VariantId, "ProductVariant");
define_id!(DraftOrderId, "DraftOrder");
