//! Stock-keeping unit type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A non-empty stock-keeping unit.
///
/// SKUs are the join key between the two catalogs. Matching is exact and
/// case-sensitive; no normalization is applied. Shopify reports a missing SKU
/// as either `null` or `""`, and both are treated as "no SKU" by
/// [`Sku::parse`], so an empty `Sku` can never be constructed.
///
/// ```
/// use catalog_bridge_core::Sku;
///
/// assert!(Sku::parse("TEE-BLK-M").is_some());
/// assert!(Sku::parse("").is_none());
/// assert_ne!(Sku::parse("abc"), Sku::parse("ABC"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sku(String);

impl Sku {
    /// Parse a SKU, returning `None` for the empty string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        (!s.is_empty()).then(|| Self(s.to_owned()))
    }

    /// Parse an optional SKU as reported by Shopify.
    #[must_use]
    pub fn from_optional(s: Option<&str>) -> Option<Self> {
        s.and_then(Self::parse)
    }

    /// Returns the SKU as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Sku` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Sku {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Err("sku cannot be empty")
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Sku> for String {
    fn from(sku: Sku) -> Self {
        sku.0
    }
}
