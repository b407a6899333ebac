//! Tenant slug type.
//!
//! Slugs are the human-readable, URL-safe tenant identifiers used by the
//! developer override header and the provisioning CLI.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`TenantSlug`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("slug may only contain lowercase letters, digits, and hyphens")]
    InvalidCharacter,
    /// The input starts or ends with a hyphen.
    #[error("slug cannot start or end with a hyphen")]
    EdgeHyphen,
}

/// A tenant slug.
///
/// Slugs are unique per tenant and appear in provisioning commands, the
/// local-mode override header, and audit records. They are deliberately
/// restrictive so they can be embedded in hostnames and cache keys without
/// escaping.
///
/// ## Constraints
///
/// - Length: 1-63 characters (DNS label limit)
/// - Lowercase ASCII letters, digits, and hyphens only
/// - Must not start or end with a hyphen
///
/// ## Examples
///
/// ```
/// use mangrove_core::TenantSlug;
///
/// assert!(TenantSlug::parse("north-store").is_ok());
/// assert!(TenantSlug::parse("North Store").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TenantSlug(String);

impl TenantSlug {
    /// Maximum length of a slug (DNS label limit, so slugs can double as subdomains).
    pub const MAX_LENGTH: usize = 63;

    /// Parse a `TenantSlug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 63 characters,
    /// contains a character outside `[a-z0-9-]`, or starts/ends with a hyphen.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(SlugError::InvalidCharacter);
        }

        if s.starts_with('-') || s.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TenantSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_slugs() {
        assert!(TenantSlug::parse("north-store").is_ok());
        assert!(TenantSlug::parse("store42").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(TenantSlug::parse(""), Err(SlugError::Empty)));
    }

    #[test]
    fn rejects_uppercase_and_spaces() {
        assert!(matches!(
            TenantSlug::parse("North-Store"),
            Err(SlugError::InvalidCharacter)
        ));
        assert!(matches!(
            TenantSlug::parse("north store"),
            Err(SlugError::InvalidCharacter)
        ));
    }

    #[test]
    fn rejects_edge_hyphens() {
        assert!(matches!(
            TenantSlug::parse("-north"),
            Err(SlugError::EdgeHyphen)
        ));
        assert!(matches!(
            TenantSlug::parse("north-"),
            Err(SlugError::EdgeHyphen)
        ));
    }

    #[test]
    fn rejects_too_long() {
        let long = "a".repeat(64);
        assert!(matches!(
            TenantSlug::parse(&long),
            Err(SlugError::TooLong { max: 63 })
        ));
    }
}
