//! Normalized hostname type.
//!
//! All tenant resolution compares hostnames through this type so that case
//! and trailing ports can never cause two call sites to disagree.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A normalized hostname.
///
/// Normalization lowercases the input, strips a trailing `:port` suffix, and
/// strips a single trailing dot (a fully-qualified DNS form some proxies
/// forward). The empty string is preserved as-is and will simply never match
/// any tenant.
///
/// ## Examples
///
/// ```
/// use mangrove_core::HostName;
///
/// let host = HostName::normalize("North.Example.com:8443");
/// assert_eq!(host.as_str(), "north.example.com");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct HostName(String);

impl HostName {
    /// Normalize a raw `Host` header value.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();

        // Strip a trailing :port. IPv6 literals keep their brackets, so only
        // strip when the colon is not inside a bracketed address.
        let without_port = match (trimmed.starts_with('['), trimmed.rfind(':')) {
            (false, Some(idx)) if trimmed.get(idx + 1..).is_some_and(is_all_digits) => {
                trimmed.get(..idx).unwrap_or(trimmed)
            }
            (true, _) => trimmed
                .find(']')
                .and_then(|end| trimmed.get(..=end))
                .unwrap_or(trimmed),
            _ => trimmed,
        };

        let without_dot = without_port.strip_suffix('.').unwrap_or(without_port);

        Self(without_dot.to_ascii_lowercase())
    }

    /// Returns the normalized hostname as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the leftmost DNS label and the remainder, if the hostname has
    /// at least two labels.
    ///
    /// `"south.example.com"` splits into `("south", "example.com")`.
    #[must_use]
    pub fn split_first_label(&self) -> Option<(&str, &str)> {
        let (label, rest) = self.0.split_once('.')?;
        if label.is_empty() || rest.is_empty() {
            return None;
        }
        Some((label, rest))
    }

    /// True if this host denotes a bare local-development machine: loopback
    /// names and addresses with no subdomain component.
    #[must_use]
    pub fn is_local_host(&self) -> bool {
        matches!(self.0.as_str(), "localhost" | "127.0.0.1" | "[::1]" | "0.0.0.0")
    }
}

impl fmt::Display for HostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for HostName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_port() {
        assert_eq!(
            HostName::normalize("North.Example.COM:8443").as_str(),
            "north.example.com"
        );
    }

    #[test]
    fn strips_trailing_dot() {
        assert_eq!(
            HostName::normalize("shop.example.com.").as_str(),
            "shop.example.com"
        );
    }

    #[test]
    fn leaves_plain_hosts_alone() {
        assert_eq!(HostName::normalize("localhost").as_str(), "localhost");
    }

    #[test]
    fn keeps_ipv6_brackets() {
        assert_eq!(HostName::normalize("[::1]:3000").as_str(), "[::1]");
    }

    #[test]
    fn splits_first_label() {
        let host = HostName::normalize("south.example.com");
        assert_eq!(host.split_first_label(), Some(("south", "example.com")));

        let bare = HostName::normalize("localhost");
        assert_eq!(bare.split_first_label(), None);
    }

    #[test]
    fn recognizes_local_hosts() {
        assert!(HostName::normalize("localhost:3000").is_local_host());
        assert!(HostName::normalize("127.0.0.1").is_local_host());
        assert!(!HostName::normalize("example.com").is_local_host());
    }
}
