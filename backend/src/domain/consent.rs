//! Cookie consent records.

use std::net::{IpAddr, SocketAddr};

use chrono::{DateTime, Utc};

/// Placeholder stored when a client attribute cannot be derived.
pub const UNKNOWN_CLIENT_ATTRIBUTE: &str = "unknown";

/// Append-only record of one consent action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConsent {
    pub ip_address: String,
    pub user_agent: String,
    pub accepted: bool,
    /// Instant reported by the client when the choice was made.
    pub consented_at: DateTime<Utc>,
}

impl CookieConsent {
    /// Build a record, substituting [`UNKNOWN_CLIENT_ATTRIBUTE`] for absent
    /// or blank client attributes.
    ///
    /// The address is stored in canonical form; values that are not an IP
    /// address (optionally with a port) are replaced by the placeholder.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use arena_backend::domain::CookieConsent;
    ///
    /// let consent = CookieConsent::new(None, Some("curl/8"), true, Utc::now());
    /// assert_eq!(consent.ip_address, "unknown");
    /// assert_eq!(consent.user_agent, "curl/8");
    /// ```
    pub fn new(
        ip_address: Option<&str>,
        user_agent: Option<&str>,
        accepted: bool,
        consented_at: DateTime<Utc>,
    ) -> Self {
        Self {
            ip_address: canonical_ip(ip_address),
            user_agent: known_or_placeholder(user_agent),
            accepted,
            consented_at,
        }
    }
}

fn canonical_ip(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .and_then(|raw| {
            raw.parse::<IpAddr>()
                .or_else(|_| raw.parse::<SocketAddr>().map(|addr| addr.ip()))
                .ok()
        })
        .map_or_else(|| UNKNOWN_CLIENT_ATTRIBUTE.to_owned(), |ip| ip.to_string())
}

fn known_or_placeholder(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .unwrap_or(UNKNOWN_CLIENT_ATTRIBUTE)
        .to_owned()
}
