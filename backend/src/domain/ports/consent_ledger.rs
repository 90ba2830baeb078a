//! Driving port for recording cookie consent.

use async_trait::async_trait;

use crate::domain::{CookieConsent, Error};

/// Domain use-case port appending consent actions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConsentLedger: Send + Sync {
    /// Record one consent action. Every call creates a new record.
    async fn record(&self, consent: CookieConsent) -> Result<(), Error>;
}
