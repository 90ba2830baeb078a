//! Port for the append-only cookie consent log.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::CookieConsent;

use super::define_port_error;

define_port_error! {
    /// Errors raised by cookie consent adapters.
    pub enum CookieConsentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "consent repository connection failed: {message}",
        /// Insert failed during execution.
        Query { message: String } => "consent repository query failed: {message}",
    }
}

/// Driven port appending consent records. Records are never read back or
/// mutated by the application.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CookieConsentRepository: Send + Sync {
    /// Append one record.
    async fn insert(&self, consent: &CookieConsent) -> Result<(), CookieConsentRepositoryError>;
}

/// In-memory consent log used when no database is configured.
#[derive(Debug, Default)]
pub struct InMemoryCookieConsentRepository {
    records: Mutex<Vec<CookieConsent>>,
}

impl InMemoryCookieConsentRepository {
    /// Snapshot of the recorded entries, oldest first.
    pub fn records(&self) -> Vec<CookieConsent> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CookieConsentRepository for InMemoryCookieConsentRepository {
    async fn insert(&self, consent: &CookieConsent) -> Result<(), CookieConsentRepositoryError> {
        self.records
            .lock()
            .map_err(|_| CookieConsentRepositoryError::query("consent log lock poisoned"))?
            .push(consent.clone());
        Ok(())
    }
}
