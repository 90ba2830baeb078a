//! Cookie consent recording service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use super::ports::{ConsentLedger, CookieConsentRepository, CookieConsentRepositoryError};
use super::{CookieConsent, Error};

/// [`ConsentLedger`] implementation appending to a [`CookieConsentRepository`].
#[derive(Clone)]
pub struct CookieConsentService {
    repository: Arc<dyn CookieConsentRepository>,
}

impl CookieConsentService {
    pub fn new(repository: Arc<dyn CookieConsentRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ConsentLedger for CookieConsentService {
    async fn record(&self, consent: CookieConsent) -> Result<(), Error> {
        self.repository.insert(&consent).await.map_err(|err| {
            error!(error = %err, "failed to record cookie consent");
            match err {
                CookieConsentRepositoryError::Connection { .. } => {
                    Error::service_unavailable("consent store unavailable")
                }
                CookieConsentRepositoryError::Query { .. } => {
                    Error::internal("failed to record consent")
                }
            }
        })?;
        debug!(accepted = consent.accepted, "cookie consent recorded");
        Ok(())
    }
}
