//! Driving port for admission creation.

use async_trait::async_trait;

use crate::domain::{AdmissionDraft, EnrichedAdmission, Error};

/// Use-case port for creating an admission and enriching it with its address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdmissionCommand: Send + Sync {
    /// Validate `draft`, derive tenure and percentage, store the admission
    /// and resolve its postal code.
    ///
    /// The admission stays stored when the address lookup fails or finds
    /// nothing.
    async fn create_and_enrich(&self, draft: AdmissionDraft) -> Result<EnrichedAdmission, Error>;
}
