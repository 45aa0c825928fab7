//! Admission domain service.
//!
//! Creation runs as one ordered pipeline: validate, compute tenure and
//! percentage, persist on the blocking pool, then resolve the address for
//! the stored record. Queries forward to the store through the same pool.

use std::sync::Arc;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use mockable::Clock;
use pagination::Page;
use tracing::{debug, info, instrument};

use crate::domain::ports::{
    AddressLookup, AddressLookupError, AdmissionCommand, AdmissionPageRequest, AdmissionQuery,
    AdmissionRepository, AdmissionRepositoryError,
};
use crate::domain::{
    Admission, AdmissionDraft, AdmissionId, AdmissionRequest, BlockingExecutor,
    BlockingTaskError, EnrichedAdmission, Error, NewAdmission,
};

fn map_repository_error(error: AdmissionRepositoryError) -> Error {
    match error {
        AdmissionRepositoryError::Connection { message } => {
            Error::internal(format!("admission store unavailable: {message}"))
        }
        AdmissionRepositoryError::Query { message } => {
            Error::internal(format!("admission store error: {message}"))
        }
    }
}

fn map_dispatch_error(error: BlockingTaskError) -> Error {
    Error::internal(format!("admission store dispatch failed: {error}"))
}

fn map_lookup_error(error: AddressLookupError) -> Error {
    Error::upstream_unavailable(format!("Falha ao consultar o ViaCEP: {error}"))
}

/// Service implementing the admission driving ports.
pub struct AdmissionService<R, L> {
    repository: Arc<R>,
    lookup: Arc<L>,
    clock: Arc<dyn Clock>,
    executor: BlockingExecutor,
}

impl<R, L> Clone for AdmissionService<R, L> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            lookup: Arc::clone(&self.lookup),
            clock: Arc::clone(&self.clock),
            executor: self.executor.clone(),
        }
    }
}

impl<R, L> AdmissionService<R, L> {
    /// Create a service over a store, an address lookup and a clock.
    ///
    /// Store calls are dispatched through `executor`.
    pub fn new(
        repository: Arc<R>,
        lookup: Arc<L>,
        clock: Arc<dyn Clock>,
        executor: BlockingExecutor,
    ) -> Self {
        Self {
            repository,
            lookup,
            clock,
            executor,
        }
    }
}

impl<R, L> AdmissionService<R, L>
where
    R: AdmissionRepository + 'static,
{
    async fn with_store<F, T>(&self, work: F) -> Result<T, Error>
    where
        F: FnOnce(&R) -> Result<T, AdmissionRepositoryError> + Send + 'static,
        T: Send + 'static,
    {
        let repository = Arc::clone(&self.repository);
        self.executor
            .run(move || work(&repository))
            .await
            .map_err(map_dispatch_error)?
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R, L> AdmissionCommand for AdmissionService<R, L>
where
    R: AdmissionRepository + 'static,
    L: AddressLookup,
{
    #[instrument(skip_all)]
    async fn create_and_enrich(&self, draft: AdmissionDraft) -> Result<EnrichedAdmission, Error> {
        let now = self.clock.utc();
        let today = self.clock.local().date_naive();
        let request = AdmissionRequest::validate(draft, today)?;
        let pending = NewAdmission::compute(&request, today, now);

        let admission = self
            .with_store(move |repository| repository.insert(pending))
            .await?;
        info!(admission_id = %admission.id(), "admission stored");

        let code = request.postal_code();
        let address = self
            .lookup
            .lookup(code)
            .await
            .map_err(map_lookup_error)?
            .ok_or_else(|| {
                debug!(admission_id = %admission.id(), cep = %code, "postal code has no match");
                Error::unprocessable(format!(
                    "ViaCEP não retornou dados para o CEP: {}",
                    code.as_str()
                ))
            })?;

        Ok(EnrichedAdmission { admission, address })
    }
}

#[async_trait]
impl<R, L> AdmissionQuery for AdmissionService<R, L>
where
    R: AdmissionRepository + 'static,
    L: Send + Sync,
{
    async fn find_by_id(&self, id: AdmissionId) -> Result<Admission, Error> {
        self.with_store(move |repository| repository.find_by_id(&id))
            .await?
            .ok_or_else(|| Error::not_found(format!("Cálculo não encontrado: {id}")))
    }

    async fn list_all(&self, page: AdmissionPageRequest) -> Result<Page<Admission>, Error> {
        self.with_store(move |repository| repository.find_all(&page))
            .await
    }

    async fn filter_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        page: AdmissionPageRequest,
    ) -> Result<Page<Admission>, Error> {
        self.with_store(move |repository| repository.find_by_hire_date_between(start, end, &page))
            .await
    }

    async fn filter_by_salary_floor(
        &self,
        min: BigDecimal,
        page: AdmissionPageRequest,
    ) -> Result<Page<Admission>, Error> {
        self.with_store(move |repository| repository.find_by_gross_salary_at_least(&min, &page))
            .await
    }
}

#[cfg(test)]
#[path = "admission_service_tests.rs"]
mod tests;
