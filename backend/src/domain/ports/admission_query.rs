//! Driving port for reading stored admissions.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use pagination::Page;

use crate::domain::{Admission, AdmissionId, Error};

use super::AdmissionPageRequest;

/// Use-case port for admission lookups and paged listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdmissionQuery: Send + Sync {
    /// Load one admission, failing with `NotFound` when absent.
    async fn find_by_id(&self, id: AdmissionId) -> Result<Admission, Error>;

    /// Page through every admission.
    async fn list_all(&self, page: AdmissionPageRequest) -> Result<Page<Admission>, Error>;

    /// Page through admissions hired within `[start, end]`.
    async fn filter_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        page: AdmissionPageRequest,
    ) -> Result<Page<Admission>, Error>;

    /// Page through admissions earning at least `min`.
    async fn filter_by_salary_floor(
        &self,
        min: BigDecimal,
        page: AdmissionPageRequest,
    ) -> Result<Page<Admission>, Error>;
}
