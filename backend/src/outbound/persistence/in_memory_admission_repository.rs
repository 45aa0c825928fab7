//! Process-local `AdmissionRepository` used when no database is configured.
//!
//! Ordering and filtering mirror the Diesel adapter: requested sort, then
//! `id` ascending; hire date ranges include both ends.

use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard};

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use pagination::{Page, Sort};
use uuid::Uuid;

use crate::domain::ports::{
    AdmissionFilter, AdmissionPageRequest, AdmissionRepository, AdmissionRepositoryError,
    AdmissionSortField,
};
use crate::domain::{Admission, AdmissionId, NewAdmission};

/// Mutex-guarded vector of stored admissions.
#[derive(Debug, Default)]
pub struct InMemoryAdmissionRepository {
    rows: Mutex<Vec<Admission>>,
}

impl InMemoryAdmissionRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> Result<MutexGuard<'_, Vec<Admission>>, AdmissionRepositoryError> {
        self.rows
            .lock()
            .map_err(|_| AdmissionRepositoryError::connection("in-memory store lock poisoned"))
    }

    fn page(
        &self,
        filter: &AdmissionFilter,
        request: &AdmissionPageRequest,
    ) -> Result<Page<Admission>, AdmissionRepositoryError> {
        let mut selected: Vec<Admission> = self
            .rows()?
            .iter()
            .filter(|admission| filter.matches(admission))
            .cloned()
            .collect();
        selected.sort_by(|left, right| compare(left, right, request.sort()));

        let total = selected.len() as u64;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = selected
            .into_iter()
            .skip(skip)
            .take(request.size() as usize)
            .collect();
        Ok(Page::new(content, request, total))
    }
}

fn compare(left: &Admission, right: &Admission, sort: &Sort<AdmissionSortField>) -> Ordering {
    let by_key = match sort.property() {
        AdmissionSortField::Id => left.id().cmp(&right.id()),
        AdmissionSortField::HireDate => left.hire_date().cmp(&right.hire_date()),
        AdmissionSortField::GrossSalary => left.gross_salary().cmp(right.gross_salary()),
        AdmissionSortField::Years => left.tenure().years().cmp(&right.tenure().years()),
        AdmissionSortField::Months => left.tenure().months().cmp(&right.tenure().months()),
        AdmissionSortField::Days => left.tenure().days().cmp(&right.tenure().days()),
        AdmissionSortField::Percentage35 => left.percentage_35().cmp(right.percentage_35()),
        AdmissionSortField::CreatedAt => left.created_at().cmp(&right.created_at()),
    };
    let by_key = if sort.direction().is_ascending() {
        by_key
    } else {
        by_key.reverse()
    };
    by_key.then_with(|| left.id().cmp(&right.id()))
}

impl AdmissionRepository for InMemoryAdmissionRepository {
    fn insert(&self, admission: NewAdmission) -> Result<Admission, AdmissionRepositoryError> {
        let stored = admission.with_id(AdmissionId::from_uuid(Uuid::new_v4()));
        self.rows()?.push(stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, id: &AdmissionId) -> Result<Option<Admission>, AdmissionRepositoryError> {
        Ok(self
            .rows()?
            .iter()
            .find(|admission| admission.id() == *id)
            .cloned())
    }

    fn find_all(
        &self,
        page: &AdmissionPageRequest,
    ) -> Result<Page<Admission>, AdmissionRepositoryError> {
        self.page(&AdmissionFilter::All, page)
    }

    fn find_by_hire_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        page: &AdmissionPageRequest,
    ) -> Result<Page<Admission>, AdmissionRepositoryError> {
        self.page(&AdmissionFilter::HireDateBetween { start, end }, page)
    }

    fn find_by_gross_salary_at_least(
        &self,
        min: &BigDecimal,
        page: &AdmissionPageRequest,
    ) -> Result<Page<Admission>, AdmissionRepositoryError> {
        self.page(
            &AdmissionFilter::GrossSalaryAtLeast { min: min.clone() },
            page,
        )
    }
}

#[cfg(test)]
#[path = "in_memory_admission_repository_tests.rs"]
mod tests;
