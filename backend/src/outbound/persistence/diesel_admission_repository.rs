//! PostgreSQL-backed `AdmissionRepository` implementation using Diesel ORM.
//!
//! Every method checks out a pooled connection and blocks until the query
//! completes. Pages are ordered by the requested sort and then by `id`
//! ascending so that offsets are stable across requests.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::dsl::count_star;
use diesel::pg::Pg;
use diesel::prelude::*;
use pagination::{Page, Sort};
use tracing::debug;

use crate::domain::ports::{
    AdmissionFilter, AdmissionPageRequest, AdmissionRepository, AdmissionRepositoryError,
    AdmissionSortField,
};
use crate::domain::{Admission, AdmissionId, NewAdmission};

use super::models::{AdmissionRow, NewAdmissionRow};
use super::pool::{DbPool, PoolError};
use super::schema::admissions;

/// Diesel-backed implementation of the admission repository port.
#[derive(Clone)]
pub struct DieselAdmissionRepository {
    pool: DbPool,
}

impl DieselAdmissionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn page(
        &self,
        filter: &AdmissionFilter,
        request: &AdmissionPageRequest,
    ) -> Result<Page<Admission>, AdmissionRepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let offset = i64::try_from(request.offset()).map_err(|_| {
            AdmissionRepositoryError::query(format!(
                "page offset {} exceeds the supported range",
                request.offset()
            ))
        })?;

        let total: i64 = filtered(filter)
            .select(count_star())
            .first(&mut conn)
            .map_err(map_diesel_error)?;
        let rows: Vec<AdmissionRow> = ordered(filtered(filter), request.sort())
            .offset(offset)
            .limit(i64::from(request.size()))
            .select(AdmissionRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;

        let content = rows.into_iter().map(Admission::from).collect();
        Ok(Page::new(content, request, u64::try_from(total).unwrap_or(0)))
    }
}

fn map_pool_error(error: PoolError) -> AdmissionRepositoryError {
    AdmissionRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> AdmissionRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "admission store connection closed");
            AdmissionRepositoryError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "admission store query failed");
            AdmissionRepositoryError::query(info.message().to_owned())
        }
        other => {
            debug!(error = %other, "admission store query failed");
            AdmissionRepositoryError::query(other.to_string())
        }
    }
}

fn filtered(filter: &AdmissionFilter) -> admissions::BoxedQuery<'static, Pg> {
    let query = admissions::table.into_boxed();
    match filter {
        AdmissionFilter::All => query,
        AdmissionFilter::HireDateBetween { start, end } => {
            query.filter(admissions::hire_date.between(*start, *end))
        }
        AdmissionFilter::GrossSalaryAtLeast { min } => {
            query.filter(admissions::gross_salary.ge(min.clone()))
        }
    }
}

fn ordered(
    query: admissions::BoxedQuery<'static, Pg>,
    sort: &Sort<AdmissionSortField>,
) -> admissions::BoxedQuery<'static, Pg> {
    macro_rules! order_by {
        ($column:expr) => {
            if sort.direction().is_ascending() {
                query.order_by($column.asc())
            } else {
                query.order_by($column.desc())
            }
        };
    }

    let query = match sort.property() {
        AdmissionSortField::Id => order_by!(admissions::id),
        AdmissionSortField::HireDate => order_by!(admissions::hire_date),
        AdmissionSortField::GrossSalary => order_by!(admissions::gross_salary),
        AdmissionSortField::Years => order_by!(admissions::tenure_years),
        AdmissionSortField::Months => order_by!(admissions::tenure_months),
        AdmissionSortField::Days => order_by!(admissions::tenure_days),
        AdmissionSortField::Percentage35 => order_by!(admissions::percentage_35),
        AdmissionSortField::CreatedAt => order_by!(admissions::created_at),
    };
    query.then_order_by(admissions::id.asc())
}

impl AdmissionRepository for DieselAdmissionRepository {
    fn insert(&self, admission: NewAdmission) -> Result<Admission, AdmissionRepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = NewAdmissionRow::from(&admission);

        diesel::insert_into(admissions::table)
            .values(&row)
            .returning(AdmissionRow::as_returning())
            .get_result(&mut conn)
            .map(Admission::from)
            .map_err(map_diesel_error)
    }

    fn find_by_id(&self, id: &AdmissionId) -> Result<Option<Admission>, AdmissionRepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        admissions::table
            .filter(admissions::id.eq(id.as_uuid()))
            .select(AdmissionRow::as_select())
            .first::<AdmissionRow>(&mut conn)
            .optional()
            .map(|row| row.map(Admission::from))
            .map_err(map_diesel_error)
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
