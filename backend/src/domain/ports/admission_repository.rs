//! Driven port for admission storage.
//!
//! The store assigns identifiers on insert and answers three page-shaped
//! queries. Implementations block the calling thread; callers dispatch them
//! through [`crate::domain::BlockingExecutor`].

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use pagination::{Page, PageRequest};

use crate::domain::{Admission, AdmissionId, NewAdmission};

use super::define_port_error;

define_port_error! {
    /// Errors raised by admission store adapters.
    pub enum AdmissionRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "admission repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "admission repository query failed: {message}",
    }
}

/// Admission attributes a page may be sorted by.
///
/// Each key carries the property name clients use in `sort` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdmissionSortField {
    /// `id`
    Id,
    /// `dataAdmissao`
    HireDate,
    /// `salarioBruto`
    GrossSalary,
    /// `anos`
    Years,
    /// `meses`
    Months,
    /// `dias`
    Days,
    /// `porcentagem35`
    Percentage35,
    /// `criadoEm`
    CreatedAt,
}

impl AdmissionSortField {
    /// Every sortable key.
    pub const ALL: [Self; 8] = [
        Self::Id,
        Self::HireDate,
        Self::GrossSalary,
        Self::Years,
        Self::Months,
        Self::Days,
        Self::Percentage35,
        Self::CreatedAt,
    ];

    /// Client-facing property name.
    pub const fn property(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::HireDate => "dataAdmissao",
            Self::GrossSalary => "salarioBruto",
            Self::Years => "anos",
            Self::Months => "meses",
            Self::Days => "dias",
            Self::Percentage35 => "porcentagem35",
            Self::CreatedAt => "criadoEm",
        }
    }

    /// Resolve a client-facing property name.
    ///
    /// # Examples
    /// ```
    /// use admissions::domain::ports::AdmissionSortField;
    ///
    /// assert_eq!(
    ///     AdmissionSortField::from_property("salarioBruto"),
    ///     Some(AdmissionSortField::GrossSalary)
    /// );
    /// assert_eq!(AdmissionSortField::from_property("salary"), None);
    /// ```
    pub fn from_property(property: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.property() == property)
    }
}

impl AsRef<str> for AdmissionSortField {
    fn as_ref(&self) -> &str {
        self.property()
    }
}

/// Page request sorted by an admission attribute.
pub type AdmissionPageRequest = PageRequest<AdmissionSortField>;

/// Record selection shared by the query shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionFilter {
    /// Every stored admission.
    All,
    /// Hire date within `[start, end]`, both ends inclusive.
    HireDateBetween {
        /// First admitted hire date.
        start: NaiveDate,
        /// Last admitted hire date.
        end: NaiveDate,
    },
    /// Gross salary greater than or equal to `min`.
    GrossSalaryAtLeast {
        /// Salary floor.
        min: BigDecimal,
    },
}

impl AdmissionFilter {
    /// Whether `admission` is selected by this filter.
    pub fn matches(&self, admission: &Admission) -> bool {
        match self {
            Self::All => true,
            Self::HireDateBetween { start, end } => {
                (*start..=*end).contains(&admission.hire_date())
            }
            Self::GrossSalaryAtLeast { min } => admission.gross_salary() >= min,
        }
    }
}

/// Port for inserting and paging admissions.
///
/// Every method may block; it must not be called from an async executor
/// thread.
#[cfg_attr(test, mockall::automock)]
pub trait AdmissionRepository: Send + Sync {
    /// Store a pending admission and return it with its assigned identifier.
    fn insert(&self, admission: NewAdmission) -> Result<Admission, AdmissionRepositoryError>;

    /// Load one admission.
    fn find_by_id(&self, id: &AdmissionId) -> Result<Option<Admission>, AdmissionRepositoryError>;

    /// Page through every admission.
    fn find_all(
        &self,
        page: &AdmissionPageRequest,
    ) -> Result<Page<Admission>, AdmissionRepositoryError>;

    /// Page through admissions hired within `[start, end]`.
    fn find_by_hire_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        page: &AdmissionPageRequest,
    ) -> Result<Page<Admission>, AdmissionRepositoryError>;

    /// Page through admissions earning at least `min`.
    fn find_by_gross_salary_at_least(
        &self,
        min: &BigDecimal,
        page: &AdmissionPageRequest,
    ) -> Result<Page<Admission>, AdmissionRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use std::str::FromStr;

    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::domain::Tenure;

    fn admission(hire_date: NaiveDate, salary: &str) -> Admission {
        let salary = BigDecimal::from_str(salary).expect("decimal");
        NewAdmission::from_parts(
            hire_date,
            salary.clone(),
            Tenure::default(),
            crate::domain::percentage_35(&salary),
            Utc::now(),
        )
        .with_id(AdmissionId::from_uuid(Uuid::new_v4()))
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[rstest]
    fn every_property_round_trips() {
        for field in AdmissionSortField::ALL {
            assert_eq!(AdmissionSortField::from_property(field.property()), Some(field));
        }
    }

    #[rstest]
    #[case::before(date(2021, 12, 31), false)]
    #[case::start(date(2022, 1, 1), true)]
    #[case::inside(date(2023, 6, 15), true)]
    #[case::end(date(2024, 1, 1), true)]
    #[case::after(date(2024, 1, 2), false)]
    fn hire_date_range_is_inclusive(#[case] hire_date: NaiveDate, #[case] expected: bool) {
        let filter = AdmissionFilter::HireDateBetween {
            start: date(2022, 1, 1),
            end: date(2024, 1, 1),
        };
        assert_eq!(filter.matches(&admission(hire_date, "1000")), expected);
    }

    #[rstest]
    #[case("2999.99", false)]
    #[case("3000", true)]
    #[case("3000.01", true)]
    fn salary_floor_is_inclusive(#[case] salary: &str, #[case] expected: bool) {
        let filter = AdmissionFilter::GrossSalaryAtLeast {
            min: BigDecimal::from_str("3000.00").expect("decimal"),
        };
        assert_eq!(filter.matches(&admission(date(2022, 1, 1), salary)), expected);
    }
}
