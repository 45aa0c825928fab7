//! Diesel row structs for the `admissions` table.
//!
//! Internal to the persistence adapter; the domain never sees them.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::admissions;
use crate::domain::{Admission, AdmissionId, NewAdmission, Tenure};

/// Row struct for reading from the admissions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = admissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AdmissionRow {
    pub id: Uuid,
    pub hire_date: NaiveDate,
    pub gross_salary: BigDecimal,
    pub tenure_years: i32,
    pub tenure_months: i32,
    pub tenure_days: i32,
    pub percentage_35: BigDecimal,
    pub created_at: DateTime<Utc>,
}

impl From<AdmissionRow> for Admission {
    fn from(row: AdmissionRow) -> Self {
        let AdmissionRow {
            id,
            hire_date,
            gross_salary,
            tenure_years,
            tenure_months,
            tenure_days,
            percentage_35,
            created_at,
        } = row;
        NewAdmission::from_parts(
            hire_date,
            gross_salary,
            Tenure::from_parts(tenure_years, tenure_months, tenure_days),
            percentage_35,
            created_at,
        )
        .with_id(AdmissionId::from_uuid(id))
    }
}

/// Insertable struct; `id` is left to the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = admissions)]
pub(crate) struct NewAdmissionRow<'a> {
    pub hire_date: NaiveDate,
    pub gross_salary: &'a BigDecimal,
    pub tenure_years: i32,
    pub tenure_months: i32,
    pub tenure_days: i32,
    pub percentage_35: &'a BigDecimal,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a NewAdmission> for NewAdmissionRow<'a> {
    fn from(admission: &'a NewAdmission) -> Self {
        let tenure = admission.tenure();
        Self {
            hire_date: admission.hire_date(),
            gross_salary: admission.gross_salary(),
            tenure_years: tenure.years(),
            tenure_months: tenure.months(),
            tenure_days: tenure.days(),
            percentage_35: admission.percentage_35(),
            created_at: admission.created_at(),
        }
    }
}
