//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Stored admissions.
    ///
    /// Rows are write-once: derived columns are computed before insert and
    /// never updated.
    admissions (id) {
        /// Primary key, generated by `gen_random_uuid()` on insert.
        id -> Uuid,
        /// Hire date.
        hire_date -> Date,
        /// Gross salary, strictly positive.
        gross_salary -> Numeric,
        /// Whole years between hire date and creation.
        tenure_years -> Int4,
        /// Months remaining after whole years.
        tenure_months -> Int4,
        /// Days remaining after whole months.
        tenure_days -> Int4,
        /// 35% of the gross salary.
        percentage_35 -> Numeric,
        /// Creation instant.
        created_at -> Timestamptz,
    }
}
