//! OpenAPI schema definitions for types owned by other crates.
//!
//! The `pagination` crate stays framework-agnostic and does not derive
//! `ToSchema`. The wrappers below mirror its serialised shape so the page
//! envelope appears in the OpenAPI document.

use utoipa::ToSchema;

use super::admissions_dto::AdmissionBody;

/// OpenAPI schema for the admission creation body.
///
/// The body is read by [`super::decoder::AdmissionBodyDecoder`] rather than a
/// serde derive, so the shape is declared here.
#[derive(ToSchema)]
#[schema(as = AdmissionRequest)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AdmissionRequestSchema {
    /// Hire date, not in the future.
    #[schema(rename = "dataAdmissao", value_type = String, format = Date, example = "2022-05-10")]
    hire_date: String,
    /// Gross salary, greater than zero. Numbers and numeric strings are accepted.
    #[schema(rename = "salarioBruto", value_type = f64, example = 3500.00)]
    gross_salary: String,
    /// Postal code, `12345-678` or `12345678`.
    #[schema(example = "66050-080")]
    cep: String,
}

/// OpenAPI schema for [`pagination::Direction`].
#[derive(ToSchema)]
#[schema(as = Direction)]
pub enum DirectionSchema {
    /// Ascending order.
    #[schema(rename = "ASC")]
    Asc,
    /// Descending order.
    #[schema(rename = "DESC")]
    Desc,
}

/// OpenAPI schema for [`pagination::SortOrder`].
#[derive(ToSchema)]
#[schema(as = SortOrder)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SortOrderSchema {
    /// Sorted property.
    #[schema(example = "criadoEm")]
    property: String,
    /// Sort direction.
    direction: DirectionSchema,
}

/// OpenAPI schema for a [`pagination::Page`] of admissions.
#[derive(ToSchema)]
#[schema(as = AdmissionPage, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AdmissionPageSchema {
    /// Records on this page.
    content: Vec<AdmissionBody>,
    /// Zero-based page index.
    #[schema(example = 0)]
    number: u32,
    /// Requested page size.
    #[schema(example = 20)]
    size: u32,
    /// Records matching the query across all pages.
    total_elements: u64,
    /// Pages available at this size.
    total_pages: u64,
    /// Records on this page.
    number_of_elements: u64,
    /// Whether this is the first page.
    first: bool,
    /// Whether no page follows this one.
    last: bool,
    /// Whether this page holds no records.
    empty: bool,
    /// Sort applied to the records.
    sort: SortOrderSchema,
}
