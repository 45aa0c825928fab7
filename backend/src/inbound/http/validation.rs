//! Query parameter parsing shared by the admission handlers.
//!
//! Parameters arrive as raw strings so that every failure produces a
//! deterministic message naming the parameter.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use pagination::{DEFAULT_PAGE_SIZE, PageRequest, Sort};

use crate::domain::Error;
use crate::domain::ports::{AdmissionPageRequest, AdmissionSortField};

/// Newtype wrapper for query parameter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

const PAGE: FieldName = FieldName::new("page");
const SIZE: FieldName = FieldName::new("size");

pub(crate) fn missing_parameter_error(field: FieldName) -> Error {
    Error::malformed(format!(
        "Parâmetro obrigatório ausente: {}",
        field.as_str()
    ))
}

fn invalid_integer_error(field: FieldName, value: &str) -> Error {
    Error::malformed(format!(
        "{}: valor inválido '{value}'. Informe um número inteiro",
        field.as_str()
    ))
}

fn parse_integer(value: Option<&str>, field: FieldName, default: i64) -> Result<i64, Error> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| invalid_integer_error(field, raw)),
    }
}

fn bounded(value: i64, field: FieldName, min: i64) -> Result<u32, Error> {
    if value < min {
        return Err(Error::constraint_violation(format!(
            "{}: deve ser maior ou igual a {min}",
            field.as_str()
        )));
    }
    u32::try_from(value).map_err(|_| {
        Error::constraint_violation(format!(
            "{}: deve ser menor ou igual a {}",
            field.as_str(),
            u32::MAX
        ))
    })
}

fn parse_sort(
    value: Option<&str>,
    default: Sort<AdmissionSortField>,
) -> Sort<AdmissionSortField> {
    value
        .and_then(Sort::parse)
        .and_then(|parsed| {
            parsed
                .try_map(|property| AdmissionSortField::from_property(&property).ok_or(()))
                .ok()
        })
        .unwrap_or(default)
}

/// Build a page request from raw `page`, `size` and `sort` parameters.
///
/// Defaults: page 0, size 20, `default_sort` when `sort` is absent, blank
/// or names an unknown property. An unrecognised direction token sorts
/// descending.
pub(crate) fn parse_page_request(
    page: Option<&str>,
    size: Option<&str>,
    sort: Option<&str>,
    default_sort: Sort<AdmissionSortField>,
) -> Result<AdmissionPageRequest, Error> {
    let page = bounded(parse_integer(page, PAGE, 0)?, PAGE, 0)?;
    let size = bounded(
        parse_integer(size, SIZE, i64::from(DEFAULT_PAGE_SIZE))?,
        SIZE,
        1,
    )?;
    let sort = parse_sort(sort, default_sort);
    PageRequest::new(page, size, sort).map_err(|err| Error::constraint_violation(err.to_string()))
}

/// Parse a required ISO date (`yyyy-MM-dd`).
pub(crate) fn require_date(value: Option<&str>, field: FieldName) -> Result<NaiveDate, Error> {
    let raw = value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| missing_parameter_error(field))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        Error::malformed(format!(
            "{}: formato inválido. Use yyyy-MM-dd",
            field.as_str()
        ))
    })
}

/// Parse a required decimal.
pub(crate) fn require_decimal(value: Option<&str>, field: FieldName) -> Result<BigDecimal, Error> {
    let raw = value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| missing_parameter_error(field))?;
    BigDecimal::from_str(raw).map_err(|_| {
        Error::malformed(format!("Valor inválido para o campo {}.", field.as_str()))
    })
}
