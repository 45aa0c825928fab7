//! Admission calculation HTTP handlers.
//!
//! ```text
//! POST /api/calculos {"dataAdmissao":"2022-05-10","salarioBruto":3500.00,"cep":"66050-080"}
//! GET /api/calculos?page=0&size=20&sort=criadoEm,desc
//! GET /api/calculos/por-data?inicio=2022-01-01&fim=2024-01-01
//! GET /api/calculos/por-salario?min=3000
//! GET /api/calculos/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use pagination::{Page, Sort};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::ports::{AdmissionPageRequest, AdmissionSortField};
use crate::domain::{Admission, AdmissionId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::admissions_dto::{AdmissionBody, AdmissionCreatedBody};
use crate::inbound::http::decoder::AdmissionBodyDecoder;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::schemas::{AdmissionPageSchema, AdmissionRequestSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_page_request, require_date, require_decimal,
};

const START: FieldName = FieldName::new("inicio");
const END: FieldName = FieldName::new("fim");
const MIN: FieldName = FieldName::new("min");

/// Paging parameters shared by the listing endpoints.
///
/// Values are kept as text so that parse failures name the parameter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index (default 0).
    #[param(value_type = Option<u32>, example = 0)]
    pub page: Option<String>,
    /// Page size (default 20, at least 1).
    #[param(value_type = Option<u32>, example = 20)]
    pub size: Option<String>,
    /// `property` or `property,asc|desc`.
    #[param(example = "salarioBruto,desc")]
    pub sort: Option<String>,
}

impl PageParams {
    fn into_request(
        self,
        default_sort: Sort<AdmissionSortField>,
    ) -> Result<AdmissionPageRequest, Error> {
        parse_page_request(
            self.page.as_deref(),
            self.size.as_deref(),
            self.sort.as_deref(),
            default_sort,
        )
    }
}

/// Inclusive hire date range.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeParams {
    /// First hire date (`yyyy-MM-dd`).
    #[param(value_type = String, format = Date, example = "2022-01-01")]
    pub inicio: Option<String>,
    /// Last hire date (`yyyy-MM-dd`).
    #[param(value_type = String, format = Date, example = "2024-01-01")]
    pub fim: Option<String>,
}

/// Salary floor.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SalaryFloorParams {
    /// Minimum gross salary, inclusive.
    #[param(value_type = f64, example = 3000)]
    pub min: Option<String>,
}

fn to_body(page: Page<Admission>) -> web::Json<Page<AdmissionBody>> {
    web::Json(page.map(AdmissionBody::from))
}

/// Register the admission routes under `/api/calculos`.
///
/// `/{id}` is registered last so the fixed sub-paths win.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/calculos")
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                Error::malformed(format!("Parâmetros de consulta inválidos: {err}")).into()
            }))
            .service(create_admission)
            .service(list_admissions)
            .service(list_admissions_by_hire_date)
            .service(list_admissions_by_salary)
            .service(get_admission),
    );
}

/// Compute tenure and percentage for an admission, store it and attach the
/// address of its postal code.
///
/// The record stays stored when the address lookup fails.
#[utoipa::path(
    post,
    path = "/api/calculos",
    request_body = AdmissionRequestSchema,
    responses(
        (status = 201, description = "Calculation stored and enriched", body = AdmissionCreatedBody),
        (status = 400, description = "Validation or decoding failure", body = ErrorEnvelope),
        (status = 422, description = "No address for the postal code", body = ErrorEnvelope),
        (status = 502, description = "Postal lookup service failed", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["calculos"],
    operation_id = "createCalculation"
)]
#[post("")]
pub async fn create_admission(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let draft = AdmissionBodyDecoder.decode(&body)?;
    let created = state.command.create_and_enrich(draft).await?;
    Ok(HttpResponse::Created().json(AdmissionCreatedBody::from(created)))
}

/// Page through stored calculations, newest first by default.
#[utoipa::path(
    get,
    path = "/api/calculos",
    params(PageParams),
    responses(
        (status = 200, description = "Page of calculations", body = AdmissionPageSchema),
        (status = 400, description = "Invalid paging parameters", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["calculos"],
    operation_id = "listCalculations"
)]
#[get("")]
pub async fn list_admissions(
    state: web::Data<HttpState>,
    paging: web::Query<PageParams>,
) -> ApiResult<web::Json<Page<AdmissionBody>>> {
    let request = paging
        .into_inner()
        .into_request(Sort::desc(AdmissionSortField::CreatedAt))?;
    Ok(to_body(state.query.list_all(request).await?))
}

/// Page through calculations hired within an inclusive date range.
#[utoipa::path(
    get,
    path = "/api/calculos/por-data",
    params(DateRangeParams, PageParams),
    responses(
        (status = 200, description = "Page of calculations", body = AdmissionPageSchema),
        (status = 400, description = "Missing or invalid parameters", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["calculos"],
    operation_id = "listCalculationsByHireDate"
)]
#[get("/por-data")]
pub async fn list_admissions_by_hire_date(
    state: web::Data<HttpState>,
    range: web::Query<DateRangeParams>,
    paging: web::Query<PageParams>,
) -> ApiResult<web::Json<Page<AdmissionBody>>> {
    let range = range.into_inner();
    let start = require_date(range.inicio.as_deref(), START)?;
    let end = require_date(range.fim.as_deref(), END)?;
    let request = paging
        .into_inner()
        .into_request(Sort::desc(AdmissionSortField::CreatedAt))?;
    Ok(to_body(
        state.query.filter_by_date_range(start, end, request).await?,
    ))
}

/// Page through calculations whose gross salary is at least `min`.
#[utoipa::path(
    get,
    path = "/api/calculos/por-salario",
    params(SalaryFloorParams, PageParams),
    responses(
        (status = 200, description = "Page of calculations", body = AdmissionPageSchema),
        (status = 400, description = "Missing or invalid parameters", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["calculos"],
    operation_id = "listCalculationsBySalary"
)]
#[get("/por-salario")]
pub async fn list_admissions_by_salary(
    state: web::Data<HttpState>,
    floor: web::Query<SalaryFloorParams>,
    paging: web::Query<PageParams>,
) -> ApiResult<web::Json<Page<AdmissionBody>>> {
    let min = require_decimal(floor.into_inner().min.as_deref(), MIN)?;
    let request = paging
        .into_inner()
        .into_request(Sort::desc(AdmissionSortField::GrossSalary))?;
    Ok(to_body(state.query.filter_by_salary_floor(min, request).await?))
}

/// Fetch one stored calculation.
#[utoipa::path(
    get,
    path = "/api/calculos/{id}",
    params(
        ("id" = String, Path, description = "Calculation identifier (UUID)")
    ),
    responses(
        (status = 200, description = "Stored calculation", body = AdmissionBody),
        (status = 400, description = "Identifier is not a UUID", body = ErrorEnvelope),
        (status = 404, description = "Not found", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["calculos"],
    operation_id = "getCalculation"
)]
#[get("/{id}")]
pub async fn get_admission(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AdmissionBody>> {
    let raw = path.into_inner();
    let id: AdmissionId = raw
        .parse()
        .map_err(|_| Error::malformed(format!("id: identificador inválido '{raw}'")))?;
    let admission = state.query.find_by_id(id).await?;
    Ok(web::Json(AdmissionBody::from(admission)))
}

#[cfg(test)]
#[path = "admissions_tests.rs"]
mod tests;
