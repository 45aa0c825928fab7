//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every admission endpoint, the health probes and the
//! schema wrappers for types owned by the `pagination` crate. The document is
//! served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::OpenApi;

use crate::inbound::http::admissions_dto::{AddressBody, AdmissionBody, AdmissionCreatedBody};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::schemas::{
    AdmissionPageSchema, AdmissionRequestSchema, DirectionSchema, SortOrderSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Admissions API",
        description = "Tenure and 35% salary calculations enriched with ViaCEP addresses."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::admissions::create_admission,
        crate::inbound::http::admissions::list_admissions,
        crate::inbound::http::admissions::list_admissions_by_hire_date,
        crate::inbound::http::admissions::list_admissions_by_salary,
        crate::inbound::http::admissions::get_admission,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AdmissionRequestSchema,
        AdmissionBody,
        AdmissionCreatedBody,
        AddressBody,
        AdmissionPageSchema,
        SortOrderSchema,
        DirectionSchema,
        ErrorEnvelope,
        ProbeStatus
    )),
    tags(
        (name = "calculos", description = "Admission calculations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
