//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning every
//! failure into the same JSON envelope. The mapping from [`ErrorCode`] to
//! status and category label is one total function.

use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, RequestContext};

/// Response header carrying the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

const INTERNAL_PREFIX: &str = "Erro interno: ";

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Uniform error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Instant the error was produced (RFC 3339).
    #[schema(value_type = String, format = DateTime, example = "2025-07-05T12:00:00Z")]
    pub timestamp: DateTime<Utc>,
    /// HTTP status code.
    #[schema(example = 400)]
    pub status: u16,
    /// Category label.
    #[schema(example = "Validation Error")]
    pub error: String,
    /// One message per failure.
    #[schema(example = json!(["cep: cep é obrigatório"]))]
    pub messages: Vec<String>,
    /// Request path, when known.
    #[schema(example = "/api/calculos")]
    pub path: Option<String>,
}

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::MalformedRequest
        | ErrorCode::ConstraintViolation => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn category_for(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::ValidationFailed => "Validation Error",
        ErrorCode::MalformedRequest => "Malformed Request",
        ErrorCode::ConstraintViolation => "Constraint Violation",
        ErrorCode::NotFound => "Not Found",
        ErrorCode::UnprocessableEntity => "API Error",
        ErrorCode::UpstreamUnavailable => "Upstream Error",
        ErrorCode::InternalError => "Internal Server Error",
    }
}

impl ErrorEnvelope {
    /// Build the envelope for `error`, reading the path from `context`.
    pub fn from_error(error: &Error, context: Option<&RequestContext>, now: DateTime<Utc>) -> Self {
        let messages = match error.code() {
            ErrorCode::InternalError => error
                .messages()
                .iter()
                .map(|message| format!("{INTERNAL_PREFIX}{message}"))
                .collect(),
            _ => error.messages().to_vec(),
        };
        Self {
            timestamp: now,
            status: status_for(error.code()).as_u16(),
            error: category_for(error.code()).to_owned(),
            messages,
            path: context.map(|ctx| ctx.path().to_owned()),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let context = RequestContext::current();
        let status = self.status_code();
        let trace_id = context.as_ref().map(RequestContext::trace_id);
        if status.is_server_error() {
            error!(code = ?self.code(), messages = ?self.messages(), ?trace_id, "request failed");
        } else {
            debug!(code = ?self.code(), messages = ?self.messages(), ?trace_id, "request rejected");
        }

        let mut builder = HttpResponse::build(status);
        if let Some(value) = trace_id.and_then(|id| HeaderValue::from_str(&id.to_string()).ok()) {
            builder.insert_header((HeaderName::from_static(TRACE_ID_HEADER), value));
        }
        builder.json(ErrorEnvelope::from_error(self, context.as_ref(), Utc::now()))
    }
}
