//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request was decoded but fails one or more field rules.
    ValidationFailed,
    /// The request could not be decoded at all.
    MalformedRequest,
    /// A parameter is well formed but outside its accepted range.
    ConstraintViolation,
    /// The requested resource does not exist.
    NotFound,
    /// A business rule rejected an otherwise valid request.
    UnprocessableEntity,
    /// A remote dependency failed or timed out.
    UpstreamUnavailable,
    /// An unexpected error occurred inside the service.
    InternalError,
}

impl ErrorCode {
    const fn fallback_message(self) -> &'static str {
        match self {
            Self::ValidationFailed => "request validation failed",
            Self::MalformedRequest => "request could not be decoded",
            Self::ConstraintViolation => "parameter outside accepted range",
            Self::NotFound => "resource not found",
            Self::UnprocessableEntity => "request rejected",
            Self::UpstreamUnavailable => "upstream dependency unavailable",
            Self::InternalError => "internal error",
        }
    }
}

/// Validation errors emitted by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// No message, or only blank messages, were supplied.
    #[error("error messages must not be empty")]
    EmptyMessages,
}

/// Domain error payload.
///
/// ## Invariants
/// - `messages` holds at least one non-blank entry.
///
/// # Examples
/// ```
/// use admissions::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.messages(), ["missing"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    messages: Vec<String>,
}

impl Error {
    /// Fallible constructor that rejects an empty message list.
    pub fn try_new(code: ErrorCode, messages: Vec<String>) -> Result<Self, ErrorValidationError> {
        let messages: Vec<String> = messages
            .into_iter()
            .filter(|message| !message.trim().is_empty())
            .collect();
        if messages.is_empty() {
            return Err(ErrorValidationError::EmptyMessages);
        }
        Ok(Self { code, messages })
    }

    /// Create an error carrying one message.
    ///
    /// A blank message is replaced by a generic description of `code`.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::with_messages(code, vec![message.into()])
    }

    /// Create an error carrying several messages.
    ///
    /// Blank entries are dropped; if none remain a generic description of
    /// `code` is used instead.
    pub fn with_messages(code: ErrorCode, messages: Vec<String>) -> Self {
        Self::try_new(code, messages).unwrap_or_else(|_| Self {
            code,
            messages: vec![code.fallback_message().to_owned()],
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable messages, one per offending field or cause.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Consume the error and return its messages.
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailed`].
    pub fn validation(messages: Vec<String>) -> Self {
        Self::with_messages(ErrorCode::ValidationFailed, messages)
    }

    /// Convenience constructor for [`ErrorCode::MalformedRequest`].
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::ConstraintViolation`].
    pub fn constraint_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConstraintViolation, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::UnprocessableEntity`].
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnprocessableEntity, message)
    }

    /// Convenience constructor for [`ErrorCode::UpstreamUnavailable`].
    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join("; "))
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn try_new_rejects_blank_messages() {
        let result = Error::try_new(ErrorCode::ValidationFailed, vec!["  ".to_owned()]);
        assert_eq!(result, Err(ErrorValidationError::EmptyMessages));
    }

    #[rstest]
    fn with_messages_drops_blank_entries() {
        let err = Error::validation(vec![
            "cep: cep é obrigatório".to_owned(),
            String::new(),
            "salarioBruto: salarioBruto é obrigatório".to_owned(),
        ]);
        assert_eq!(err.messages().len(), 2);
        assert_eq!(
            err.to_string(),
            "cep: cep é obrigatório; salarioBruto: salarioBruto é obrigatório"
        );
    }

    #[rstest]
    #[case(ErrorCode::NotFound)]
    #[case(ErrorCode::InternalError)]
    fn blank_message_falls_back_to_code_description(#[case] code: ErrorCode) {
        let err = Error::new(code, "");
        assert_eq!(err.code(), code);
        assert_eq!(err.messages(), [code.fallback_message()]);
    }

    #[rstest]
    fn serialises_codes_in_snake_case() {
        let value = serde_json::to_value(ErrorCode::UpstreamUnavailable).expect("serialise code");
        assert_eq!(value, serde_json::json!("upstream_unavailable"));
    }
}
