//! Decoder for the admission creation body.
//!
//! The body is parsed into a `serde_json::Value` first and each field is then
//! extracted by name. A failure reports the field and the shape that was
//! expected, so the client message never depends on parser internals.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::domain::{AdmissionDraft, Error};

pub(crate) const HIRE_DATE_FIELD: &str = "dataAdmissao";
pub(crate) const GROSS_SALARY_FIELD: &str = "salarioBruto";
pub(crate) const POSTAL_CODE_FIELD: &str = "cep";

/// Shape a body position was expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedShape {
    /// The whole body: a JSON object.
    Object,
    /// An ISO calendar date string.
    Date,
    /// A decimal number or numeric string.
    Decimal,
    /// A string.
    Text,
}

/// What was found instead of the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// The bytes are not JSON. Carries the parser's description.
    Syntax(String),
    /// The JSON type does not match.
    WrongType,
    /// The type matches but the text does not parse.
    Unparseable,
}

/// Deterministic decoding failure for the creation body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyDecodeError {
    /// Offending field, `None` for the body itself.
    pub field: Option<&'static str>,
    /// Shape that was expected at that position.
    pub expected: ExpectedShape,
    /// What went wrong.
    pub failure: DecodeFailure,
}

impl BodyDecodeError {
    fn body(failure: DecodeFailure) -> Self {
        Self {
            field: None,
            expected: ExpectedShape::Object,
            failure,
        }
    }

    fn field(field: &'static str, expected: ExpectedShape, failure: DecodeFailure) -> Self {
        Self {
            field: Some(field),
            expected,
            failure,
        }
    }
}

impl fmt::Display for BodyDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(field) = self.field else {
            let detail = match &self.failure {
                DecodeFailure::Syntax(detail) => detail.as_str(),
                _ => "O corpo deve ser um objeto JSON.",
            };
            return write!(f, "Corpo da requisição inválido (JSON malformado). {detail}");
        };
        match (&self.failure, self.expected) {
            (DecodeFailure::Unparseable, ExpectedShape::Date) => {
                write!(f, "{field}: formato inválido. Use yyyy-MM-dd")
            }
            (DecodeFailure::Unparseable, _) => write!(f, "Valor inválido para o campo {field}."),
            _ => write!(
                f,
                "Tipo de dado inválido para o campo {field}. Verifique o JSON."
            ),
        }
    }
}

impl std::error::Error for BodyDecodeError {}

impl From<BodyDecodeError> for Error {
    fn from(err: BodyDecodeError) -> Self {
        Error::malformed(err.to_string())
    }
}

/// Decodes raw request bytes into an [`AdmissionDraft`].
///
/// Unknown fields are ignored and `null` counts as absent, leaving the
/// required-field checks to domain validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdmissionBodyDecoder;

impl AdmissionBodyDecoder {
    /// Decode `bytes`, stopping at the first field that cannot be read.
    ///
    /// # Examples
    /// ```
    /// use admissions::inbound::http::decoder::AdmissionBodyDecoder;
    ///
    /// let draft = AdmissionBodyDecoder
    ///     .decode(br#"{"dataAdmissao":"2022-05-10","salarioBruto":3500.00,"cep":"66050-080"}"#)
    ///     .expect("valid body");
    /// assert_eq!(draft.postal_code.as_deref(), Some("66050-080"));
    /// assert_eq!(draft.gross_salary.map(|s| s.to_string()).as_deref(), Some("3500.00"));
    /// ```
    pub fn decode(&self, bytes: &[u8]) -> Result<AdmissionDraft, BodyDecodeError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|err| BodyDecodeError::body(DecodeFailure::Syntax(err.to_string())))?;
        let Value::Object(object) = value else {
            return Err(BodyDecodeError::body(DecodeFailure::WrongType));
        };

        Ok(AdmissionDraft {
            hire_date: date_field(&object, HIRE_DATE_FIELD)?,
            gross_salary: decimal_field(&object, GROSS_SALARY_FIELD)?,
            postal_code: text_field(&object, POSTAL_CODE_FIELD)?,
        })
    }
}

fn present<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|value| !value.is_null())
}

fn date_field(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<NaiveDate>, BodyDecodeError> {
    let Some(value) = present(object, field) else {
        return Ok(None);
    };
    let Value::String(raw) = value else {
        return Err(BodyDecodeError::field(
            field,
            ExpectedShape::Date,
            DecodeFailure::WrongType,
        ));
    };
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(Some)
        .map_err(|_| BodyDecodeError::field(field, ExpectedShape::Date, DecodeFailure::Unparseable))
}

fn decimal_field(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<BigDecimal>, BodyDecodeError> {
    let Some(value) = present(object, field) else {
        return Ok(None);
    };
    // With `arbitrary_precision` a number's `to_string` is its source text.
    let raw = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_owned(),
        _ => {
            return Err(BodyDecodeError::field(
                field,
                ExpectedShape::Decimal,
                DecodeFailure::WrongType,
            ));
        }
    };
    BigDecimal::from_str(&raw).map(Some).map_err(|_| {
        BodyDecodeError::field(field, ExpectedShape::Decimal, DecodeFailure::Unparseable)
    })
}

fn text_field(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, BodyDecodeError> {
    match present(object, field) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(_) => Err(BodyDecodeError::field(
            field,
            ExpectedShape::Text,
            DecodeFailure::WrongType,
        )),
    }
}
