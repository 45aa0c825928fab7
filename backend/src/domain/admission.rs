//! Admission entities: validated requests, pending records and stored records.

use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::{Address, Error, Tenure, percentage_35};

/// Widest salary scale accepted, in either direction. The stored
/// percentage carries two more fractional digits and must still fit a
/// PostgreSQL `NUMERIC`.
pub(crate) const SALARY_SCALE_LIMIT: i64 = 16_381;

/// Store-assigned admission identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AdmissionId(Uuid);

impl AdmissionId {
    /// Wrap an identifier issued by a store.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AdmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AdmissionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Validation errors for [`PostalCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PostalCodeError {
    /// No code, or only whitespace, was supplied.
    #[error("cep é obrigatório")]
    Blank,
    /// The code is not five digits, an optional hyphen and three digits.
    #[error("CEP inválido. Formato esperado: 12345-678 ou 12345678")]
    Malformed,
}

/// Brazilian postal code (CEP) in `12345-678` or `12345678` form.
///
/// The text is kept exactly as supplied so error messages can echo it; the
/// digits-only form is what lookups use.
///
/// # Examples
/// ```
/// use admissions::domain::PostalCode;
///
/// let code = PostalCode::parse("66050-080").expect("valid CEP");
/// assert_eq!(code.as_str(), "66050-080");
/// assert_eq!(code.digits(), "66050080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode {
    raw: String,
    digits: String,
}

impl PostalCode {
    /// Validate and wrap a postal code.
    pub fn parse(raw: &str) -> Result<Self, PostalCodeError> {
        if raw.trim().is_empty() {
            return Err(PostalCodeError::Blank);
        }
        let well_formed = match raw.split_once('-') {
            Some((prefix, suffix)) => all_digits(prefix, 5) && all_digits(suffix, 3),
            None => all_digits(raw, 8),
        };
        if !well_formed {
            return Err(PostalCodeError::Malformed);
        }
        Ok(Self {
            raw: raw.to_owned(),
            digits: raw.chars().filter(char::is_ascii_digit).collect(),
        })
    }

    /// The code as supplied by the client.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The code with every non-digit removed.
    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn all_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|byte| byte.is_ascii_digit())
}

/// Decoded but not yet validated admission input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdmissionDraft {
    /// Hire date (`dataAdmissao`).
    pub hire_date: Option<NaiveDate>,
    /// Gross salary (`salarioBruto`).
    pub gross_salary: Option<BigDecimal>,
    /// Postal code text (`cep`).
    pub postal_code: Option<String>,
}

/// Validated admission input. Immutable once accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionRequest {
    hire_date: NaiveDate,
    gross_salary: BigDecimal,
    postal_code: PostalCode,
}

impl AdmissionRequest {
    /// Validate a draft against `today`, collecting one message per
    /// offending field.
    ///
    /// # Examples
    /// ```
    /// use admissions::domain::{AdmissionDraft, AdmissionRequest, ErrorCode};
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 7, 5).expect("valid date");
    /// let err = AdmissionRequest::validate(AdmissionDraft::default(), today)
    ///     .expect_err("empty draft is invalid");
    /// assert_eq!(err.code(), ErrorCode::ValidationFailed);
    /// assert_eq!(err.messages().len(), 3);
    /// ```
    pub fn validate(draft: AdmissionDraft, today: NaiveDate) -> Result<Self, Error> {
        let mut messages = Vec::new();

        let hire_date = match draft.hire_date {
            None => {
                messages.push("dataAdmissao: dataAdmissao é obrigatória".to_owned());
                None
            }
            Some(date) if date > today => {
                messages.push("dataAdmissao: dataAdmissao não pode ser no futuro".to_owned());
                None
            }
            Some(date) => Some(date),
        };

        let gross_salary = match draft.gross_salary {
            None => {
                messages.push("salarioBruto: salarioBruto é obrigatório".to_owned());
                None
            }
            Some(salary)
                if !(-SALARY_SCALE_LIMIT..=SALARY_SCALE_LIMIT)
                    .contains(&salary.as_bigint_and_exponent().1) =>
            {
                messages.push("salarioBruto: salarioBruto excede a precisão suportada".to_owned());
                None
            }
            Some(salary) if salary <= BigDecimal::zero() => {
                messages.push("salarioBruto: salarioBruto deve ser maior que zero".to_owned());
                None
            }
            Some(salary) => Some(salary),
        };

        let postal_code = match PostalCode::parse(draft.postal_code.as_deref().unwrap_or_default())
        {
            Ok(code) => Some(code),
            Err(err) => {
                messages.push(format!("cep: {err}"));
                None
            }
        };

        match (hire_date, gross_salary, postal_code) {
            (Some(hire_date), Some(gross_salary), Some(postal_code)) if messages.is_empty() => {
                Ok(Self {
                    hire_date,
                    gross_salary,
                    postal_code,
                })
            }
            _ => Err(Error::validation(messages)),
        }
    }

    /// Hire date.
    pub fn hire_date(&self) -> NaiveDate {
        self.hire_date
    }

    /// Gross salary.
    pub fn gross_salary(&self) -> &BigDecimal {
        &self.gross_salary
    }

    /// Postal code used for address enrichment.
    pub fn postal_code(&self) -> &PostalCode {
        &self.postal_code
    }
}

/// Admission ready to be stored; the identifier is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmission {
    hire_date: NaiveDate,
    gross_salary: BigDecimal,
    tenure: Tenure,
    percentage_35: BigDecimal,
    created_at: DateTime<Utc>,
}

impl NewAdmission {
    /// Derive tenure and percentage from a validated request.
    ///
    /// `today` is the calendar date the tenure runs to and `created_at` the
    /// instant recorded on the admission.
    pub fn compute(request: &AdmissionRequest, today: NaiveDate, created_at: DateTime<Utc>) -> Self {
        Self {
            hire_date: request.hire_date(),
            gross_salary: request.gross_salary().clone(),
            tenure: Tenure::between(request.hire_date(), today),
            percentage_35: percentage_35(request.gross_salary()),
            created_at,
        }
    }

    /// Rebuild a pending admission from stored columns.
    pub fn from_parts(
        hire_date: NaiveDate,
        gross_salary: BigDecimal,
        tenure: Tenure,
        percentage_35: BigDecimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            hire_date,
            gross_salary,
            tenure,
            percentage_35,
            created_at,
        }
    }

    /// Attach the identifier assigned by the store.
    pub fn with_id(self, id: AdmissionId) -> Admission {
        Admission { id, fields: self }
    }

    /// Hire date.
    pub fn hire_date(&self) -> NaiveDate {
        self.hire_date
    }

    /// Gross salary.
    pub fn gross_salary(&self) -> &BigDecimal {
        &self.gross_salary
    }

    /// Elapsed tenure at creation time.
    pub fn tenure(&self) -> Tenure {
        self.tenure
    }

    /// 35% of the gross salary.
    pub fn percentage_35(&self) -> &BigDecimal {
        &self.percentage_35
    }

    /// Creation instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Stored admission. Write-once: no accessor allows mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    id: AdmissionId,
    fields: NewAdmission,
}

impl Admission {
    /// Store-assigned identifier.
    pub fn id(&self) -> AdmissionId {
        self.id
    }

    /// Hire date.
    pub fn hire_date(&self) -> NaiveDate {
        self.fields.hire_date
    }

    /// Gross salary.
    pub fn gross_salary(&self) -> &BigDecimal {
        &self.fields.gross_salary
    }

    /// Elapsed tenure at creation time.
    pub fn tenure(&self) -> Tenure {
        self.fields.tenure
    }

    /// 35% of the gross salary.
    pub fn percentage_35(&self) -> &BigDecimal {
        &self.fields.percentage_35
    }

    /// Creation instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.fields.created_at
    }
}

/// A stored admission merged with the address of its postal code.
///
/// Built once per successful creation and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedAdmission {
    /// The stored admission, carrying its store-assigned identifier.
    pub admission: Admission,
    /// Address resolved for the request's postal code.
    pub address: Address,
}

#[cfg(test)]
#[path = "admission_tests.rs"]
mod tests;
