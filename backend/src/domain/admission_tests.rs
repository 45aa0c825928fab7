//! Tests for admission validation and derivation.

use std::str::FromStr;

use chrono::TimeZone;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;

#[fixture]
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 5).expect("valid date")
}

fn decimal(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).expect("valid decimal")
}

fn draft(hire_date: Option<NaiveDate>, salary: Option<&str>, cep: Option<&str>) -> AdmissionDraft {
    AdmissionDraft {
        hire_date,
        gross_salary: salary.map(decimal),
        postal_code: cep.map(str::to_owned),
    }
}

#[rstest]
#[case::hyphenated("66050-080", "66050080")]
#[case::digits_only("66050080", "66050080")]
fn postal_code_accepts_both_forms(#[case] raw: &str, #[case] digits: &str) {
    let code = PostalCode::parse(raw).expect("valid CEP");
    assert_eq!(code.as_str(), raw);
    assert_eq!(code.digits(), digits);
}

#[rstest]
#[case::blank("", PostalCodeError::Blank)]
#[case::spaces("   ", PostalCodeError::Blank)]
#[case::short("6605-080", PostalCodeError::Malformed)]
#[case::letters("6605O080", PostalCodeError::Malformed)]
#[case::two_hyphens("66050--80", PostalCodeError::Malformed)]
#[case::wrong_separator("66050.080", PostalCodeError::Malformed)]
#[case::padded(" 66050080", PostalCodeError::Malformed)]
fn postal_code_rejects_malformed_input(#[case] raw: &str, #[case] expected: PostalCodeError) {
    assert_eq!(PostalCode::parse(raw), Err(expected));
}

#[rstest]
fn validate_accepts_hire_date_equal_to_today(today: NaiveDate) {
    let request = AdmissionRequest::validate(draft(Some(today), Some("1"), Some("66050080")), today)
        .expect("today is not in the future");
    assert_eq!(request.hire_date(), today);
}

#[rstest]
fn validate_collects_one_message_per_field(today: NaiveDate) {
    let tomorrow = today.succ_opt().expect("next day");
    let err = AdmissionRequest::validate(draft(Some(tomorrow), Some("0"), Some("abc")), today)
        .expect_err("every field is invalid");

    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert_eq!(
        err.messages(),
        [
            "dataAdmissao: dataAdmissao não pode ser no futuro",
            "salarioBruto: salarioBruto deve ser maior que zero",
            "cep: CEP inválido. Formato esperado: 12345-678 ou 12345678",
        ]
    );
}

#[rstest]
fn validate_reports_missing_fields(today: NaiveDate) {
    let err = AdmissionRequest::validate(draft(None, None, None), today).expect_err("empty draft");
    assert_eq!(
        err.messages(),
        [
            "dataAdmissao: dataAdmissao é obrigatória",
            "salarioBruto: salarioBruto é obrigatório",
            "cep: cep é obrigatório",
        ]
    );
}

#[rstest]
#[case("-10.00")]
#[case("0.00")]
fn validate_rejects_non_positive_salary(today: NaiveDate, #[case] salary: &str) {
    let err = AdmissionRequest::validate(
        draft(Some(today), Some(salary), Some("66050-080")),
        today,
    )
    .expect_err("salary must be positive");
    assert_eq!(err.messages(), ["salarioBruto: salarioBruto deve ser maior que zero"]);
}

#[rstest]
#[case::tiny_fraction("1e-9223372036854775807")]
#[case::beyond_scale_limit("1e-16382")]
#[case::huge_magnitude("1e9223372036854775807")]
fn validate_rejects_salary_with_extreme_exponent(today: NaiveDate, #[case] salary: &str) {
    let err = AdmissionRequest::validate(
        draft(Some(today), Some(salary), Some("66050-080")),
        today,
    )
    .expect_err("salary scale is out of range");
    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert_eq!(err.messages(), ["salarioBruto: salarioBruto excede a precisão suportada"]);
}

#[rstest]
fn validate_accepts_salary_at_the_scale_limit(today: NaiveDate) {
    let request = AdmissionRequest::validate(
        draft(Some(today), Some("1e-16381"), Some("66050-080")),
        today,
    )
    .expect("scale within limit");
    let pending = NewAdmission::compute(&request, today, Utc::now());
    assert_eq!(pending.percentage_35().as_bigint_and_exponent().1, SALARY_SCALE_LIMIT + 2);
}

#[rstest]
fn compute_derives_tenure_and_percentage(today: NaiveDate) {
    let hire_date = NaiveDate::from_ymd_opt(2022, 5, 10).expect("valid date");
    let request = AdmissionRequest::validate(
        draft(Some(hire_date), Some("3500.00"), Some("66050080")),
        today,
    )
    .expect("valid request");
    let created_at = Utc
        .with_ymd_and_hms(2025, 7, 5, 15, 0, 0)
        .single()
        .expect("valid timestamp");

    let pending = NewAdmission::compute(&request, today, created_at);

    assert_eq!(pending.tenure(), Tenure::from_parts(3, 1, 25));
    assert_eq!(pending.percentage_35(), &decimal("1225.00"));
    assert_eq!(pending.created_at(), created_at);

    let id = AdmissionId::from_uuid(Uuid::new_v4());
    let stored = pending.clone().with_id(id);
    assert_eq!(stored.id(), id);
    assert_eq!(stored.gross_salary(), pending.gross_salary());
    assert_eq!(stored.hire_date(), hire_date);
}

#[rstest]
fn admission_id_parses_uuid_text() {
    let id = AdmissionId::from_str("00000000-0000-0000-0000-000000000001").expect("valid UUID");
    assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000001");
    assert!(AdmissionId::from_str("not-a-uuid").is_err());
}
