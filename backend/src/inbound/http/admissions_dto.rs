//! Admission response DTOs.
//!
//! Field names follow the public Portuguese contract. Decimals are written
//! as JSON numbers carrying the stored scale (`3500.00`).

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Address, Admission, EnrichedAdmission};

fn serialize_decimal<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
    let number = serde_json::Number::from_str(&value.to_string()).map_err(|err| {
        serde::ser::Error::custom(format!("decimal {value} is not a JSON number: {err}"))
    })?;
    number.serialize(serializer)
}

/// Stored admission as returned by the query endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionBody {
    /// Store-assigned identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    /// Hire date.
    #[schema(value_type = String, format = Date, example = "2022-05-10")]
    pub data_admissao: NaiveDate,
    /// Gross salary.
    #[serde(serialize_with = "serialize_decimal")]
    #[schema(value_type = f64, example = 3500.00)]
    pub salario_bruto: BigDecimal,
    /// Whole years of tenure.
    #[schema(example = 3)]
    pub anos: i32,
    /// Whole months of tenure after the years.
    #[schema(example = 1)]
    pub meses: i32,
    /// Remaining days of tenure.
    #[schema(example = 25)]
    pub dias: i32,
    /// 35% of the gross salary.
    #[serde(rename = "porcentagem35", serialize_with = "serialize_decimal")]
    #[schema(value_type = f64, example = 1225.00)]
    pub porcentagem_35: BigDecimal,
    /// Instant the record was created.
    #[schema(value_type = String, format = DateTime)]
    pub criado_em: DateTime<Utc>,
}

impl From<Admission> for AdmissionBody {
    fn from(admission: Admission) -> Self {
        let tenure = admission.tenure();
        Self {
            id: *admission.id().as_uuid(),
            data_admissao: admission.hire_date(),
            salario_bruto: admission.gross_salary().clone(),
            anos: tenure.years(),
            meses: tenure.months(),
            dias: tenure.days(),
            porcentagem_35: admission.percentage_35().clone(),
            criado_em: admission.created_at(),
        }
    }
}

/// Address fields reported by the postal lookup service.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct AddressBody {
    #[schema(example = "66050-080")]
    pub cep: Option<String>,
    #[schema(example = "Travessa Quintino Bocaiúva")]
    pub logradouro: Option<String>,
    pub complemento: Option<String>,
    pub unidade: Option<String>,
    #[schema(example = "Nazaré")]
    pub bairro: Option<String>,
    #[schema(example = "Belém")]
    pub localidade: Option<String>,
    #[schema(example = "PA")]
    pub uf: Option<String>,
    #[schema(example = "Pará")]
    pub estado: Option<String>,
    #[schema(example = "Norte")]
    pub regiao: Option<String>,
    pub ibge: Option<String>,
    pub gia: Option<String>,
    #[schema(example = "91")]
    pub ddd: Option<String>,
    pub siafi: Option<String>,
}

impl From<Address> for AddressBody {
    fn from(address: Address) -> Self {
        Self {
            cep: address.cep,
            logradouro: address.logradouro,
            complemento: address.complemento,
            unidade: address.unidade,
            bairro: address.bairro,
            localidade: address.localidade,
            uf: address.uf,
            estado: address.estado,
            regiao: address.regiao,
            ibge: address.ibge,
            gia: address.gia,
            ddd: address.ddd,
            siafi: address.siafi,
        }
    }
}

/// Created admission merged with its address.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdmissionCreatedBody {
    #[serde(flatten)]
    pub admission: AdmissionBody,
    /// Address resolved for the request's postal code.
    pub endereco: AddressBody,
}

impl From<EnrichedAdmission> for AdmissionCreatedBody {
    fn from(enriched: EnrichedAdmission) -> Self {
        Self {
            admission: AdmissionBody::from(enriched.admission),
            endereco: AddressBody::from(enriched.address),
        }
    }
}
