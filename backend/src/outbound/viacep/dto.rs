//! DTO for decoding ViaCEP JSON responses.
//!
//! Unknown codes are answered with a success status and a body such as
//! `{"erro": true}`, so absence is decided from the decoded fields rather
//! than from the status.

use serde::Deserialize;

use crate::domain::Address;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ViaCepAddressDto {
    pub(super) cep: Option<String>,
    pub(super) logradouro: Option<String>,
    pub(super) complemento: Option<String>,
    pub(super) unidade: Option<String>,
    pub(super) bairro: Option<String>,
    pub(super) localidade: Option<String>,
    pub(super) uf: Option<String>,
    pub(super) estado: Option<String>,
    pub(super) regiao: Option<String>,
    pub(super) ibge: Option<String>,
    pub(super) gia: Option<String>,
    pub(super) ddd: Option<String>,
    pub(super) siafi: Option<String>,
}

impl ViaCepAddressDto {
    /// Map into a domain address, or `None` when the payload identifies no
    /// address.
    pub(super) fn into_domain(self) -> Option<Address> {
        let address = Address {
            cep: self.cep,
            logradouro: self.logradouro,
            complemento: self.complemento,
            unidade: self.unidade,
            bairro: self.bairro,
            localidade: self.localidade,
            uf: self.uf,
            estado: self.estado,
            regiao: self.regiao,
            ibge: self.ibge,
            gia: self.gia,
            ddd: self.ddd,
            siafi: self.siafi,
        };
        address.is_identified().then_some(address)
    }
}
