//! Address data returned by postal-code lookups.

/// Address fields as reported by the postal lookup service.
///
/// Every field is optional: the service omits fields it does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    /// Postal code, formatted by the service (`66050-080`).
    pub cep: Option<String>,
    /// Street name.
    pub logradouro: Option<String>,
    /// Complement such as a number range.
    pub complemento: Option<String>,
    /// Unit designation.
    pub unidade: Option<String>,
    /// Neighbourhood.
    pub bairro: Option<String>,
    /// City.
    pub localidade: Option<String>,
    /// State abbreviation.
    pub uf: Option<String>,
    /// State name.
    pub estado: Option<String>,
    /// Region name.
    pub regiao: Option<String>,
    /// IBGE municipality code.
    pub ibge: Option<String>,
    /// GIA code.
    pub gia: Option<String>,
    /// Telephone area code.
    pub ddd: Option<String>,
    /// SIAFI code.
    pub siafi: Option<String>,
}

impl Address {
    /// Whether the payload identifies a place.
    ///
    /// The lookup service answers unknown codes with a success status and a
    /// body lacking both the code and the city; such a payload is absent.
    /// Blank strings count as missing.
    pub fn is_identified(&self) -> bool {
        [&self.cep, &self.localidade]
            .into_iter()
            .any(|field| field.as_deref().is_some_and(|value| !value.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::code_only(Some("66050-080"), None, true)]
    #[case::city_only(None, Some("Belém"), true)]
    #[case::both(Some("66050-080"), Some("Belém"), true)]
    #[case::neither(None, None, false)]
    #[case::both_blank(Some(""), Some("  "), false)]
    #[case::blank_code_with_city(Some(""), Some("Belém"), true)]
    fn identified_when_code_or_city_present(
        #[case] cep: Option<&str>,
        #[case] localidade: Option<&str>,
        #[case] expected: bool,
    ) {
        let address = Address {
            cep: cep.map(str::to_owned),
            localidade: localidade.map(str::to_owned),
            uf: Some("PA".to_owned()),
            ..Address::default()
        };
        assert_eq!(address.is_identified(), expected);
    }
}
