//! Driven port for postal-code address lookups.
//!
//! A lookup has three outcomes: an address, a confirmed absence (the service
//! answered successfully but knows no such code), or an error.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::{Address, PostalCode};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the postal lookup service.
    pub enum AddressLookupError {
        /// Network transport failed before a response was received.
        Transport { message: String } =>
            "address lookup transport failed: {message}",
        /// The call exceeded its deadline.
        Timeout { message: String } =>
            "address lookup timed out: {message}",
        /// The service answered with a client or server error status.
        UpstreamStatus { status: u16, message: String } =>
            "address lookup returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "address lookup response decode failed: {message}",
    }
}

impl AddressLookupError {
    /// Return whether retrying this error is expected to help.
    ///
    /// # Examples
    /// ```
    /// use admissions::domain::ports::AddressLookupError;
    ///
    /// assert!(AddressLookupError::upstream_status(503_u16, "unavailable").is_retryable());
    /// assert!(!AddressLookupError::upstream_status(400_u16, "bad request").is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } => true,
            Self::UpstreamStatus { status, .. } => *status >= 500,
            Self::Decode { .. } => false,
        }
    }
}

/// Port for resolving a postal code to an address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Resolve `code`.
    ///
    /// Returns `Ok(None)` when the service confirms the code is unknown.
    async fn lookup(&self, code: &PostalCode) -> Result<Option<Address>, AddressLookupError>;
}

/// Fallback retrieval mode available on every [`AddressLookup`].
#[async_trait]
pub trait AddressLookupExt: AddressLookup {
    /// Resolve `code`, substituting `fallback` when the lookup fails.
    ///
    /// Only errors trigger the fallback. A confirmed absence is returned as
    /// `None`.
    ///
    /// # Examples
    /// ```
    /// use admissions::domain::ports::{AddressLookupExt, FixtureAddressLookup};
    /// use admissions::domain::{Address, PostalCode};
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let code = PostalCode::parse("66050-080").expect("valid CEP");
    /// let found = FixtureAddressLookup.lookup_or(&code, Address::default()).await;
    /// assert_eq!(found.and_then(|address| address.localidade).as_deref(), Some("Belém"));
    /// # });
    /// ```
    async fn lookup_or(&self, code: &PostalCode, fallback: Address) -> Option<Address> {
        match self.lookup(code).await {
            Ok(found) => found,
            Err(error) => {
                warn!(%error, cep = %code, "address lookup failed; using fallback");
                Some(fallback)
            }
        }
    }
}

impl<T: AddressLookup + ?Sized> AddressLookupExt for T {}

/// Fixture implementation resolving every code to a fixed address in Belém.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAddressLookup;

#[async_trait]
impl AddressLookup for FixtureAddressLookup {
    async fn lookup(&self, code: &PostalCode) -> Result<Option<Address>, AddressLookupError> {
        Ok(Some(Address {
            cep: Some(code.as_str().to_owned()),
            logradouro: Some("Avenida Governador José Malcher".to_owned()),
            bairro: Some("Nazaré".to_owned()),
            localidade: Some("Belém".to_owned()),
            uf: Some("PA".to_owned()),
            estado: Some("Pará".to_owned()),
            regiao: Some("Norte".to_owned()),
            ddd: Some("91".to_owned()),
            ..Address::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn code() -> PostalCode {
        PostalCode::parse("66050080").expect("valid CEP")
    }

    fn fallback() -> Address {
        Address {
            localidade: Some("Fallback".to_owned()),
            ..Address::default()
        }
    }

    #[rstest]
    #[case::transport(AddressLookupError::transport("reset"), true)]
    #[case::timeout(AddressLookupError::timeout("2s"), true)]
    #[case::server(AddressLookupError::upstream_status(502_u16, "bad gateway"), true)]
    #[case::client(AddressLookupError::upstream_status(404_u16, "not found"), false)]
    #[case::decode(AddressLookupError::decode("eof"), false)]
    fn retryability_by_kind(#[case] error: AddressLookupError, #[case] expected: bool) {
        assert_eq!(error.is_retryable(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn lookup_or_substitutes_fallback_on_error(code: PostalCode) {
        let mut lookup = MockAddressLookup::new();
        lookup
            .expect_lookup()
            .times(1)
            .return_once(|_| Err(AddressLookupError::timeout("deadline elapsed")));

        let found = lookup.lookup_or(&code, fallback()).await;
        assert_eq!(found, Some(fallback()));
    }

    #[rstest]
    #[tokio::test]
    async fn lookup_or_keeps_absence(code: PostalCode) {
        let mut lookup = MockAddressLookup::new();
        lookup.expect_lookup().times(1).return_once(|_| Ok(None));

        assert_eq!(lookup.lookup_or(&code, fallback()).await, None);
    }

    #[rstest]
    #[tokio::test]
    async fn lookup_or_prefers_the_real_answer(code: PostalCode) {
        let found = FixtureAddressLookup.lookup_or(&code, fallback()).await;
        let address = found.expect("fixture always answers");
        assert_eq!(address.cep.as_deref(), Some("66050080"));
        assert_eq!(address.localidade.as_deref(), Some("Belém"));
    }
}
