//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod address_lookup;
mod admission_command;
mod admission_query;
mod admission_repository;

#[cfg(test)]
pub use address_lookup::MockAddressLookup;
pub use address_lookup::{
    AddressLookup, AddressLookupError, AddressLookupExt, FixtureAddressLookup,
};
#[cfg(test)]
pub use admission_command::MockAdmissionCommand;
pub use admission_command::AdmissionCommand;
#[cfg(test)]
pub use admission_query::MockAdmissionQuery;
pub use admission_query::AdmissionQuery;
#[cfg(test)]
pub use admission_repository::MockAdmissionRepository;
pub use admission_repository::{
    AdmissionFilter, AdmissionPageRequest, AdmissionRepository, AdmissionRepositoryError,
    AdmissionSortField,
};
