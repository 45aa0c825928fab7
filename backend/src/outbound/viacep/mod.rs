//! ViaCEP outbound adapter.
//!
//! Provides a reqwest implementation of the `AddressLookup` port.

mod dto;
mod http_source;

pub use http_source::ViaCepHttpLookup;
