//! Domain primitives, services and ports.
//!
//! Purpose: hold the admission rules (tenure, percentage, validation) and the
//! creation pipeline independently of HTTP and storage. Adapters reach the
//! domain only through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: closed error taxonomy mapped to HTTP by the inbound
//!   layer.
//! - Admission types: drafts, validated requests, pending and stored records.
//! - AdmissionService: implements the command and query driving ports.
//! - BlockingExecutor: bounded dispatch of blocking store calls.
//! - RetryingAddressLookup: named retry policy around any address lookup.

mod address;
mod admission;
mod admission_service;
mod blocking;
pub mod error;
pub mod ports;
mod request_context;
mod retry;
mod retrying_address_lookup;
mod tenure;

pub use self::address::Address;
pub use self::admission::{
    Admission, AdmissionDraft, AdmissionId, AdmissionRequest, EnrichedAdmission, NewAdmission,
    PostalCode, PostalCodeError,
};
pub use self::admission_service::AdmissionService;
pub use self::blocking::{BlockingExecutor, BlockingTaskError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::request_context::RequestContext;
pub use self::retry::{
    BackoffJitter, NoJitter, RandomJitter, RetryPolicy, RetrySleeper, TokioSleeper,
};
pub use self::retrying_address_lookup::RetryingAddressLookup;
pub use self::tenure::{Tenure, percentage_35};
