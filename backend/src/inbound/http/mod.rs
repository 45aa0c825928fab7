//! HTTP inbound adapter exposing the admission REST endpoints.

pub mod admissions;
pub mod admissions_dto;
pub mod decoder;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
mod validation;

pub use error::ApiResult;
