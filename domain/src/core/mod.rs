//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - remote generation models (OpenRouter identifiers)
//! - [`request::DeliberationRequest`] - validated inputs for one run
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
pub mod request;
pub mod string;
