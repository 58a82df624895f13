//! Client library for the Embedly API.
//!
//! This crate provides the API client (endpoint dispatch, keyless provider
//! gating, ordered result reassembly) and the HTTP transport behind it.

pub mod api;
pub mod transport;

pub use api::{ApiClient, ApiError, CallOutcome, CallParams, Endpoint, ErrorRecord, ServiceDescriptor};

pub use transport::{HttpTransport, Transport};
