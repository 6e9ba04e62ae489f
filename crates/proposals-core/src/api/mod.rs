//! REST API client module for the proposals service.
//!
//! This module provides the `ApiClient` for the endpoints under
//! `/api/proposals`, the `Transport` seam it sends requests through,
//! and the `ApiError` taxonomy every failed exchange maps into.
//!
//! No authentication header is attached to requests.

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
