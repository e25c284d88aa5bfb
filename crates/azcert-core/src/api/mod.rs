//! Remote certificate API access.
//!
//! - [`ServiceClient`] - the data-access operations
//! - [`Transport`] - HTTP seam; [`MockTransport`] under the `mock` feature
//! - [`Operation`] - per-operation status code mapping

mod client;
mod status;
mod transport;

#[cfg(any(test, feature = "mock"))]
mod mock;

pub use client::ServiceClient;
pub use status::Operation;
pub use transport::{
    ApiRequest, ApiResponse, HttpMethod, JSON_CONTENT_TYPE, RequestBody, Transport,
};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
