//! Core library for the AZ International certificate site.
//!
//! This crate holds everything that is not UI:
//!
//! - [`cache`] - TTL request cache with pattern invalidation
//! - [`api`] - the certificate data-access client and its transports
//! - [`models`] - certificate records, form drafts and wire normalization
//! - [`search`] - grouping and display formatting of search results
//! - [`error`] - user-facing error taxonomy
//!
//! The web app and the CLI are thin consumers of [`ServiceClient`].

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod search;

pub use api::{ApiRequest, ApiResponse, Operation, ServiceClient, Transport};
pub use cache::{Invalidate, RequestCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ClientConfig;
pub use error::{ApiError, ErrorKind, TransportError};
pub use models::{
    CertificateDraft, CertificateRecord, CertificateType, EmailMessage, Location, ServiceMethod,
    UploadFile, UploadReport,
};
pub use search::{CertificateGroup, CertificateStatus, CertificateView, SearchMode};

#[cfg(any(test, feature = "mock"))]
pub use api::MockTransport;
