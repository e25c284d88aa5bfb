//! Data models for certificates and the requests that carry them.
//!
//! - [`CertificateRecord`], [`Location`] - canonical certificate
//! - [`ServiceMethod`], [`CertificateType`] - enum codes with label fallback
//! - [`CertificateDraft`], [`CertificatePayload`] - form input and its coerced body
//! - [`EmailMessage`], [`UploadFile`], [`UploadReport`] - contact and bulk upload

mod certificate;
pub mod coerce;
mod draft;
mod enums;
mod message;

pub use certificate::{CertificateRecord, Location, parse_certificate_id};
pub(crate) use certificate::{record_from_value, records_from_value};
pub use draft::{CertificateDraft, CertificatePayload, CodeInput, placeholder_serial};
pub use enums::{
    CertificateType, ServiceMethod, UNKNOWN_METHOD_LABEL, UNKNOWN_TYPE_LABEL, method_label,
    type_label,
};
pub use message::{EmailMessage, UploadFile, UploadReport};
