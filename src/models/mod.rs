//! Data models for the web app.
//!
//! - [`Route`] - hash-based navigation
//! - [`CertificateForm`] - raw values of the create/edit form

mod form;
mod route;

pub use form::CertificateForm;
pub use route::Route;
