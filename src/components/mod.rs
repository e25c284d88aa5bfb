//! UI components built with Leptos.
//!
//! - [`router`] - Hash routing and page chrome (main entry point)
//! - [`verify`] - Public certificate verification
//! - [`admin`] - Certificate list, editor, and bulk upload
//! - [`contact`] - Contact form
//! - [`notice`] - Page-level success and error messages
//! - [`icons`] - Centralized icon definitions

pub mod admin;
pub mod contact;
pub mod icons;
pub mod notice;
pub mod router;
pub mod verify;

pub use router::AppRouter;
