//! Utility modules for browser APIs.
//!
//! Provides:
//! - [`FetchTransport`] - `window.fetch` transport with timeout
//! - [`dom`] - window helpers, console logging, file reading
//! - [`Generation`], [`Throttle`] - guards for overlapping requests

pub mod dom;
mod fetch;
mod gate;

pub use fetch::FetchTransport;
pub use gate::{Generation, Throttle};
