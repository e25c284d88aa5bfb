//! Back-office console for the certificate API.
//!
//! Drives [`azcert_core::ServiceClient`] over a `reqwest` transport.

pub mod cli;
pub mod commands;
pub mod http;
pub mod logging;
pub mod output;

pub use cli::{Cli, Command};
pub use commands::execute;
pub use http::ReqwestTransport;
