//! Application configuration.
//!
//! Centralizes the constants of the web app. API settings live in
//! `azcert_core::config`.

use crate::models::Route;

// =============================================================================
// Application Metadata
// =============================================================================

/// Company name shown in the header.
pub const APP_NAME: &str = "AZ International";

/// Tagline shown under the header.
pub const APP_TAGLINE: &str = "Non-Destructive Testing & Inspection Services";

/// Public contact address shown on the contact page.
pub const CONTACT_EMAIL: &str = "info@azinternational-eg.com";

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 15000;

/// Minimum gap between two verification searches, in milliseconds.
pub const SEARCH_THROTTLE_MS: f64 = 300.0;

// =============================================================================
// Upload Configuration
// =============================================================================

/// File types offered by the bulk upload picker.
pub const UPLOAD_ACCEPT: &str = ".xlsx,.xls";

// =============================================================================
// Navigation
// =============================================================================

/// Header navigation entries.
pub fn nav_links() -> [(&'static str, Route); 3] {
    [
        ("Verify", Route::Verify),
        ("Admin", Route::Admin),
        ("Contact", Route::Contact),
    ]
}
