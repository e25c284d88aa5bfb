//! Hash-based routing.
//!
//! URL format: `#/`, `#/admin`, `#/admin/new`, `#/admin/edit/<id>`, `#/contact`.
//! Edit links may carry the `CERT-` display prefix.

use azcert_core::models::parse_certificate_id;

/// Application routes for hash-based navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Public certificate verification: `#/` or empty hash
    Verify,
    /// Back-office certificate list: `#/admin`
    Admin,
    /// Create form: `#/admin/new`
    NewCertificate,
    /// Edit form: `#/admin/edit/<id>`
    EditCertificate { id: i64 },
    /// Contact form: `#/contact`
    Contact,
    /// Anything else
    NotFound { path: String },
}

impl Route {
    /// Parse URL hash into Route
    pub fn from_hash(hash: &str) -> Self {
        let path = hash
            .trim_start_matches('#')
            .trim_start_matches('/')
            .trim_end_matches('/');

        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            [""] | ["verify"] => Self::Verify,
            ["admin"] => Self::Admin,
            ["admin", "new"] => Self::NewCertificate,
            ["admin", "edit", id] => match parse_certificate_id(id) {
                Some(id) => Self::EditCertificate { id },
                None => Self::not_found(path),
            },
            ["contact"] => Self::Contact,
            _ => Self::not_found(path),
        }
    }

    fn not_found(path: &str) -> Self {
        Self::NotFound {
            path: path.to_string(),
        }
    }

    /// Convert Route to URL hash
    pub fn to_hash(&self) -> String {
        match self {
            Self::Verify => "#/".to_string(),
            Self::Admin => "#/admin".to_string(),
            Self::NewCertificate => "#/admin/new".to_string(),
            Self::EditCertificate { id } => format!("#/admin/edit/{}", id),
            Self::Contact => "#/contact".to_string(),
            Self::NotFound { path } => format!("#/{}", path),
        }
    }

    /// Whether the route belongs to the back-office console.
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::Admin | Self::NewCertificate | Self::EditCertificate { .. }
        )
    }

    /// Get current route from browser URL
    pub fn current() -> Self {
        let hash = web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();
        Self::from_hash(&hash)
    }

    /// Navigate to this route.
    ///
    /// Sets `location.hash` so that the `hashchange` listener picks it up.
    pub fn push(&self) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_hash(&self.to_hash());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parsing() {
        assert_eq!(Route::from_hash(""), Route::Verify);
        assert_eq!(Route::from_hash("#"), Route::Verify);
        assert_eq!(Route::from_hash("#/"), Route::Verify);
        assert_eq!(Route::from_hash("#/admin"), Route::Admin);
        assert_eq!(Route::from_hash("#/admin/"), Route::Admin);
        assert_eq!(Route::from_hash("#/admin/new"), Route::NewCertificate);
        assert_eq!(
            Route::from_hash("#/admin/edit/42"),
            Route::EditCertificate { id: 42 }
        );
        assert_eq!(Route::from_hash("#/contact"), Route::Contact);
    }

    #[test]
    fn test_edit_route_strips_display_prefix() {
        assert_eq!(
            Route::from_hash("#/admin/edit/CERT-7"),
            Route::EditCertificate { id: 7 }
        );
        assert_eq!(
            Route::from_hash("#/admin/edit/abc"),
            Route::NotFound {
                path: "admin/edit/abc".to_string()
            }
        );
    }

    #[test]
    fn test_route_to_hash() {
        assert_eq!(Route::Verify.to_hash(), "#/");
        assert_eq!(Route::NewCertificate.to_hash(), "#/admin/new");
        assert_eq!(Route::EditCertificate { id: 9 }.to_hash(), "#/admin/edit/9");

        for route in [
            Route::Verify,
            Route::Admin,
            Route::NewCertificate,
            Route::EditCertificate { id: 3 },
            Route::Contact,
        ] {
            assert_eq!(Route::from_hash(&route.to_hash()), route);
        }
    }

    #[test]
    fn test_is_admin() {
        assert!(Route::EditCertificate { id: 1 }.is_admin());
        assert!(!Route::Contact.is_admin());
    }
}
