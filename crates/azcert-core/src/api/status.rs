//! HTTP status to [`ApiError`] mapping.
//!
//! Each operation has its own wording; the categories are shared. Search
//! operations never reach this table, they fail soft.

use crate::error::{ApiError, SERVER_ERROR_MESSAGE};

const INVALID_CERTIFICATE: &str =
    "Invalid certificate data. Please check all fields and try again.";
const DUPLICATE_SERIAL: &str = "A certificate with this serial number already exists.";
const DELETED: &str = "Certificate not found. It may have been deleted.";

/// A non-search operation of the data-access layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    GetById,
    Create,
    Update,
    Delete,
    Upload,
    SendEmail,
}

impl Operation {
    fn validation_message(self) -> Option<&'static str> {
        match self {
            Self::Create | Self::Update => Some(INVALID_CERTIFICATE),
            Self::Upload => Some("Invalid file. Please check the file format and try again."),
            Self::SendEmail => Some("Please check your message details and try again."),
            _ => None,
        }
    }

    fn permission_message(self) -> &'static str {
        match self {
            Self::List => "You don't have permission to view certificates.",
            Self::GetById => "You don't have permission to view this certificate.",
            Self::Create => "You don't have permission to create certificates.",
            Self::Update => "You don't have permission to update this certificate.",
            Self::Delete => "You don't have permission to delete this certificate.",
            Self::Upload => "You don't have permission to upload certificate files.",
            Self::SendEmail => "You don't have permission to send messages.",
        }
    }

    fn not_found_message(self) -> Option<&'static str> {
        match self {
            Self::GetById | Self::Update => Some(DELETED),
            Self::Delete => Some("Certificate not found. It may have already been deleted."),
            _ => None,
        }
    }

    fn conflict_message(self) -> Option<&'static str> {
        match self {
            Self::Create | Self::Update => Some(DUPLICATE_SERIAL),
            _ => None,
        }
    }

    fn generic_message(self) -> &'static str {
        match self {
            Self::List => "Failed to load certificates. Please try again.",
            Self::GetById => "Failed to retrieve certificate. Please try again.",
            Self::Create => "Failed to create certificate. Please try again.",
            Self::Update => "Failed to update certificate. Please try again.",
            Self::Delete => "Failed to delete certificate. Please try again.",
            Self::Upload => "Failed to upload file. Please try again.",
            Self::SendEmail => "Failed to send email. Please try again.",
        }
    }

    /// The catch-all error of this operation.
    pub fn generic_error(self) -> ApiError {
        ApiError::Retryable(self.generic_message().to_string())
    }

    /// Categorize a non-success status.
    pub fn error_for_status(self, status: u16) -> ApiError {
        let message = |m: &str| m.to_string();
        match status {
            400 => self
                .validation_message()
                .map(|m| ApiError::Validation(message(m))),
            401 | 403 => Some(ApiError::Permission(message(self.permission_message()))),
            404 => self
                .not_found_message()
                .map(|m| ApiError::NotFound(message(m))),
            409 => self
                .conflict_message()
                .map(|m| ApiError::Conflict(message(m))),
            500 => Some(ApiError::Server(message(SERVER_ERROR_MESSAGE))),
            _ => None,
        }
        .unwrap_or_else(|| self.generic_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_get_by_id_mapping() {
        let op = Operation::GetById;
        let not_found = op.error_for_status(404);
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert!(not_found.message().contains("may have been deleted"));

        assert_eq!(op.error_for_status(401).kind(), ErrorKind::Permission);
        assert_eq!(op.error_for_status(403).kind(), ErrorKind::Permission);

        let server = op.error_for_status(500);
        assert_eq!(server.kind(), ErrorKind::Server);
        assert!(server.message().contains("try again later"));

        assert_eq!(op.error_for_status(502).kind(), ErrorKind::Retryable);
        assert_eq!(op.error_for_status(400).kind(), ErrorKind::Retryable);
    }

    #[test]
    fn test_mutation_mapping() {
        assert_eq!(Operation::Create.error_for_status(400).kind(), ErrorKind::Validation);
        assert_eq!(Operation::Create.error_for_status(409).kind(), ErrorKind::Conflict);
        assert_eq!(Operation::Create.error_for_status(404).kind(), ErrorKind::Retryable);
        assert_eq!(Operation::Update.error_for_status(404).kind(), ErrorKind::NotFound);
        assert_eq!(Operation::Update.error_for_status(409).kind(), ErrorKind::Conflict);
        assert_eq!(Operation::Delete.error_for_status(409).kind(), ErrorKind::Retryable);
        assert_eq!(Operation::Upload.error_for_status(400).kind(), ErrorKind::Validation);
        assert_eq!(
            Operation::Delete.error_for_status(418).message(),
            "Failed to delete certificate. Please try again."
        );
    }

    #[test]
    fn test_conflict_message_mentions_serial() {
        let err = Operation::Update.error_for_status(409);
        assert!(err.message().contains("serial number"));
    }
}
