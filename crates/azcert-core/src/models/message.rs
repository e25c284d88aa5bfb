//! Contact-form email and bulk spreadsheet upload types.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Body of `POST /Email/SendEmail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    pub user_name: String,
    pub user_email: String,
    pub subject: String,
    pub message: String,
}

/// A spreadsheet to send as the multipart `file` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Build an upload, guessing the content type from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    }
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadReport {
    /// The server answered with JSON.
    Json(Value),
    /// The server answered with plain text that reads like a success.
    Acknowledged { raw: String },
}

impl UploadReport {
    pub const ACKNOWLEDGED_MESSAGE: &'static str = "File uploaded successfully";

    /// Words in a plain-text body that count as a success acknowledgement.
    const SUCCESS_MARKERS: [&'static str; 3] = ["success", "Successfully", "uploaded"];

    /// Interpret a 2xx response body. `None` when it is neither JSON nor a
    /// recognizable acknowledgement.
    pub fn from_body(body: &str) -> Option<Self> {
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            return Some(Self::Json(value));
        }
        Self::SUCCESS_MARKERS
            .iter()
            .any(|marker| body.contains(marker))
            .then(|| Self::Acknowledged {
                raw: body.to_string(),
            })
    }

    /// Render as JSON; an acknowledgement gets a synthesized success object.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Acknowledged { raw } => json!({
                "success": true,
                "message": Self::ACKNOWLEDGED_MESSAGE,
                "addedCount": "multiple",
                "data": raw,
            }),
        }
    }

    /// A human-readable summary.
    pub fn message(&self) -> String {
        match self {
            Self::Json(value) => value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(Self::ACKNOWLEDGED_MESSAGE)
                .to_string(),
            Self::Acknowledged { .. } => Self::ACKNOWLEDGED_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_wire_names() {
        let msg = EmailMessage {
            user_name: "Omar".into(),
            user_email: "omar@example.com".into(),
            subject: "Quote".into(),
            message: "Hello".into(),
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({
                "userName": "Omar",
                "userEmail": "omar@example.com",
                "subject": "Quote",
                "message": "Hello"
            })
        );
    }

    #[test]
    fn test_upload_content_type() {
        assert_eq!(
            UploadFile::new("certs.XLSX", vec![]).content_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(UploadFile::new("old.xls", vec![]).content_type, "application/vnd.ms-excel");
        assert_eq!(UploadFile::new("noext", vec![]).content_type, "application/octet-stream");
    }

    #[test]
    fn test_report_from_body() {
        let json_report = UploadReport::from_body(r#"{"message":"12 added"}"#).unwrap();
        assert_eq!(json_report.message(), "12 added");

        let ack = UploadReport::from_body("File uploaded.").unwrap();
        assert_eq!(ack.to_value()["success"], true);
        assert_eq!(ack.to_value()["data"], "File uploaded.");
        assert_eq!(ack.message(), UploadReport::ACKNOWLEDGED_MESSAGE);

        assert!(UploadReport::from_body("<html>oops</html>").is_none());
        assert!(UploadReport::from_body("").is_none());
    }
}
