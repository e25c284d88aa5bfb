//! Certificate form state.
//!
//! Holds the raw strings of the create/edit form and turns them into a
//! [`CertificateDraft`]. Kept free of signals so it can be tested natively.

use azcert_core::models::{CertificateDraft, CertificateRecord, CodeInput};
use chrono::{DateTime, Utc};

/// Format used by `<input type="date">`.
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Raw values of the certificate form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CertificateForm {
    pub name: String,
    pub serial_number: String,
    pub method: String,
    pub kind: String,
    pub start_date: String,
    pub end_date: String,
    pub country: String,
    pub state: String,
    pub street_address: String,
}

impl CertificateForm {
    /// Empty form for a new certificate, with a placeholder serial number.
    pub fn new_certificate() -> Self {
        let draft = CertificateDraft::with_placeholder_serial();
        Self {
            serial_number: draft.serial_number.unwrap_or_default(),
            method: "1".to_string(),
            kind: "1".to_string(),
            ..Self::default()
        }
    }

    /// Form pre-filled from an existing record.
    pub fn from_record(record: &CertificateRecord) -> Self {
        let date = |d: Option<&DateTime<Utc>>| {
            d.map(|d| d.format(DATE_INPUT_FORMAT).to_string())
                .unwrap_or_default()
        };

        Self {
            name: record.name.clone(),
            serial_number: record.serial_number.clone(),
            method: record.method.map(|c| c.to_string()).unwrap_or_default(),
            kind: record.kind.map(|c| c.to_string()).unwrap_or_default(),
            start_date: date(record.start_date.as_ref()),
            end_date: date(record.end_date.as_ref()),
            country: record.location.country.clone(),
            state: record.location.state.clone(),
            street_address: record.location.street_address.clone(),
        }
    }

    /// Check the fields the form requires before submitting.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("Name", &self.name),
            ("Serial number", &self.serial_number),
            ("Method", &self.method),
            ("Start date", &self.start_date),
            ("End date", &self.end_date),
        ];
        if let Some((label, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(format!("{} is required", label));
        }

        if self.to_draft().has_inverted_dates() {
            return Err("End date must be after start date".to_string());
        }
        Ok(())
    }

    pub fn to_draft(&self) -> CertificateDraft {
        let text = |s: &str| Some(s.to_string()).filter(|s| !s.trim().is_empty());
        let code = |s: &str| text(s).map(CodeInput::Text);

        CertificateDraft {
            name: Some(self.name.clone()),
            serial_number: Some(self.serial_number.clone()),
            method: code(&self.method),
            kind: code(&self.kind),
            start_date: text(&self.start_date),
            end_date: text(&self.end_date),
            location: None,
            country: Some(self.country.clone()),
            state: Some(self.state.clone()),
            street_address: Some(self.street_address.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filled() -> CertificateForm {
        CertificateForm {
            name: "Sami".into(),
            serial_number: "AZ-9".into(),
            method: "3".into(),
            kind: "2".into(),
            start_date: "2024-02-01".into(),
            end_date: "2027-02-01".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_certificate_has_placeholder_serial() {
        let form = CertificateForm::new_certificate();
        let digits = form.serial_number.strip_prefix("CERT-").unwrap();
        assert_eq!(digits.len(), 5);
        assert_eq!(form.method, "1");
    }

    #[test]
    fn test_validate() {
        assert_eq!(filled().validate(), Ok(()));

        let missing = CertificateForm {
            name: "  ".into(),
            ..filled()
        };
        assert_eq!(missing.validate(), Err("Name is required".to_string()));

        let inverted = CertificateForm {
            end_date: "2023-01-01".into(),
            ..filled()
        };
        assert!(inverted.validate().unwrap_err().contains("after start date"));
    }

    #[test]
    fn test_round_trip_through_record() {
        let record: CertificateRecord = serde_json::from_value(json!({
            "srId": 4,
            "name": "Sami",
            "s_N": "AZ-9",
            "method": 3,
            "type": 2,
            "startDate": "2024-02-01T00:00:00Z",
            "endDate": "2027-02-01T00:00:00Z",
            "state": "Alexandria"
        }))
        .unwrap();

        let form = CertificateForm::from_record(&record);
        assert_eq!(form.start_date, "2024-02-01");
        assert_eq!(form.kind, "2");
        assert_eq!(form.state, "Alexandria");

        let draft = form.to_draft();
        assert_eq!(draft.method, Some(CodeInput::Text("3".into())));
        assert_eq!(draft.start_date.as_deref(), Some("2024-02-01"));
    }
}
