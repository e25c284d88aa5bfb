//! Plain-text rendering of certificates.

use std::fmt::Write;

use azcert_core::models::CertificateRecord;
use azcert_core::search::{CertificateView, group_by_name};
use chrono::{DateTime, Utc};

/// Records grouped by holder, one line per certificate.
pub fn render_groups(records: Vec<CertificateRecord>, now: DateTime<Utc>) -> String {
    if records.is_empty() {
        return "No certificates found".to_string();
    }

    let mut out = String::new();
    for group in group_by_name(records) {
        let _ = writeln!(out, "{} ({})", group.name, group.certificates.len());
        for record in &group.certificates {
            let view = CertificateView::from_record(record, now);
            let _ = writeln!(
                out,
                "  {:<12} {:<16} {:<28} {} - {}  [{}]",
                view.display_id,
                view.serial_number,
                view.title,
                view.issue_date,
                view.expiry_date,
                view.status.label()
            );
        }
    }
    out.truncate(out.trim_end().len());
    out
}

/// Every field of one certificate.
pub fn render_detail(record: &CertificateRecord, now: DateTime<Utc>) -> String {
    let view = CertificateView::from_record(record, now);
    [
        ("Id", view.display_id),
        ("Name", view.name),
        ("Serial", view.serial_number),
        ("Method", view.title),
        ("Type", record.type_label().to_string()),
        ("Issued", view.issue_date),
        ("Expires", view.expiry_date),
        ("Location", view.location),
        ("Status", view.status.label().to_string()),
    ]
    .iter()
    .map(|(label, value)| format!("{:<10}{}", format!("{label}:"), value))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn records() -> Vec<CertificateRecord> {
        serde_json::from_value(json!([
            { "srId": 1, "name": "Yara", "s_N": "AZ-1", "method": 5, "endDate": "2030-01-01" },
            { "srId": 2, "name": "Omar", "s_N": "AZ-2" },
            { "srId": 3, "name": "Yara", "s_N": "AZ-3" }
        ]))
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_render_groups() {
        let text = render_groups(records(), now());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Yara (2)");
        assert!(lines[1].contains("CERT-1"));
        assert!(lines[1].contains("Visual Testing"));
        assert!(lines[1].ends_with("[active]"));
        assert_eq!(lines[3], "Omar (1)");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_groups(Vec::new(), now()), "No certificates found");
    }

    #[test]
    fn test_render_detail() {
        let text = render_detail(&records()[1], now());
        assert!(text.contains("Id:       CERT-2"));
        assert!(text.contains("Type:     Unknown Type"));
        assert!(text.contains("Location: N/A"));
    }
}
