//! Presentation of search results.
//!
//! The admin console shows results grouped by certificate holder; the public
//! verification page shows one card per certificate.

use chrono::{DateTime, Utc};

use crate::config::NOT_AVAILABLE;
use crate::models::CertificateRecord;

/// Which search the verification page runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Name,
    Serial,
    /// Serial first, falling back to name when the serial search finds nothing.
    All,
}

impl SearchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Serial => "serial",
            Self::All => "all",
        }
    }
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "serial" => Ok(Self::Serial),
            "all" => Ok(Self::All),
            other => Err(format!("unknown search mode: {other}")),
        }
    }
}

// ============================================================================
// Grouping
// ============================================================================

/// Certificates sharing one holder name.
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateGroup {
    pub name: String,
    pub certificates: Vec<CertificateRecord>,
}

/// Group records by `name`, keeping groups in first-seen order.
pub fn group_by_name(records: Vec<CertificateRecord>) -> Vec<CertificateGroup> {
    let mut groups: Vec<CertificateGroup> = Vec::new();

    for record in records {
        match groups.iter_mut().find(|g| g.name == record.name) {
            Some(group) => group.certificates.push(record),
            None => groups.push(CertificateGroup {
                name: record.name.clone(),
                certificates: vec![record],
            }),
        }
    }

    groups
}

/// Drop the record with `id` from every group, then drop empty groups.
pub fn remove_from_groups(groups: &mut Vec<CertificateGroup>, id: i64) {
    for group in groups.iter_mut() {
        group.certificates.retain(|c| c.id != id);
    }
    groups.retain(|g| !g.certificates.is_empty());
}

// ============================================================================
// Verification card
// ============================================================================

/// Validity of a certificate at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateStatus {
    Active,
    Expired,
}

impl CertificateStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
        }
    }
}

/// Display-ready fields of one certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateView {
    pub id: i64,
    pub display_id: String,
    pub name: String,
    pub title: String,
    pub serial_number: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub location: String,
    pub status: CertificateStatus,
}

impl CertificateView {
    pub fn from_record(record: &CertificateRecord, now: DateTime<Utc>) -> Self {
        let status = if record.is_active_at(now) {
            CertificateStatus::Active
        } else {
            CertificateStatus::Expired
        };

        Self {
            id: record.id,
            display_id: record.display_id(),
            name: or_not_available(&record.name),
            title: record.method_label().to_string(),
            serial_number: or_not_available(&record.serial_number),
            issue_date: format_date(record.start_date.as_ref()),
            expiry_date: format_date(record.end_date.as_ref()),
            location: record.location.display(),
            status,
        }
    }
}

fn or_not_available(s: &str) -> String {
    let s = s.trim();
    if s.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        s.to_string()
    }
}

/// Format a date for display (e.g., "Jan 5, 2024"), or `N/A`.
pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    date.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |d| d.format("%b %-d, %Y").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn record(id: i64, name: &str) -> CertificateRecord {
        serde_json::from_value(json!({ "srId": id, "name": name })).unwrap()
    }

    #[test]
    fn test_group_by_name_keeps_first_seen_order() {
        let groups = group_by_name(vec![
            record(1, "Zed"),
            record(2, "Amr"),
            record(3, "Zed"),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Zed");
        assert_eq!(
            groups[0].certificates.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(groups[1].name, "Amr");
    }

    #[test]
    fn test_remove_from_groups_drops_empty_groups() {
        let mut groups = group_by_name(vec![record(1, "A"), record(2, "B"), record(3, "B")]);
        remove_from_groups(&mut groups, 1);
        assert_eq!(groups.len(), 1);
        remove_from_groups(&mut groups, 2);
        assert_eq!(groups[0].certificates.len(), 1);
    }

    #[test]
    fn test_view_from_record() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let rec: CertificateRecord = serde_json::from_value(json!({
            "srId": 12,
            "name": "Hana",
            "s_N": "AZ-12",
            "method": 2,
            "startDate": "2024-01-05T00:00:00Z",
            "endDate": "2026-01-05T00:00:00Z",
            "country": "EG",
            "state": "Cairo"
        }))
        .unwrap();

        let view = CertificateView::from_record(&rec, now);
        assert_eq!(view.display_id, "CERT-12");
        assert_eq!(view.title, "Liquid Penetrant Testing");
        assert_eq!(view.issue_date, "Jan 5, 2024");
        assert_eq!(view.expiry_date, "Jan 5, 2026");
        assert_eq!(view.location, "Cairo, EG");
        assert_eq!(view.status, CertificateStatus::Active);
    }

    #[test]
    fn test_view_of_sparse_record() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let view = CertificateView::from_record(&record(0, "  "), now);
        assert_eq!(view.name, "N/A");
        assert_eq!(view.serial_number, "N/A");
        assert_eq!(view.issue_date, "N/A");
        assert_eq!(view.title, "Unknown Method");
        assert_eq!(view.expiry_date, "N/A");
        assert_eq!(view.status, CertificateStatus::Expired);
    }

    #[test]
    fn test_search_mode_parse() {
        assert_eq!("Serial".parse::<SearchMode>(), Ok(SearchMode::Serial));
        assert_eq!("all".parse::<SearchMode>(), Ok(SearchMode::All));
        assert!("nope".parse::<SearchMode>().is_err());
    }
}
