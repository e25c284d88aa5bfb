//! The certificate record and its wire normalization.
//!
//! Two schema generations coexist on the wire. The older one nests
//! `location { country, state, streetAddress }`; the newer one carries a
//! `type` code and flat location fields. Both deserialize into the same
//! [`CertificateRecord`], which always serializes in the newer, flat shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::coerce::{de_code, de_string, de_timestamp, ser_timestamp};
use super::enums::{CertificateType, ServiceMethod, method_label, type_label};
use crate::config::{CERT_PREFIX, NOT_AVAILABLE};

// ============================================================================
// Location
// ============================================================================

/// Denormalized location metadata. Empty strings mean "not recorded".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, deserialize_with = "de_string")]
    pub country: String,
    #[serde(default, deserialize_with = "de_string")]
    pub state: String,
    #[serde(default, deserialize_with = "de_string")]
    pub street_address: String,
}

impl Location {
    pub fn is_empty(&self) -> bool {
        self.country.trim().is_empty()
            && self.state.trim().is_empty()
            && self.street_address.trim().is_empty()
    }

    /// Merge a nested location over flat fields; a non-blank nested value wins.
    ///
    /// Every field of the result is trimmed.
    pub fn merge(nested: Option<&Location>, flat: &Location) -> Self {
        fn pick(nested: Option<&str>, flat: &str) -> String {
            nested
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| flat.trim())
                .to_string()
        }

        Self {
            country: pick(nested.map(|l| l.country.as_str()), &flat.country),
            state: pick(nested.map(|l| l.state.as_str()), &flat.state),
            street_address: pick(
                nested.map(|l| l.street_address.as_str()),
                &flat.street_address,
            ),
        }
    }

    /// `street, state, country` of the non-blank parts, or `N/A`.
    pub fn display(&self) -> String {
        let parts: Vec<&str> = [&self.street_address, &self.state, &self.country]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            parts.join(", ")
        }
    }
}

// ============================================================================
// CertificateRecord
// ============================================================================

/// One issued inspection certificate, in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireCertificate")]
pub struct CertificateRecord {
    /// Server-assigned id (`srId`). `0` when the server omitted it.
    #[serde(rename = "srId")]
    pub id: i64,
    pub name: String,
    #[serde(rename = "s_N")]
    pub serial_number: String,
    /// Raw method code; see [`CertificateRecord::method`].
    pub method: Option<i64>,
    /// Raw certificate type code; absent in the older schema.
    #[serde(rename = "type")]
    pub kind: Option<i64>,
    #[serde(rename = "startDate", serialize_with = "ser_timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate", serialize_with = "ser_timestamp")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub location: Location,
}

impl CertificateRecord {
    pub fn method(&self) -> Option<ServiceMethod> {
        self.method.and_then(ServiceMethod::from_code)
    }

    pub fn certificate_type(&self) -> Option<CertificateType> {
        self.kind.and_then(CertificateType::from_code)
    }

    pub fn method_label(&self) -> &'static str {
        method_label(self.method)
    }

    pub fn type_label(&self) -> &'static str {
        type_label(self.kind)
    }

    /// Display id, `CERT-<id>` or `CERT-Unknown`.
    pub fn display_id(&self) -> String {
        if self.id == 0 {
            format!("{}Unknown", CERT_PREFIX)
        } else {
            format!("{}{}", CERT_PREFIX, self.id)
        }
    }

    /// Whether the certificate is still valid at `now`.
    ///
    /// A record without a readable end date counts as expired.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.end_date.is_some_and(|end| end > now)
    }
}

/// Parse a record id, accepting the `CERT-` display prefix.
pub fn parse_certificate_id(input: &str) -> Option<i64> {
    let input = input.trim();
    let digits = input.strip_prefix(CERT_PREFIX).unwrap_or(input);
    digits.parse().ok()
}

// ============================================================================
// Wire shape
// ============================================================================

/// Every field either schema generation may send.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCertificate {
    #[serde(rename = "srId", default, deserialize_with = "de_code")]
    sr_id: Option<i64>,
    #[serde(default, deserialize_with = "de_code")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "de_string")]
    name: String,
    #[serde(rename = "s_N", default, deserialize_with = "de_string")]
    serial_number: String,
    #[serde(default, deserialize_with = "de_code")]
    method: Option<i64>,
    #[serde(rename = "type", default, deserialize_with = "de_code")]
    kind: Option<i64>,
    #[serde(default, deserialize_with = "de_timestamp")]
    start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_timestamp")]
    end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_string")]
    country: String,
    #[serde(default, deserialize_with = "de_string")]
    state: String,
    #[serde(default, deserialize_with = "de_string")]
    street_address: String,
    #[serde(default)]
    location: Option<Location>,
}

impl From<WireCertificate> for CertificateRecord {
    fn from(wire: WireCertificate) -> Self {
        let flat = Location {
            country: wire.country,
            state: wire.state,
            street_address: wire.street_address,
        };

        Self {
            id: wire.sr_id.or(wire.id).unwrap_or(0),
            name: wire.name,
            serial_number: wire.serial_number,
            method: wire.method,
            kind: wire.kind,
            start_date: wire.start_date,
            end_date: wire.end_date,
            location: Location::merge(wire.location.as_ref(), &flat),
        }
    }
}

/// Decode a record from any JSON value, `None` if it is not an object.
pub(crate) fn record_from_value(value: serde_json::Value) -> Option<CertificateRecord> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

/// Decode a JSON array of records, skipping entries that are not objects.
///
/// Any non-array input yields an empty list.
pub(crate) fn records_from_value(value: serde_json::Value) -> Vec<CertificateRecord> {
    match value {
        serde_json::Value::Array(items) => {
            items.into_iter().filter_map(record_from_value).collect()
        }
        _ => Vec::new(),
    }
}
