//! Create/edit form input and the payload sent to the API.
//!
//! [`CertificateDraft`] is deliberately loose: it is whatever either form
//! generation produced. [`CertificateDraft::into_payload`] is the single
//! place that reconciles the shapes: strings are trimmed, codes are parsed
//! the way `parseInt` would, missing dates become "now", and the nested and
//! flat location fields collapse into one flat set.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::certificate::{CertificateRecord, Location};
use super::coerce::{parse_leading_int, parse_timestamp, to_iso_string};
use super::enums::{CertificateType, ServiceMethod};
use crate::config::{CERT_PREFIX, PLACEHOLDER_SERIAL_RANGE};

/// Code used when a method or type is missing or unparseable.
const DEFAULT_CODE: i64 = 1;

/// An enum code as typed into a form: a number or numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CodeInput {
    Number(f64),
    Text(String),
}

impl CodeInput {
    fn parse(&self) -> Option<i64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            Self::Number(_) => None,
            Self::Text(s) => parse_leading_int(s),
        }
    }
}

impl From<i64> for CodeInput {
    fn from(code: i64) -> Self {
        Self::Number(code as f64)
    }
}

impl From<&str> for CodeInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<ServiceMethod> for CodeInput {
    fn from(method: ServiceMethod) -> Self {
        method.code().into()
    }
}

impl From<CertificateType> for CodeInput {
    fn from(kind: CertificateType) -> Self {
        kind.code().into()
    }
}

/// Unvalidated certificate fields from a create or edit form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "s_N", default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub method: Option<CodeInput>,
    #[serde(rename = "type", default)]
    pub kind: Option<CodeInput>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Older form shape.
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
}

impl CertificateDraft {
    /// Blank draft with a placeholder serial number, for a new-certificate form.
    pub fn with_placeholder_serial() -> Self {
        Self {
            serial_number: Some(placeholder_serial()),
            ..Self::default()
        }
    }

    /// Coerce into the API payload. `id` is set for updates only.
    pub fn into_payload(self, id: Option<i64>, now: DateTime<Utc>) -> CertificatePayload {
        let flat = Location {
            country: self.country.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            street_address: self.street_address.unwrap_or_default(),
        };
        let location = Location::merge(self.location.as_ref(), &flat);

        let date_or_now = |input: Option<String>| {
            let date = input.as_deref().and_then(parse_timestamp).unwrap_or(now);
            to_iso_string(&date)
        };

        CertificatePayload {
            sr_id: id,
            name: trimmed(self.name),
            serial_number: trimmed(self.serial_number),
            method: coerce_code(self.method.as_ref()),
            kind: coerce_code(self.kind.as_ref()),
            start_date: date_or_now(self.start_date),
            end_date: date_or_now(self.end_date),
            country: location.country,
            state: location.state,
            street_address: location.street_address,
        }
    }

    /// Whether the end date precedes the start date.
    ///
    /// Only the forms enforce this; the data-access layer sends what it gets.
    pub fn has_inverted_dates(&self) -> bool {
        let start = self.start_date.as_deref().and_then(parse_timestamp);
        let end = self.end_date.as_deref().and_then(parse_timestamp);
        matches!((start, end), (Some(start), Some(end)) if end < start)
    }
}

impl From<&CertificateRecord> for CertificateDraft {
    /// Pre-fill an edit form from an existing record.
    fn from(record: &CertificateRecord) -> Self {
        Self {
            name: Some(record.name.clone()),
            serial_number: Some(record.serial_number.clone()),
            method: record.method.map(CodeInput::from),
            kind: record.kind.map(CodeInput::from),
            start_date: record.start_date.as_ref().map(to_iso_string),
            end_date: record.end_date.as_ref().map(to_iso_string),
            location: None,
            country: Some(record.location.country.clone()),
            state: Some(record.location.state.clone()),
            street_address: Some(record.location.street_address.clone()),
        }
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

/// `parseInt(x) || 1`: zero and unparseable input both fall back.
fn coerce_code(input: Option<&CodeInput>) -> i64 {
    input
        .and_then(CodeInput::parse)
        .filter(|code| *code != 0)
        .unwrap_or(DEFAULT_CODE)
}

/// Random `CERT-NNNNN` serial to pre-fill a creation form.
///
/// A UI convenience only; nothing guarantees it is unused.
pub fn placeholder_serial() -> String {
    let n = rand::thread_rng().gen_range(PLACEHOLDER_SERIAL_RANGE);
    format!("{}{}", CERT_PREFIX, n)
}

/// Flat request body of `create` and `update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePayload {
    #[serde(rename = "srId", skip_serializing_if = "Option::is_none")]
    pub sr_id: Option<i64>,
    pub name: String,
    #[serde(rename = "s_N")]
    pub serial_number: String,
    pub method: i64,
    #[serde(rename = "type")]
    pub kind: i64,
    pub start_date: String,
    pub end_date: String,
    pub country: String,
    pub state: String,
    pub street_address: String,
}

impl CertificatePayload {
    /// The record this payload describes, for servers that answer with an
    /// empty body.
    pub fn to_record(&self) -> CertificateRecord {
        CertificateRecord {
            id: self.sr_id.unwrap_or(0),
            name: self.name.clone(),
            serial_number: self.serial_number.clone(),
            method: Some(self.method),
            kind: Some(self.kind),
            start_date: parse_timestamp(&self.start_date),
            end_date: parse_timestamp(&self.end_date),
            location: Location {
                country: self.country.clone(),
                state: self.state.clone(),
                street_address: self.street_address.clone(),
            },
        }
    }
}
