//! Wire types for the FMCSA carrier API.
//!
//! Only the fields the service reads are modelled. Every field is
//! optional so that schema drift upstream degrades to "not found" rather
//! than a decode failure.

use serde::Deserialize;

/// The operation classification that grants for-hire authority.
pub const AUTHORIZED_FOR_HIRE: &str = "Authorized For Hire";

/// Response of `GET /docket-number/{mc}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocketResponse {
    /// Matching carriers; `null` and absent both mean none.
    #[serde(default)]
    pub content: Option<Vec<DocketEntry>>,
}

/// One entry of a docket lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocketEntry {
    /// The carrier record.
    #[serde(default)]
    pub carrier: Option<CarrierRecord>,
}

/// Carrier details as reported by the regulator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierRecord {
    /// USDOT number.
    #[serde(default)]
    pub dot_number: Option<DotNumber>,
    /// Registered legal name.
    #[serde(default)]
    pub legal_name: Option<String>,
}

/// A DOT number, which the API sends as either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DotNumber {
    /// Numeric form, e.g. `1234567`.
    Numeric(u64),
    /// Text form, e.g. `"1234567"`.
    Text(String),
}

impl DotNumber {
    /// Returns the DOT number as text, or `None` if it is blank.
    pub fn to_key(&self) -> Option<String> {
        match self {
            DotNumber::Numeric(n) => Some(n.to_string()),
            DotNumber::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }
}

/// Response of `GET /{dot}/operation-classification`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassificationResponse {
    /// Classifications held by the carrier.
    #[serde(default)]
    pub content: Option<Vec<OperationClassification>>,
}

impl ClassificationResponse {
    /// Returns true if any classification is exactly "Authorized For Hire".
    pub fn is_authorized_for_hire(&self) -> bool {
        self.content.iter().flatten().any(|entry| {
            entry.operation_class_desc.as_deref() == Some(AUTHORIZED_FOR_HIRE)
        })
    }
}

/// A single operation classification.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationClassification {
    /// Human-readable classification, e.g. "Authorized For Hire".
    #[serde(default)]
    pub operation_class_desc: Option<String>,
}
