//! Load model and reference-number handling.
//!
//! This module defines the [`Load`] row type held by the dataset store,
//! the [`ReferenceKind`] key schema, and the [`LaneQuery`] used for
//! origin/destination/equipment searches.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{DeskError, DeskResult};

/// Column holding the unique load identifier.
pub const REFERENCE_COLUMN: &str = "reference_number";
/// Column holding the pickup location.
pub const ORIGIN_COLUMN: &str = "origin";
/// Column holding the delivery location.
pub const DESTINATION_COLUMN: &str = "destination";
/// Column holding the required trailer type.
pub const EQUIPMENT_COLUMN: &str = "equipment_type";

/// Columns every dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    REFERENCE_COLUMN,
    ORIGIN_COLUMN,
    DESTINATION_COLUMN,
    EQUIPMENT_COLUMN,
];

/// The key schema of the reference-number column.
///
/// Datasets in the field carry either free-text references (`"REF100"`)
/// or purely numeric ones (`100`). The kind decides how both the column
/// and incoming queries are normalised before they are compared.
///
/// # Example
///
/// ```
/// use freight_desk::models::ReferenceKind;
///
/// assert_eq!(ReferenceKind::Text.normalize(" ref100 ").unwrap(), "REF100");
/// assert_eq!(ReferenceKind::Integer.normalize(" 0042").unwrap(), "42");
/// assert!(ReferenceKind::Integer.normalize("REF100").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceKind {
    /// Free text, compared trimmed and upper-cased.
    #[default]
    Text,
    /// Signed 64-bit integer, compared by value.
    Integer,
}

impl ReferenceKind {
    /// Normalises a raw reference number into its lookup key.
    ///
    /// Returns `InvalidReference` if the trimmed value is empty or, for
    /// integer keys, does not parse as an integer.
    pub fn normalize(&self, raw: &str) -> DeskResult<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DeskError::InvalidReference {
                value: raw.to_string(),
                message: "reference number is empty".to_string(),
            });
        }

        match self {
            ReferenceKind::Text => Ok(trimmed.to_uppercase()),
            ReferenceKind::Integer => trimmed
                .parse::<i64>()
                .map(|n| n.to_string())
                .map_err(|_| DeskError::InvalidReference {
                    value: raw.to_string(),
                    message: "expected an integer reference number".to_string(),
                }),
        }
    }

    /// Renders a normalised key as the JSON value returned to callers.
    pub fn to_json(&self, key: &str) -> Value {
        match self {
            ReferenceKind::Text => Value::String(key.to_string()),
            ReferenceKind::Integer => key
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(key.to_string())),
        }
    }
}

impl FromStr for ReferenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" | "text" => Ok(ReferenceKind::Text),
            "integer" | "int" => Ok(ReferenceKind::Integer),
            other => Err(format!(
                "unknown reference kind '{}', expected 'string' or 'integer'",
                other
            )),
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Text => write!(f, "string"),
            ReferenceKind::Integer => write!(f, "integer"),
        }
    }
}

/// A single row of the load dataset.
///
/// The lane fields are held as text for matching; `record` keeps every
/// column of the source row, in source order, exactly as it is returned
/// to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct Load {
    reference: String,
    origin: String,
    destination: String,
    equipment_type: String,
    record: Map<String, Value>,
}

impl Load {
    /// Builds a load from its normalised key, lane fields and full record.
    pub fn new(
        reference: String,
        origin: String,
        destination: String,
        equipment_type: String,
        record: Map<String, Value>,
    ) -> Self {
        Self {
            reference,
            origin,
            destination,
            equipment_type,
            record,
        }
    }

    /// The normalised reference number.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// The pickup location.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The delivery location.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// The required trailer type.
    pub fn equipment_type(&self) -> &str {
        &self.equipment_type
    }

    /// Every column of the row, keyed by header name.
    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }
}

impl Serialize for Load {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}

/// An origin/destination/equipment search.
///
/// Every field matches as a case-insensitive substring of the
/// corresponding load column.
///
/// # Example
///
/// ```
/// use freight_desk::models::LaneQuery;
///
/// let query = LaneQuery::new("dallas", "chicago", "reef");
/// assert!(query.matches_fields("Dallas, TX", "Chicago, IL", "Reefer"));
/// assert!(!query.matches_fields("Dallas, TX", "Chicago, IL", "Flatbed"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneQuery {
    origin: String,
    destination: String,
    equipment_type: String,
}

impl LaneQuery {
    /// Creates a lane query; inputs are trimmed and lower-cased once here.
    pub fn new(
        origin: impl AsRef<str>,
        destination: impl AsRef<str>,
        equipment_type: impl AsRef<str>,
    ) -> Self {
        Self {
            origin: origin.as_ref().trim().to_lowercase(),
            destination: destination.as_ref().trim().to_lowercase(),
            equipment_type: equipment_type.as_ref().trim().to_lowercase(),
        }
    }

    /// Returns true if the load satisfies all three criteria.
    pub fn matches(&self, load: &Load) -> bool {
        self.matches_fields(load.origin(), load.destination(), load.equipment_type())
    }

    /// Returns true if the given column values satisfy all three criteria.
    pub fn matches_fields(&self, origin: &str, destination: &str, equipment_type: &str) -> bool {
        contains_ignore_case(origin, &self.origin)
            && contains_ignore_case(destination, &self.destination)
            && contains_ignore_case(equipment_type, &self.equipment_type)
    }
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
