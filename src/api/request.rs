//! Request types for the freight desk API.
//!
//! This module defines the query and JSON body structures accepted by the
//! endpoints, and the rules that turn a load search body into a
//! [`LoadSearch`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DeskError, DeskResult};
use crate::models::LaneQuery;

/// Query string of `GET /verify_carrier`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyCarrierQuery {
    /// The MC number, with or without an "MC" prefix.
    #[serde(default)]
    pub mc_number: Option<String>,
}

impl VerifyCarrierQuery {
    /// Returns the MC number if one was supplied and is not blank.
    pub fn mc_number(&self) -> Option<&str> {
        self.mc_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Body of `POST /find_available_loads`.
///
/// Callers send either a reference number or a full lane. The reference
/// number may be a JSON string or number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadSearchRequest {
    /// Exact reference number to look up.
    #[serde(default)]
    pub reference_number: Option<Value>,
    /// Origin substring.
    #[serde(default)]
    pub origin: Option<String>,
    /// Destination substring.
    #[serde(default)]
    pub destination: Option<String>,
    /// Equipment type substring.
    #[serde(default)]
    pub equipment_type: Option<String>,
}

/// A validated load search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSearch {
    /// Exact lookup by reference number, as supplied (not yet normalised).
    Reference(String),
    /// Substring search over origin, destination and equipment type.
    Lane(LaneQuery),
}

impl LoadSearchRequest {
    /// Picks the search to run.
    ///
    /// A non-blank reference number wins over lane fields. Otherwise all
    /// three lane fields must be non-blank.
    pub fn into_search(self) -> DeskResult<LoadSearch> {
        if let Some(reference) = reference_text(self.reference_number)? {
            return Ok(LoadSearch::Reference(reference));
        }

        match (
            non_blank(self.origin),
            non_blank(self.destination),
            non_blank(self.equipment_type),
        ) {
            (Some(origin), Some(destination), Some(equipment_type)) => Ok(LoadSearch::Lane(
                LaneQuery::new(origin, destination, equipment_type),
            )),
            _ => Err(DeskError::InsufficientSearchCriteria),
        }
    }
}

fn reference_text(value: Option<Value>) -> DeskResult<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(non_blank(Some(s))),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(DeskError::InvalidReference {
            value: other.to_string(),
            message: "reference_number must be a string or a number".to_string(),
        }),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> DeskResult<LoadSearch> {
        serde_json::from_value::<LoadSearchRequest>(body)
            .unwrap()
            .into_search()
    }

    #[test]
    fn test_reference_search() {
        assert_eq!(
            parse(json!({"reference_number": "ref100 "})).unwrap(),
            LoadSearch::Reference("ref100 ".to_string())
        );
    }

    #[test]
    fn test_numeric_reference_is_accepted() {
        assert_eq!(
            parse(json!({"reference_number": 100})).unwrap(),
            LoadSearch::Reference("100".to_string())
        );
    }

    #[test]
    fn test_reference_takes_precedence_over_lane() {
        let search = parse(json!({
            "reference_number": "REF100",
            "origin": "Houston",
            "destination": "Denver",
            "equipment_type": "Flatbed"
        }))
        .unwrap();
        assert_eq!(search, LoadSearch::Reference("REF100".to_string()));
    }

    #[test]
    fn test_blank_reference_falls_through_to_lane() {
        let search = parse(json!({
            "reference_number": "  ",
            "origin": "dallas",
            "destination": "chicago",
            "equipment_type": "reef"
        }))
        .unwrap();
        assert_eq!(
            search,
            LoadSearch::Lane(LaneQuery::new("dallas", "chicago", "reef"))
        );
    }

    #[test]
    fn test_partial_lane_is_insufficient() {
        let result = parse(json!({"origin": "dallas", "destination": "chicago"}));
        assert!(matches!(result, Err(DeskError::InsufficientSearchCriteria)));

        let result = parse(json!({"origin": "dallas", "destination": "chicago", "equipment_type": ""}));
        assert!(matches!(result, Err(DeskError::InsufficientSearchCriteria)));
    }

    #[test]
    fn test_empty_body_is_insufficient() {
        assert!(matches!(
            parse(json!({})),
            Err(DeskError::InsufficientSearchCriteria)
        ));
        assert!(matches!(
            parse(json!({"reference_number": null})),
            Err(DeskError::InsufficientSearchCriteria)
        ));
    }

    #[test]
    fn test_non_scalar_reference_is_invalid() {
        let result = parse(json!({"reference_number": ["REF100"]}));
        assert!(matches!(result, Err(DeskError::InvalidReference { .. })));

        let result = parse(json!({"reference_number": true}));
        assert!(matches!(result, Err(DeskError::InvalidReference { .. })));
    }

    #[test]
    fn test_verify_query_blank_mc_number() {
        let query = VerifyCarrierQuery {
            mc_number: Some("  ".to_string()),
        };
        assert_eq!(query.mc_number(), None);

        let query = VerifyCarrierQuery {
            mc_number: Some(" MC123456 ".to_string()),
        };
        assert_eq!(query.mc_number(), Some("MC123456"));
    }
}
