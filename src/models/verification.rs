//! Carrier verification models.
//!
//! A verification is computed fresh for every request from two regulator
//! lookups. [`Verification`] is the typed outcome; [`VerificationResult`]
//! is its wire shape.

use serde::{Deserialize, Serialize};

/// Reason given when the MC number resolves to no carrier.
pub const NO_CARRIER_REASON: &str = "No carrier found for given MC number";

/// Reason given when the carrier lacks for-hire authority.
pub const NOT_AUTHORIZED_REASON: &str = "Carrier is not authorized";

/// A carrier as identified by the regulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    /// The carrier's DOT number.
    pub dot_number: String,
    /// The carrier's registered legal name, when the regulator reports one.
    pub legal_name: Option<String>,
}

/// Outcome of verifying a carrier by MC number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The MC number resolved to no carrier.
    NotFound,
    /// The carrier holds "Authorized For Hire" operating authority.
    Authorized(Carrier),
    /// The carrier exists but lacks for-hire authority.
    NotAuthorized(Carrier),
}

impl Verification {
    /// Returns true only for an authorized carrier.
    pub fn is_verified(&self) -> bool {
        matches!(self, Verification::Authorized(_))
    }

    /// Returns true if the MC number resolved to a carrier.
    pub fn is_found(&self) -> bool {
        !matches!(self, Verification::NotFound)
    }
}

/// Response body for a carrier verification.
///
/// All four fields are always present; absent values serialize as `null`.
///
/// # Example
///
/// ```
/// use freight_desk::models::{Verification, VerificationResult};
///
/// let result = VerificationResult::from(Verification::NotFound);
/// assert!(!result.verified);
/// assert_eq!(
///     result.reason.as_deref(),
///     Some("No carrier found for given MC number")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether the carrier may haul for hire.
    pub verified: bool,
    /// The carrier's legal name.
    pub legal_name: Option<String>,
    /// The carrier's DOT number.
    pub dot_number: Option<String>,
    /// Why verification failed, if it did.
    pub reason: Option<String>,
}

impl From<Verification> for VerificationResult {
    fn from(verification: Verification) -> Self {
        match verification {
            Verification::NotFound => VerificationResult {
                verified: false,
                legal_name: None,
                dot_number: None,
                reason: Some(NO_CARRIER_REASON.to_string()),
            },
            Verification::Authorized(carrier) => VerificationResult {
                verified: true,
                legal_name: carrier.legal_name,
                dot_number: Some(carrier.dot_number),
                reason: None,
            },
            Verification::NotAuthorized(carrier) => VerificationResult {
                verified: false,
                legal_name: carrier.legal_name,
                dot_number: Some(carrier.dot_number),
                reason: Some(NOT_AUTHORIZED_REASON.to_string()),
            },
        }
    }
}
