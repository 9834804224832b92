//! Core data models for the freight desk service.
//!
//! This module contains the domain models shared by the dataset store,
//! the carrier client and the HTTP layer.

mod load;
mod verification;

pub use load::{
    DESTINATION_COLUMN, EQUIPMENT_COLUMN, LaneQuery, Load, ORIGIN_COLUMN, REFERENCE_COLUMN,
    REQUIRED_COLUMNS, ReferenceKind,
};
pub use verification::{
    Carrier, NO_CARRIER_REASON, NOT_AUTHORIZED_REASON, Verification, VerificationResult,
};
