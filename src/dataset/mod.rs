//! Load dataset storage.
//!
//! The dataset is a CSV file with at least the columns `reference_number`,
//! `origin`, `destination` and `equipment_type`. It is read once at
//! startup and never written.
//!
//! # Example
//!
//! ```no_run
//! use freight_desk::dataset::LoadTable;
//! use freight_desk::models::ReferenceKind;
//!
//! let table = LoadTable::load("./data/loads.csv", ReferenceKind::Text).unwrap();
//! println!("Loaded {} loads", table.len());
//! ```

mod table;

pub use table::LoadTable;
