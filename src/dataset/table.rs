//! The in-memory load table.
//!
//! This module provides [`LoadTable`], which parses a CSV file of loads
//! once at startup, indexes it by normalised reference number and answers
//! reference and lane queries for the lifetime of the process.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};
use tracing::info;

use crate::error::{DeskError, DeskResult};
use crate::models::{
    DESTINATION_COLUMN, EQUIPMENT_COLUMN, LaneQuery, Load, ORIGIN_COLUMN, REFERENCE_COLUMN,
    REQUIRED_COLUMNS, ReferenceKind,
};

/// Immutable, indexed table of loads.
///
/// Built once by [`LoadTable::load`] and shared read-only between request
/// handlers. Reference lookups go through a hash index; lane searches scan
/// the rows in file order.
///
/// # Example
///
/// ```
/// use freight_desk::dataset::LoadTable;
/// use freight_desk::models::{LaneQuery, ReferenceKind};
///
/// let csv = "reference_number,origin,destination,equipment_type\n\
///            REF100,Dallas,Chicago,Reefer\n";
/// let table = LoadTable::from_reader(csv.as_bytes(), ReferenceKind::Text)?;
///
/// assert_eq!(table.find_by_reference("ref100 ")?.origin(), "Dallas");
/// assert_eq!(table.find_by_lane(&LaneQuery::new("dallas", "chicago", "reef")).len(), 1);
/// # Ok::<(), freight_desk::error::DeskError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LoadTable {
    kind: ReferenceKind,
    columns: Vec<String>,
    loads: Vec<Load>,
    index: HashMap<String, usize>,
    loaded_at: DateTime<Utc>,
}

impl LoadTable {
    /// Loads and indexes the CSV file at `path`.
    ///
    /// # Returns
    ///
    /// Returns the table on success, or an error if:
    /// - The file cannot be opened
    /// - The CSV is malformed or a required column is missing
    /// - A row has no reference number, or one that does not fit `kind`
    /// - Two rows normalise to the same reference number
    pub fn load<P: AsRef<Path>>(path: P, kind: ReferenceKind) -> DeskResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let file = File::open(path).map_err(|_| DeskError::DatasetNotFound {
            path: path_str.clone(),
        })?;

        let table = Self::parse(file, kind, &path_str)?;
        info!(
            path = %path_str,
            loads = table.len(),
            reference_kind = %kind,
            "Load dataset ready"
        );
        Ok(table)
    }

    /// Parses a table from any CSV source.
    pub fn from_reader<R: Read>(reader: R, kind: ReferenceKind) -> DeskResult<Self> {
        Self::parse(reader, kind, "<reader>")
    }

    fn parse<R: Read>(reader: R, kind: ReferenceKind, source: &str) -> DeskResult<Self> {
        let parse_error = |message: String| DeskError::DatasetParseError {
            path: source.to_string(),
            message,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| parse_error(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                return Err(parse_error(format!("duplicate column '{}'", column)));
            }
        }

        let position = |name: &str| -> DeskResult<usize> {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| DeskError::MissingColumn {
                    path: source.to_string(),
                    column: name.to_string(),
                })
        };
        for required in REQUIRED_COLUMNS {
            position(required)?;
        }
        let reference_idx = position(REFERENCE_COLUMN)?;
        let origin_idx = position(ORIGIN_COLUMN)?;
        let destination_idx = position(DESTINATION_COLUMN)?;
        let equipment_idx = position(EQUIPMENT_COLUMN)?;

        let mut loads = Vec::new();
        let mut index = HashMap::new();

        for (idx, result) in reader.records().enumerate() {
            let row = idx + 1;
            let record = result.map_err(|e| parse_error(format!("row {}: {}", row, e)))?;
            let cell = |i: usize| record.get(i).unwrap_or("");

            let raw_reference = cell(reference_idx);
            if raw_reference.trim().is_empty() {
                return Err(DeskError::MissingReference { row });
            }
            let reference = kind
                .normalize(raw_reference)
                .map_err(|e| parse_error(format!("row {}: {}", row, e)))?;

            if index.contains_key(&reference) {
                return Err(DeskError::DuplicateReference { reference });
            }

            let mut fields = Map::with_capacity(columns.len());
            for (i, column) in columns.iter().enumerate() {
                let value = if i == reference_idx {
                    kind.to_json(&reference)
                } else if i == origin_idx || i == destination_idx || i == equipment_idx {
                    Value::String(cell(i).to_string())
                } else {
                    infer_cell(cell(i))
                };
                fields.insert(column.clone(), value);
            }

            index.insert(reference.clone(), loads.len());
            loads.push(Load::new(
                reference,
                cell(origin_idx).to_string(),
                cell(destination_idx).to_string(),
                cell(equipment_idx).to_string(),
                fields,
            ));
        }

        Ok(Self {
            kind,
            columns,
            loads,
            index,
            loaded_at: Utc::now(),
        })
    }

    /// Finds the load with the given reference number.
    ///
    /// The input is normalised the same way the column was, so casing and
    /// surrounding whitespace do not matter for text keys.
    ///
    /// # Returns
    ///
    /// Returns the load, `InvalidReference` if the input cannot be
    /// normalised, or `LoadNotFound` if no row carries it.
    pub fn find_by_reference(&self, reference: &str) -> DeskResult<&Load> {
        let key = self.kind.normalize(reference)?;
        self.index
            .get(&key)
            .map(|&i| &self.loads[i])
            .ok_or(DeskError::LoadNotFound { reference: key })
    }

    /// Returns every load on the lane, in file order.
    ///
    /// An empty result is not an error here; callers decide what it means.
    pub fn find_by_lane(&self, query: &LaneQuery) -> Vec<&Load> {
        self.loads.iter().filter(|load| query.matches(load)).collect()
    }

    /// Header names, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// When the table was built.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Number of loads.
    pub fn len(&self) -> usize {
        self.loads.len()
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }
}

/// Types a non-key cell: blank is null, numeric text is a number.
fn infer_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::from(n);
    }
    if let Some(n) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(raw.to_string())
}
