//! The normalized result of a crop price query.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Columns every crop price export must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["crop", "region", "district", "ts"];

/// One price record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CropPriceRecord {
    pub crop: String,
    /// Canonical region name, e.g. `Dar-Es-Salaam`.
    pub region: String,
    pub district: String,
    pub ts: NaiveDateTime,
    /// Every other column of the export, verbatim, keyed by header.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl CropPriceRecord {
    /// Calendar date of `ts`.
    pub fn date(&self) -> NaiveDate {
        self.ts.date()
    }

    /// Value of the named column in this row.
    pub fn get(&self, column: &str) -> Option<Cell<'_>> {
        match column {
            "crop" => Some(Cell::Text(&self.crop)),
            "region" => Some(Cell::Text(&self.region)),
            "district" => Some(Cell::Text(&self.district)),
            "ts" => Some(Cell::Timestamp(self.ts)),
            other => self.extra.get(other).map(|v| Cell::Text(v)),
        }
    }
}

/// A single value read out of a [`CropPriceTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell<'a> {
    Text(&'a str),
    Timestamp(NaiveDateTime),
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => f.write_str(text),
            Cell::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Rows of a crop price export, in source order, plus the source header order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CropPriceTable {
    columns: Vec<String>,
    rows: Vec<CropPriceRecord>,
}

impl CropPriceTable {
    pub fn new(columns: Vec<String>, rows: Vec<CropPriceRecord>) -> Self {
        Self { columns, rows }
    }

    /// Column names in the order the export listed them.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[CropPriceRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CropPriceRecord> {
        self.rows.iter()
    }

    /// All values of one column, top to bottom. `None` if the table has no such column.
    pub fn column(&self, name: &str) -> Option<Vec<Cell<'_>>> {
        if !self.columns.iter().any(|c| c == name) {
            return None;
        }
        self.rows.iter().map(|row| row.get(name)).collect()
    }

    pub fn into_rows(self) -> Vec<CropPriceRecord> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a CropPriceTable {
    type Item = &'a CropPriceRecord;
    type IntoIter = std::slice::Iter<'a, CropPriceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
