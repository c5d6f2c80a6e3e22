//! Remote spreadsheet abstraction.
//!
//! The workflow talks to the spreadsheet service only through
//! [`SpreadsheetService`]; cell contents and addresses are the typed values
//! defined here.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Reference to a remote spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetRef {
    /// Opaque remote identifier.
    #[serde(rename = "ID")]
    pub id: String,
    /// Browser URL of the spreadsheet.
    #[serde(rename = "URL")]
    pub url: String,
}

/// Rectangular cell region in a single worksheet.
///
/// Columns are 0-based indices (`0` is `A`), rows are 1-based. Both ends are
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    /// First column index.
    pub start_column: u8,
    /// First row number.
    pub start_row: u32,
    /// Last column index.
    pub end_column: u8,
    /// Last row number.
    pub end_row: u32,
}

/// 0-based half-open rectangle, the shape grid-oriented APIs expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridBounds {
    /// First row index.
    pub start_row_index: u32,
    /// Row index past the last row.
    pub end_row_index: u32,
    /// First column index.
    pub start_column_index: u32,
    /// Column index past the last column.
    pub end_column_index: u32,
}

impl CellRange {
    /// Highest column index that has a single-letter name (`Z`).
    pub const LAST_COLUMN: u8 = 25;

    /// Letter naming the column at `index`. Callers keep `index` within
    /// [`CellRange::LAST_COLUMN`].
    #[must_use]
    pub fn column_letter(index: u8) -> char {
        char::from(b'A' + index)
    }

    /// A1 notation, e.g. `B2:M5`.
    #[must_use]
    pub fn to_a1(&self) -> String {
        self.to_string()
    }

    /// The same region as a 0-based half-open rectangle.
    #[must_use]
    pub fn grid_bounds(&self) -> GridBounds {
        GridBounds {
            start_row_index: self.start_row - 1,
            end_row_index: self.end_row,
            start_column_index: u32::from(self.start_column),
            end_column_index: u32::from(self.end_column) + 1,
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            Self::column_letter(self.start_column),
            self.start_row,
            Self::column_letter(self.end_column),
            self.end_row
        )
    }
}

/// Contents of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Literal text.
    Text(String),
    /// Integer number.
    Number(i64),
    /// Formula source, starting with `=`.
    Formula(String),
}

impl CellValue {
    /// Text rendering of the cell.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) | Self::Formula(text) => text.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Orientation of the matrix in a [`RangeWrite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorDimension {
    /// Each inner vector is one row.
    Rows,
    /// Each inner vector is one column.
    Columns,
}

impl MajorDimension {
    /// Wire name used by the remote API.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rows => "ROWS",
            Self::Columns => "COLUMNS",
        }
    }
}

/// One rectangle of values to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeWrite {
    /// Target region.
    pub range: CellRange,
    /// Orientation of `values`.
    pub major_dimension: MajorDimension,
    /// Cell values, outer vector along `major_dimension`.
    pub values: Vec<Vec<CellValue>>,
}

/// Remote spreadsheet collaborator.
#[async_trait]
pub trait SpreadsheetService: Send + Sync {
    /// Creates an empty spreadsheet with the given title.
    async fn create_sheet(&self, title: &str) -> Result<SpreadsheetRef, DomainError>;

    /// Deletes a spreadsheet.
    async fn delete_sheet(&self, sheet: &SpreadsheetRef) -> Result<(), DomainError>;

    /// Writes every range in one batch; either all of them land or none.
    async fn write_ranges(
        &self,
        sheet: &SpreadsheetRef,
        writes: &[RangeWrite],
    ) -> Result<(), DomainError>;

    /// Draws solid borders around each range.
    async fn draw_borders(
        &self,
        sheet: &SpreadsheetRef,
        ranges: &[CellRange],
    ) -> Result<(), DomainError>;

    /// Reads a range, returning rows of cells.
    async fn read_range(
        &self,
        sheet: &SpreadsheetRef,
        range: &CellRange,
    ) -> Result<Vec<Vec<CellValue>>, DomainError>;
}
