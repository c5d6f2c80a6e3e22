//! Test spreadsheet services — mock `SpreadsheetService` implementations.

use std::sync::Mutex;

use async_trait::async_trait;
use quizmaster_core::error::DomainError;
use quizmaster_core::sheets::{CellRange, CellValue, RangeWrite, SpreadsheetRef, SpreadsheetService};

/// One call received by a [`RecordingSheetService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetCall {
    /// `create_sheet` with the requested title.
    Create(String),
    /// `delete_sheet` with the sheet id.
    Delete(String),
    /// `write_ranges` with the sheet id and the writes.
    Write(String, Vec<RangeWrite>),
    /// `draw_borders` with the sheet id and the ranges.
    Borders(String, Vec<CellRange>),
    /// `read_range` with the sheet id and the range.
    Read(String, CellRange),
}

/// A spreadsheet service that records every call. Created sheets get ids
/// `sheet-1`, `sheet-2`, … and every read returns the configured rows.
#[derive(Debug, Default)]
pub struct RecordingSheetService {
    calls: Mutex<Vec<SheetCall>>,
    created: Mutex<u32>,
    read_result: Mutex<Vec<Vec<CellValue>>>,
}

impl RecordingSheetService {
    /// Creates a service whose reads return no rows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service whose reads return `rows`.
    #[must_use]
    pub fn with_read_result(rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            read_result: Mutex::new(rows),
            ..Self::default()
        }
    }

    /// Returns a snapshot of every call received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<SheetCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: SheetCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SpreadsheetService for RecordingSheetService {
    async fn create_sheet(&self, title: &str) -> Result<SpreadsheetRef, DomainError> {
        self.record(SheetCall::Create(title.to_owned()));
        let mut created = self.created.lock().unwrap();
        *created += 1;
        let id = format!("sheet-{created}");
        Ok(SpreadsheetRef {
            url: format!("https://sheets.test/{id}"),
            id,
        })
    }

    async fn delete_sheet(&self, sheet: &SpreadsheetRef) -> Result<(), DomainError> {
        self.record(SheetCall::Delete(sheet.id.clone()));
        Ok(())
    }

    async fn write_ranges(
        &self,
        sheet: &SpreadsheetRef,
        writes: &[RangeWrite],
    ) -> Result<(), DomainError> {
        self.record(SheetCall::Write(sheet.id.clone(), writes.to_vec()));
        Ok(())
    }

    async fn draw_borders(
        &self,
        sheet: &SpreadsheetRef,
        ranges: &[CellRange],
    ) -> Result<(), DomainError> {
        self.record(SheetCall::Borders(sheet.id.clone(), ranges.to_vec()));
        Ok(())
    }

    async fn read_range(
        &self,
        sheet: &SpreadsheetRef,
        range: &CellRange,
    ) -> Result<Vec<Vec<CellValue>>, DomainError> {
        self.record(SheetCall::Read(sheet.id.clone(), *range));
        Ok(self.read_result.lock().unwrap().clone())
    }
}

/// A spreadsheet service that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingSheetService;

#[async_trait]
impl SpreadsheetService for FailingSheetService {
    async fn create_sheet(&self, _title: &str) -> Result<SpreadsheetRef, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn delete_sheet(&self, _sheet: &SpreadsheetRef) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn write_ranges(
        &self,
        _sheet: &SpreadsheetRef,
        _writes: &[RangeWrite],
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn draw_borders(
        &self,
        _sheet: &SpreadsheetRef,
        _ranges: &[CellRange],
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn read_range(
        &self,
        _sheet: &SpreadsheetRef,
        _range: &CellRange,
    ) -> Result<Vec<Vec<CellValue>>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
