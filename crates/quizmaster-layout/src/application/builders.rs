//! Write requests for provisioning the game spreadsheets.
//!
//! Each builder walks the question groups of the layout and produces the
//! cell values for one kind of sheet content.

use std::collections::BTreeMap;

use quizmaster_core::error::DomainError;
use quizmaster_core::sheets::{CellRange, CellValue, MajorDimension, RangeWrite, SpreadsheetRef};

use crate::domain::groups::QuestionGroup;
use crate::domain::ranges::LayoutEngine;

/// Header of the team-name column on the manager sheet.
const TEAMS_HEADER: &str = "Teams";

/// Worksheet the cross-link formulas read from.
const TEAM_WORKSHEET: &str = "Sheet1";

fn build_groups<F>(layout: &LayoutEngine, build: F) -> Result<Vec<RangeWrite>, DomainError>
where
    F: FnMut(&QuestionGroup) -> Result<RangeWrite, DomainError>,
{
    layout.groups().iter().map(build).collect()
}

/// Manager sheet grid: per group, a team-name column followed by one column
/// headed by each question label.
///
/// Returns no writes for a game without teams.
///
/// # Errors
///
/// Returns `DomainError::GroupTooLarge` if a group does not fit the sheet.
pub fn manager_answer_groups(
    layout: &LayoutEngine,
    teams: &[String],
) -> Result<Vec<RangeWrite>, DomainError> {
    if teams.is_empty() {
        return Ok(Vec::new());
    }
    let teams_column: Vec<CellValue> = std::iter::once(CellValue::Text(TEAMS_HEADER.to_owned()))
        .chain(teams.iter().cloned().map(CellValue::Text))
        .collect();

    build_groups(layout, |group| {
        let range = layout.manager_range(group.index, group.length)?;
        let mut values = Vec::with_capacity(group.length + 1);
        values.push(teams_column.clone());
        values.extend(group.labels().map(|label| vec![CellValue::Number(label)]));
        Ok(RangeWrite {
            range,
            major_dimension: MajorDimension::Columns,
            values,
        })
    })
}

/// Team sheet grid: per group, a row of question labels above the row where
/// the team types its answers.
///
/// # Errors
///
/// Returns `DomainError::GroupTooLarge` if a group does not fit the sheet.
pub fn team_answer_groups(layout: &LayoutEngine) -> Result<Vec<RangeWrite>, DomainError> {
    build_groups(layout, |group| {
        let range = layout.team_range(group.index, group.length)?;
        Ok(RangeWrite {
            range,
            major_dimension: MajorDimension::Rows,
            values: vec![group.labels().map(CellValue::Number).collect()],
        })
    })
}

/// Manager sheet formulas importing every team's response row.
///
/// Returns no writes for a game without teams.
///
/// # Errors
///
/// Returns `DomainError::Validation` if a team has no registered
/// spreadsheet and `DomainError::GroupTooLarge` if a group does not fit.
pub fn link_groups(
    layout: &LayoutEngine,
    teams: &[String],
    team_sheets: &BTreeMap<String, SpreadsheetRef>,
) -> Result<Vec<RangeWrite>, DomainError> {
    if teams.is_empty() || layout.groups().is_empty() {
        return Ok(Vec::new());
    }
    let urls = teams
        .iter()
        .map(|team| {
            team_sheets
                .get(team)
                .map(|sheet| sheet.url.as_str())
                .ok_or_else(|| {
                    DomainError::Validation(format!("team {team} has no registered spreadsheet"))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    build_groups(layout, |group| {
        let range = layout.link_range(group.index, group.length)?;
        let response_row = layout.team_range(group.index, group.length)?.end_row;
        let values: Vec<Vec<CellValue>> = (0..group.length)
            .map(|offset| {
                #[allow(clippy::cast_possible_truncation)]
                let column = CellRange::column_letter(offset as u8);
                urls.iter()
                    .map(|url| {
                        CellValue::Formula(format!(
                            "=IMPORTRANGE(\"{url}\", \"{TEAM_WORKSHEET}!{column}{response_row}\")"
                        ))
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        Ok(RangeWrite {
            range,
            major_dimension: MajorDimension::Columns,
            values,
        })
    })
}

/// Rectangles framed with borders on a team sheet: the question row and the
/// response row of every group.
///
/// # Errors
///
/// Returns `DomainError::GroupTooLarge` if a group does not fit the sheet.
pub fn team_border_ranges(layout: &LayoutEngine) -> Result<Vec<CellRange>, DomainError> {
    layout
        .groups()
        .iter()
        .map(|group| {
            let range = layout.team_range(group.index, group.length)?;
            Ok(CellRange {
                end_column: range.end_column - 1,
                ..range
            })
        })
        .collect()
}
