//! Grading of a round.

use std::collections::BTreeMap;

use tracing::warn;

use super::round::{ResponseStatus, RoundResults};

/// Applies the operator's decisions to a round.
///
/// Any status may replace any other, including a return to not checked.
/// Teams without a decision keep their current status; decisions for teams
/// that have no response in the round are ignored.
#[must_use]
pub fn grade_round(
    mut results: RoundResults,
    decisions: &BTreeMap<String, ResponseStatus>,
) -> RoundResults {
    for (team, &status) in decisions {
        match results.results.get_mut(team) {
            Some(response) => response.status = status,
            None => warn!(
                round = results.round,
                team = %team,
                "ignoring decision for team without a response"
            ),
        }
    }
    results
}
