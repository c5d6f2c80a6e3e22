//! Round records.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Grading state of one team's response.
///
/// Persisted as an integer: 1 = OK, 2 = KO, 3 = in question, 4 = not
/// checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ResponseStatus {
    /// Accepted as correct.
    Ok,
    /// Rejected.
    Ko,
    /// Disputed, to be settled later.
    InQuestion,
    /// Not graded yet.
    NotChecked,
}

impl ResponseStatus {
    /// Parses an operator mark: `+`, `-`, `?` or an empty string.
    #[must_use]
    pub fn from_mark(mark: &str) -> Option<Self> {
        match mark {
            "+" => Some(Self::Ok),
            "-" => Some(Self::Ko),
            "?" => Some(Self::InQuestion),
            "" => Some(Self::NotChecked),
            _ => None,
        }
    }
}

impl From<ResponseStatus> for u8 {
    fn from(status: ResponseStatus) -> Self {
        match status {
            ResponseStatus::Ok => 1,
            ResponseStatus::Ko => 2,
            ResponseStatus::InQuestion => 3,
            ResponseStatus::NotChecked => 4,
        }
    }
}

impl TryFrom<u8> for ResponseStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Ok),
            2 => Ok(Self::Ko),
            3 => Ok(Self::InQuestion),
            4 => Ok(Self::NotChecked),
            other => Err(format!("unexpected status {other}")),
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = match self {
            Self::Ok => "+",
            Self::Ko => "-",
            Self::InQuestion => "?",
            Self::NotChecked => "{}",
        };
        f.write_str(mark)
    }
}

/// One team's answer to a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoundResponse {
    /// Free-text answer as typed by the team.
    pub response: String,
    /// Grading state.
    pub status: ResponseStatus,
}

/// Every team's answer to one round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoundResults {
    /// Round index; 0 is the warm-up question.
    pub round: u32,
    /// Responses keyed by team name.
    pub results: BTreeMap<String, RoundResponse>,
}

impl RoundResults {
    /// A freshly fetched round: every response starts as not checked.
    pub fn fetched<I>(round: u32, responses: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let results = responses
            .into_iter()
            .map(|(team, response)| {
                (
                    team,
                    RoundResponse {
                        response,
                        status: ResponseStatus::NotChecked,
                    },
                )
            })
            .collect();
        Self { round, results }
    }
}

impl fmt::Display for RoundResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Round {} results:", self.round)?;
        for (team, result) in &self.results {
            writeln!(f, "\t team {team}: {}\t{}", result.response, result.status)?;
        }
        Ok(())
    }
}
