//! Domain error types.

use thiserror::Error;

/// Coarse classification of a [`DomainError`].
///
/// Callers branch on the kind rather than on variant payloads or messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A bucket was looked up that the store does not contain.
    MissingBucket,
    /// A round has never been fetched into the store.
    RoundNotFound,
    /// A stored value could not be encoded or decoded.
    Serialization,
    /// A computed layout would not fit the sheet addressing scheme.
    LayoutConstraint,
    /// A results record names a team outside the configured roster.
    UnknownTeam,
    /// Invalid configuration or operator input.
    Validation,
    /// Storage engine, filesystem or remote service failure.
    Infrastructure,
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The named bucket does not exist in the store.
    #[error("bucket {0} does not exist")]
    MissingBucket(&'static str),

    /// No results have been stored for the round.
    #[error("round {0} results are not found")]
    RoundNotFound(u32),

    /// Encoding or decoding a stored value failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A question group does not fit in single-letter columns.
    #[error("group length {length} exceeds the maximum of {max}")]
    GroupTooLarge {
        /// Requested group length.
        length: usize,
        /// Largest length the range accepts.
        max: usize,
    },

    /// The round index is past the last question.
    #[error("round {round} is out of range [0; {question_count})")]
    RoundOutOfRange {
        /// Requested round.
        round: u32,
        /// Number of questions in the game.
        question_count: u32,
    },

    /// A block of rows would start or end past the last addressable row.
    #[error("group {group_index} with {team_count} teams lies past the last addressable row")]
    RowOverflow {
        /// Index of the group whose block does not fit.
        group_index: u32,
        /// Number of teams in the game.
        team_count: u32,
    },

    /// Round 0 was requested for a game without a warm-up question.
    #[error("round 0 is invalid as the game does not have a warm-up question")]
    WarmUpUnavailable,

    /// A team that is not part of the game roster.
    #[error("team {0} is unknown")]
    UnknownTeam(String),

    /// A validation error in configuration or input.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingBucket(_) => ErrorKind::MissingBucket,
            Self::RoundNotFound(_) => ErrorKind::RoundNotFound,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::GroupTooLarge { .. }
            | Self::RowOverflow { .. }
            | Self::RoundOutOfRange { .. }
            | Self::WarmUpUnavailable => ErrorKind::LayoutConstraint,
            Self::UnknownTeam(_) => ErrorKind::UnknownTeam,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Infrastructure(_) => ErrorKind::Infrastructure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_variants_share_one_kind() {
        let errors = [
            DomainError::GroupTooLarge { length: 26, max: 25 },
            DomainError::RoundOutOfRange {
                round: 9,
                question_count: 3,
            },
            DomainError::RowOverflow {
                group_index: u32::MAX,
                team_count: 30,
            },
            DomainError::WarmUpUnavailable,
        ];
        for err in errors {
            assert_eq!(err.kind(), ErrorKind::LayoutConstraint);
        }
    }

    #[test]
    fn test_round_not_found_message_carries_round() {
        let err = DomainError::RoundNotFound(7);
        assert_eq!(err.kind(), ErrorKind::RoundNotFound);
        assert_eq!(err.to_string(), "round 7 results are not found");
    }

    #[test]
    fn test_serde_error_converts_to_serialization_kind() {
        let err: DomainError = serde_json::from_slice::<u32>(b"not json").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }
}
