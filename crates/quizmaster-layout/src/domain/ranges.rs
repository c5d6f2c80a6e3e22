//! Cell addressing for the manager grid, the team grids, the cross-links and
//! the round lookup.
//!
//! Every group occupies a block of rows; blocks are stacked vertically so the
//! ranges of two different groups never overlap. On the manager sheet a
//! block is a header row, one row per team and one blank separator row. On a
//! team sheet a block is a question row, a response row and a separator.

use quizmaster_core::config::GameConfig;
use quizmaster_core::error::DomainError;
use quizmaster_core::sheets::CellRange;
use tracing::debug;

use super::groups::{GROUP_SIZE, QuestionGroup, batch_questions};

/// Rows a team sheet block spans, separator included.
const TEAM_BLOCK_HEIGHT: u32 = 3;

/// Column holding team names on the manager sheet.
const MANAGER_FIRST_COLUMN: u8 = 0;
/// Column of the first question on the team sheet.
const TEAM_FIRST_COLUMN: u8 = 0;
/// First column receiving linked team answers on the manager sheet.
const LINK_FIRST_COLUMN: u8 = 1;

/// Layout of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEngine {
    question_count: u32,
    has_warm_up: bool,
    team_count: u32,
}

impl LayoutEngine {
    /// Creates the layout for the given game parameters.
    #[must_use]
    pub fn new(question_count: u32, has_warm_up: bool, team_count: u32) -> Self {
        Self {
            question_count,
            has_warm_up,
            team_count,
        }
    }

    /// Creates the layout described by a game configuration.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        let team_count = u32::try_from(config.team_count()).unwrap_or(u32::MAX);
        Self::new(
            config.number_of_questions,
            config.has_warm_up_question,
            team_count,
        )
    }

    /// Question groups in emission order.
    #[must_use]
    pub fn groups(&self) -> Vec<QuestionGroup> {
        batch_questions(self.question_count, self.has_warm_up)
    }

    /// First and last row of the manager sheet block of `group_index`. A
    /// block is a header row, one row per team and a separator row.
    fn manager_block(&self, group_index: u32) -> Result<(u32, u32), DomainError> {
        self.team_count
            .checked_add(2)
            .and_then(|height| block_rows(group_index, height))
            .ok_or(DomainError::RowOverflow {
                group_index,
                team_count: self.team_count,
            })
    }

    /// Range written for a group on the manager sheet: the team-name column
    /// followed by one column per question, over the header row, one row per
    /// team and the separator row.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GroupTooLarge` if `length` exceeds 25 and
    /// `DomainError::RowOverflow` if the block lies past the last row.
    pub fn manager_range(&self, group_index: u32, length: usize) -> Result<CellRange, DomainError> {
        let end_column = span_columns(MANAGER_FIRST_COLUMN, length)?;
        let (start_row, end_row) = self.manager_block(group_index)?;
        let range = CellRange {
            start_column: MANAGER_FIRST_COLUMN,
            start_row,
            end_column,
            end_row,
        };
        debug!(group_index, length, range = %range, "computed manager range");
        Ok(range)
    }

    /// Range written for a group on a team sheet: question row and response
    /// row.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GroupTooLarge` if `length` exceeds 25 and
    /// `DomainError::RowOverflow` if the block lies past the last row.
    pub fn team_range(&self, group_index: u32, length: usize) -> Result<CellRange, DomainError> {
        let end_column = span_columns(TEAM_FIRST_COLUMN, length)?;
        let (start_row, separator_row) =
            block_rows(group_index, TEAM_BLOCK_HEIGHT).ok_or(DomainError::RowOverflow {
                group_index,
                team_count: self.team_count,
            })?;
        let range = CellRange {
            start_column: TEAM_FIRST_COLUMN,
            start_row,
            end_column,
            end_row: separator_row - 1,
        };
        debug!(group_index, length, range = %range, "computed team range");
        Ok(range)
    }

    /// Range of manager sheet cells that pull each team's answers in, from
    /// column B and the first team row down to the separator row.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GroupTooLarge` if `length` exceeds 24 and
    /// `DomainError::RowOverflow` if the block lies past the last row.
    pub fn link_range(&self, group_index: u32, length: usize) -> Result<CellRange, DomainError> {
        let end_column = span_columns(LINK_FIRST_COLUMN, length)?;
        let (header_row, end_row) = self.manager_block(group_index)?;
        let range = CellRange {
            start_column: LINK_FIRST_COLUMN,
            start_row: header_row + 1,
            end_column,
            end_row,
        };
        debug!(group_index, length, range = %range, "computed link range");
        Ok(range)
    }

    /// Checks that `round` names a question of this game.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RoundOutOfRange` if `round` is not below the
    /// question count and `DomainError::WarmUpUnavailable` for round 0 in a
    /// game without warm-up.
    pub fn check_round(&self, round: u32) -> Result<(), DomainError> {
        if round >= self.question_count {
            return Err(DomainError::RoundOutOfRange {
                round,
                question_count: self.question_count,
            });
        }
        if round == 0 && !self.has_warm_up {
            return Err(DomainError::WarmUpUnavailable);
        }
        Ok(())
    }

    /// Manager sheet cells holding every team's answer to `round`.
    ///
    /// Round 0 is the warm-up question. Numbered rounds are located in the
    /// block of the group containing them, at the column of their position
    /// within the group.
    ///
    /// # Errors
    ///
    /// Returns any error from [`LayoutEngine::check_round`],
    /// `DomainError::Validation` if the game has no teams and
    /// `DomainError::RowOverflow` if the block lies past the last row.
    pub fn round_range(&self, round: u32) -> Result<CellRange, DomainError> {
        self.check_round(round)?;
        if self.team_count == 0 {
            return Err(DomainError::Validation(
                "the game has no teams to read answers from".to_owned(),
            ));
        }

        let (group_index, column) = if round == 0 {
            (0, 1)
        } else {
            let column = match round % GROUP_SIZE {
                0 => GROUP_SIZE,
                position => position,
            };
            #[allow(clippy::cast_possible_truncation)]
            let column = column as u8;
            ((round - 1) / GROUP_SIZE + u32::from(self.has_warm_up), column)
        };
        let (header_row, separator_row) = self.manager_block(group_index)?;
        let range = CellRange {
            start_column: column,
            start_row: header_row + 1,
            end_column: column,
            end_row: separator_row - 1,
        };
        debug!(round, range = %range, "computed round range");
        Ok(range)
    }
}

/// First and last row of block `index` when blocks of `height` rows are
/// stacked from row 1, or `None` if the block ends past `u32::MAX`.
fn block_rows(index: u32, height: u32) -> Option<(u32, u32)> {
    let last = index.checked_add(1)?.checked_mul(height)?;
    Some((last - height + 1, last))
}

/// Last column of a span starting `length` columns after `start`, or
/// `GroupTooLarge` if it would run past `Z`.
fn span_columns(start: u8, length: usize) -> Result<u8, DomainError> {
    let max = usize::from(CellRange::LAST_COLUMN - start);
    if length > max {
        return Err(DomainError::GroupTooLarge { length, max });
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok(start + length as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizmaster_core::error::ErrorKind;

    fn engine(question_count: u32, has_warm_up: bool, team_count: u32) -> LayoutEngine {
        LayoutEngine::new(question_count, has_warm_up, team_count)
    }

    // --- manager / team / link ranges ---

    #[test]
    fn test_manager_range_for_first_group() {
        let range = engine(12, false, 3).manager_range(0, 12).unwrap();
        assert_eq!(range.to_a1(), "A1:M5");
    }

    #[test]
    fn test_manager_range_stacks_blocks_vertically() {
        let range = engine(24, false, 3).manager_range(1, 12).unwrap();
        assert_eq!(range.to_a1(), "A6:M10");
    }

    #[test]
    fn test_team_range_uses_three_row_blocks() {
        let layout = engine(24, false, 3);
        assert_eq!(layout.team_range(0, 12).unwrap().to_a1(), "A1:M2");
        assert_eq!(layout.team_range(2, 5).unwrap().to_a1(), "A7:F8");
    }

    #[test]
    fn test_link_range_starts_at_column_b_below_header() {
        let layout = engine(24, false, 3);
        assert_eq!(layout.link_range(0, 12).unwrap().to_a1(), "B2:N5");
        assert_eq!(layout.link_range(1, 12).unwrap().to_a1(), "B7:N10");
    }

    #[test]
    fn test_group_length_caps() {
        let layout = engine(12, false, 2);
        assert!(layout.manager_range(0, 25).is_ok());
        assert!(layout.team_range(0, 25).is_ok());
        assert!(layout.link_range(0, 24).is_ok());

        match layout.manager_range(0, 26).unwrap_err() {
            DomainError::GroupTooLarge { length, max } => {
                assert_eq!(length, 26);
                assert_eq!(max, 25);
            }
            other => panic!("expected GroupTooLarge, got {other:?}"),
        }
        assert_eq!(
            layout.team_range(0, 26).unwrap_err().kind(),
            ErrorKind::LayoutConstraint
        );
        match layout.link_range(0, 25).unwrap_err() {
            DomainError::GroupTooLarge { max, .. } => assert_eq!(max, 24),
            other => panic!("expected GroupTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_widest_ranges_end_at_column_z() {
        let layout = engine(12, false, 2);
        assert_eq!(layout.manager_range(0, 25).unwrap().end_column, 25);
        assert_eq!(layout.link_range(0, 24).unwrap().end_column, 25);
    }

    #[test]
    fn test_ranges_of_successive_groups_are_disjoint() {
        for team_count in 0..6 {
            let layout = engine(60, true, team_count);
            for group_index in 0..5 {
                let this = layout.manager_range(group_index, 12).unwrap();
                let next = layout.manager_range(group_index + 1, 12).unwrap();
                assert!(this.end_row < next.start_row);

                let this = layout.team_range(group_index, 12).unwrap();
                let next = layout.team_range(group_index + 1, 12).unwrap();
                assert!(this.end_row < next.start_row);

                let this = layout.link_range(group_index, 12).unwrap();
                let next = layout.link_range(group_index + 1, 12).unwrap();
                assert!(this.end_row < next.start_row);
            }
        }
    }

    #[test]
    fn test_block_past_last_row_is_a_layout_error() {
        let layout = engine(12, false, 30);

        let err = layout.manager_range(200_000_000, 12).unwrap_err();

        assert!(matches!(
            err,
            DomainError::RowOverflow {
                group_index: 200_000_000,
                team_count: 30
            }
        ));
        assert_eq!(err.kind(), ErrorKind::LayoutConstraint);
        assert!(layout.link_range(200_000_000, 12).is_err());
        assert!(layout.team_range(u32::MAX, 12).is_err());
    }

    #[test]
    fn test_roster_of_u32_max_teams_does_not_overflow() {
        let err = engine(12, false, u32::MAX).manager_range(0, 12).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LayoutConstraint);
    }

    #[test]
    fn test_last_block_that_fits_ends_on_the_last_row() {
        // 2 teams make 4-row blocks
        let range = engine(12, false, 2).manager_range(u32::MAX / 4 - 1, 12).unwrap();
        assert_eq!(range.end_row, u32::MAX / 4 * 4);
        assert_eq!(range.end_row - range.start_row, 3);
    }

    // --- round lookup ---

    #[test]
    fn test_round_zero_requires_warm_up() {
        let err = engine(10, false, 2).round_range(0).unwrap_err();
        assert!(matches!(err, DomainError::WarmUpUnavailable));
        assert_eq!(err.kind(), ErrorKind::LayoutConstraint);
    }

    #[test]
    fn test_round_zero_maps_to_column_b_team_rows() {
        let range = engine(10, true, 3).round_range(0).unwrap();
        assert_eq!(range.to_a1(), "B2:B4");
        let bounds = range.grid_bounds();
        assert_eq!(bounds.start_column_index, 1);
        assert_eq!(bounds.start_row_index, 1);
        assert_eq!(bounds.end_row_index, 4);
    }

    #[test]
    fn test_round_one_with_warm_up_reads_first_numbered_group() {
        // warm-up block occupies rows 1..=4, first numbered group starts at 5
        let range = engine(13, true, 2).round_range(1).unwrap();
        assert_eq!(range.start_column, 1);
        assert_eq!(range.to_a1(), "B6:B7");
    }

    #[test]
    fn test_round_thirteen_wraps_to_second_numbered_group() {
        let range = engine(14, true, 2).round_range(13).unwrap();
        assert_eq!(range.start_column, 1);
        assert_eq!(range.to_a1(), "B10:B11");
    }

    #[test]
    fn test_round_twelve_maps_to_last_column_of_first_group() {
        let range = engine(20, false, 2).round_range(12).unwrap();
        assert_eq!(range.start_column, 12);
        assert_eq!(range.to_a1(), "M2:M3");
    }

    #[test]
    fn test_round_lookup_matches_manager_grid_rows() {
        let layout = engine(30, true, 4);
        for round in 1..30 {
            let range = layout.round_range(round).unwrap();
            let group_index = (round - 1) / GROUP_SIZE + 1;
            let block = layout.manager_range(group_index, 12).unwrap();
            assert_eq!(range.start_row, block.start_row + 1);
            assert_eq!(range.end_row + 1, block.end_row);
        }
    }

    #[test]
    fn test_round_out_of_range_is_rejected() {
        match engine(13, true, 2).round_range(13).unwrap_err() {
            DomainError::RoundOutOfRange {
                round,
                question_count,
            } => {
                assert_eq!(round, 13);
                assert_eq!(question_count, 13);
            }
            other => panic!("expected RoundOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_round_far_past_the_last_row_is_a_layout_error() {
        let err = engine(u32::MAX, true, 30).round_range(u32::MAX - 1).unwrap_err();
        assert!(matches!(err, DomainError::RowOverflow { .. }));
    }

    #[test]
    fn test_check_round_accepts_only_game_questions() {
        let layout = engine(13, false, 0);
        layout.check_round(12).unwrap();
        assert!(matches!(
            layout.check_round(999).unwrap_err(),
            DomainError::RoundOutOfRange { round: 999, .. }
        ));
        assert!(matches!(
            layout.check_round(0).unwrap_err(),
            DomainError::WarmUpUnavailable
        ));
    }

    #[test]
    fn test_round_lookup_without_teams_is_rejected() {
        let err = engine(5, false, 0).round_range(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
