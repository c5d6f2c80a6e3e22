//! Batching of questions into groups.

use std::ops::RangeInclusive;

/// Number of numbered questions rendered together in one block.
pub const GROUP_SIZE: u32 = 12;

/// A contiguous batch of questions rendered in one layout block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionGroup {
    /// Position of the group, counted from 0 in emission order.
    pub index: u32,
    /// Number of questions in the group.
    pub length: usize,
    /// Label of the question preceding the group; the group's questions are
    /// labelled `current_question + 1 ..= current_question + length`.
    pub current_question: i64,
}

impl QuestionGroup {
    /// Question labels in column order.
    #[must_use]
    pub fn labels(&self) -> RangeInclusive<i64> {
        let first = self.current_question + 1;
        #[allow(clippy::cast_possible_wrap)]
        let last = self.current_question + self.length as i64;
        first..=last
    }
}

/// Splits a game into question groups.
///
/// A warm-up question forms a group of length 1 labelled 0. The numbered
/// questions, labelled from 1, follow in full groups of [`GROUP_SIZE`] and a
/// final partial group holding the remainder.
#[must_use]
pub fn batch_questions(question_count: u32, has_warm_up: bool) -> Vec<QuestionGroup> {
    fn push(groups: &mut Vec<QuestionGroup>, length: u32, current_question: i64) {
        #[allow(clippy::cast_possible_truncation)]
        let index = groups.len() as u32;
        groups.push(QuestionGroup {
            index,
            length: length as usize,
            current_question,
        });
    }

    let mut groups = Vec::new();
    let mut current_question: i64 = -1;

    if has_warm_up {
        push(&mut groups, 1, current_question);
    }
    current_question += 1;

    for _ in 0..question_count / GROUP_SIZE {
        push(&mut groups, GROUP_SIZE, current_question);
        current_question += i64::from(GROUP_SIZE);
    }
    let remainder = question_count % GROUP_SIZE;
    if remainder != 0 {
        push(&mut groups, remainder, current_question);
    }
    groups
}
