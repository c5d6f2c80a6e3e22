//! Game configuration.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::DomainError;

/// Largest question count a game may declare.
pub const MAX_QUESTIONS: u32 = 1_000;
/// Largest roster a game may declare.
pub const MAX_TEAMS: usize = 500;

/// Parameters of one game, loaded once per run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameConfig {
    /// Game title, used to name the spreadsheets.
    pub game_name: String,
    /// Number of numbered questions.
    pub number_of_questions: u32,
    /// Whether a warm-up question precedes the numbered questions.
    pub has_warm_up_question: bool,
    /// Team names in grid column order.
    pub teams: Vec<String>,
}

impl GameConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Serialization` if the document is malformed and
    /// `DomainError::Validation` if it violates a configuration rule.
    pub fn from_json(bytes: &[u8]) -> Result<Self, DomainError> {
        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the file cannot be read, plus any
    /// error from [`GameConfig::from_json`].
    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let bytes = std::fs::read(path).map_err(|e| {
            DomainError::Validation(format!(
                "configuration file {} could not be opened, please make sure that the file exists: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&bytes)
    }

    /// Checks the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for an empty game name, a question
    /// count above [`MAX_QUESTIONS`], a roster above [`MAX_TEAMS`], an empty
    /// team name or a duplicated team name.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.game_name.is_empty() {
            return Err(DomainError::Validation(
                "game name cannot be empty".to_owned(),
            ));
        }
        if self.number_of_questions > MAX_QUESTIONS {
            return Err(DomainError::Validation(format!(
                "number of questions {} exceeds the maximum of {MAX_QUESTIONS}",
                self.number_of_questions
            )));
        }
        if self.teams.len() > MAX_TEAMS {
            return Err(DomainError::Validation(format!(
                "number of teams {} exceeds the maximum of {MAX_TEAMS}",
                self.teams.len()
            )));
        }
        let mut seen = HashSet::with_capacity(self.teams.len());
        for team in &self.teams {
            if team.is_empty() {
                return Err(DomainError::Validation(
                    "team name cannot be empty".to_owned(),
                ));
            }
            if !seen.insert(team.as_str()) {
                return Err(DomainError::Validation(format!(
                    "team {team} is listed more than once"
                )));
            }
        }
        Ok(())
    }

    /// Number of teams in the roster.
    #[must_use]
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ErrorKind;

    const VALID: &str = r#"{
        "GameName": "friday",
        "NumberOfQuestions": 36,
        "HasWarmUpQuestion": true,
        "Teams": ["owls", "foxes"]
    }"#;

    #[test]
    fn test_from_json_reads_pascal_case_keys() {
        let config = GameConfig::from_json(VALID.as_bytes()).unwrap();
        assert_eq!(config.game_name, "friday");
        assert_eq!(config.number_of_questions, 36);
        assert!(config.has_warm_up_question);
        assert_eq!(config.teams, vec!["owls".to_owned(), "foxes".to_owned()]);
    }

    #[test]
    fn test_empty_game_name_is_rejected() {
        let json = r#"{"GameName": "", "NumberOfQuestions": 1, "HasWarmUpQuestion": false, "Teams": []}"#;
        let err = GameConfig::from_json(json.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_duplicate_team_is_rejected() {
        let json = r#"{"GameName": "g", "NumberOfQuestions": 1, "HasWarmUpQuestion": false, "Teams": ["a", "a"]}"#;
        let err = GameConfig::from_json(json.as_bytes()).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert_eq!(msg, "team a is listed more than once"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_question_count_above_maximum_is_rejected() {
        let json = format!(
            r#"{{"GameName": "g", "NumberOfQuestions": {}, "HasWarmUpQuestion": true, "Teams": ["a"]}}"#,
            u32::MAX
        );
        let err = GameConfig::from_json(json.as_bytes()).unwrap_err();
        match err {
            DomainError::Validation(msg) => {
                assert_eq!(msg, "number of questions 4294967295 exceeds the maximum of 1000");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_largest_game_is_accepted() {
        let config = GameConfig {
            game_name: "marathon".to_owned(),
            number_of_questions: MAX_QUESTIONS,
            has_warm_up_question: true,
            teams: (0..MAX_TEAMS).map(|i| format!("team-{i}")).collect(),
        };
        config.validate().unwrap();
    }

    #[test]
    fn test_roster_above_maximum_is_rejected() {
        let config = GameConfig {
            game_name: "g".to_owned(),
            number_of_questions: 12,
            has_warm_up_question: false,
            teams: (0..=MAX_TEAMS).map(|i| format!("team-{i}")).collect(),
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("number of teams 501"));
    }

    #[test]
    fn test_negative_question_count_fails_to_decode() {
        let json = r#"{"GameName": "g", "NumberOfQuestions": -1, "HasWarmUpQuestion": false, "Teams": []}"#;
        let err = GameConfig::from_json(json.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[test]
    fn test_load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.team_count(), 2);
    }

    #[test]
    fn test_load_missing_file_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
