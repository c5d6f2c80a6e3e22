//! End-to-end game flow over the SQLite store.

use std::collections::BTreeMap;

use quizmaster_cli::app::STORE_FILE;
use quizmaster_cli::grading_prompt::ConsolePrompt;
use quizmaster_cli::workflow::GameWorkflow;
use quizmaster_core::config::GameConfig;
use quizmaster_core::error::ErrorKind;
use quizmaster_core::sheets::CellValue;
use quizmaster_results::domain::round::ResponseStatus;
use quizmaster_store::sqlite_store::SqliteStore;
use quizmaster_test_support::RecordingSheetService;

fn config() -> GameConfig {
    GameConfig::from_json(
        br#"{
            "GameName": "autumn-cup",
            "NumberOfQuestions": 14,
            "HasWarmUpQuestion": false,
            "Teams": ["owls", "foxes"]
        }"#,
    )
    .unwrap()
}

fn answers(values: &[&str]) -> Vec<Vec<CellValue>> {
    values
        .iter()
        .map(|&value| vec![CellValue::Text(value.to_owned())])
        .collect()
}

#[tokio::test]
async fn test_game_state_survives_a_restart() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(STORE_FILE);
    let first_session = GameWorkflow::new(
        config(),
        SqliteStore::new(&path),
        RecordingSheetService::with_read_result(answers(&["Paris", "Rome"])),
    );
    let registry = first_session.create_game().await.unwrap();
    first_session.fetch_round(13).await.unwrap();
    let mut output = Vec::new();
    first_session
        .check_round(13, &mut ConsolePrompt::new(&b"+\n?\n"[..], &mut output))
        .unwrap();

    // Act
    let second_session = GameWorkflow::new(
        config(),
        SqliteStore::new(&path),
        RecordingSheetService::new(),
    );

    // Assert
    assert_eq!(second_session.list_urls().unwrap(), registry);
    let round = second_session.get_round(13).unwrap();
    assert_eq!(round.results["foxes"].status, ResponseStatus::Ok);
    assert_eq!(round.results["owls"].status, ResponseStatus::InQuestion);
    assert_eq!(
        second_session.total().unwrap(),
        BTreeMap::from([("foxes".to_owned(), 1), ("owls".to_owned(), 0)])
    );
}

#[tokio::test]
async fn test_unfetched_round_is_not_found_after_provisioning() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let workflow = GameWorkflow::new(
        config(),
        SqliteStore::new(dir.path().join(STORE_FILE)),
        RecordingSheetService::new(),
    );
    workflow.create_game().await.unwrap();

    // Act
    let err = workflow.get_round(4).unwrap_err();

    // Assert
    assert_eq!(err.kind(), ErrorKind::RoundNotFound);
}
