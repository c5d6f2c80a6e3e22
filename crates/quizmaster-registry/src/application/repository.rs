//! Persistence of the spreadsheet registry.
//!
//! The manager reference lives in the `game-configuration` bucket under a
//! fixed key; each team reference lives in the `teams-spreadsheets` bucket
//! under the team name. Values are JSON.

use std::collections::BTreeMap;

use quizmaster_core::error::{DomainError, ErrorKind};
use quizmaster_core::sheets::SpreadsheetRef;
use quizmaster_core::store::{Bucket, Store};
use tracing::info;

use crate::domain::registry::SpreadsheetRegistry;

/// Key of the manager spreadsheet in the `game-configuration` bucket.
pub const MANAGER_SPREADSHEET_KEY: &[u8] = b"manager-spreadsheet";

/// Saves the registry.
///
/// The manager entry is always overwritten, with `null` when the registry
/// has no manager. Team entries are written one by one, so teams absent from
/// `registry` keep whatever was stored before.
///
/// # Errors
///
/// Returns `DomainError::Serialization` if a reference cannot be encoded,
/// or the store's error if the transaction fails.
pub fn save_registry(
    store: &impl Store,
    registry: &SpreadsheetRegistry,
) -> Result<(), DomainError> {
    store.update(|tx| {
        let manager = serde_json::to_vec(&registry.manager)?;
        tx.put(Bucket::GameConfiguration, MANAGER_SPREADSHEET_KEY, &manager)?;
        for (team, sheet) in &registry.teams {
            let value = serde_json::to_vec(sheet)?;
            tx.put(Bucket::TeamsSpreadsheets, team.as_bytes(), &value)?;
        }
        Ok(())
    })?;
    info!(teams = registry.teams.len(), "saved spreadsheet registry");
    Ok(())
}

/// Loads the registry.
///
/// A store whose teams bucket does not exist yields an empty team map.
///
/// # Errors
///
/// Returns `DomainError::Serialization` if the manager entry is absent or
/// any entry fails to decode, `DomainError::MissingBucket` if the store has
/// never been written, or the store's error if the transaction fails.
pub fn get_registry(store: &impl Store) -> Result<SpreadsheetRegistry, DomainError> {
    store.read(|tx| {
        let manager_bytes = tx.get(Bucket::GameConfiguration, MANAGER_SPREADSHEET_KEY)?;
        let manager: Option<SpreadsheetRef> =
            serde_json::from_slice(manager_bytes.as_deref().unwrap_or_default())?;

        let teams = match tx.entries(Bucket::TeamsSpreadsheets) {
            Ok(entries) => entries
                .into_iter()
                .map(|(team, value)| {
                    let sheet: SpreadsheetRef = serde_json::from_slice(&value)?;
                    Ok((String::from_utf8_lossy(&team).into_owned(), sheet))
                })
                .collect::<Result<BTreeMap<_, _>, DomainError>>()?,
            Err(err) if err.kind() == ErrorKind::MissingBucket => BTreeMap::new(),
            Err(err) => return Err(err),
        };

        Ok(SpreadsheetRegistry { manager, teams })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizmaster_test_support::{FailingStore, InMemoryStore};

    fn sheet(id: &str) -> SpreadsheetRef {
        SpreadsheetRef {
            id: id.to_owned(),
            url: format!("https://sheets.test/{id}"),
        }
    }

    fn registry(manager: Option<&str>, teams: &[(&str, &str)]) -> SpreadsheetRegistry {
        SpreadsheetRegistry {
            manager: manager.map(sheet),
            teams: teams
                .iter()
                .map(|&(team, id)| (team.to_owned(), sheet(id)))
                .collect(),
        }
    }

    #[test]
    fn test_save_then_get_round_trip() {
        let store = InMemoryStore::new();
        let saved = registry(Some("m"), &[("owls", "o"), ("foxes", "f")]);

        save_registry(&store, &saved).unwrap();

        assert_eq!(get_registry(&store).unwrap(), saved);
    }

    #[test]
    fn test_round_trip_with_empty_team_map() {
        let store = InMemoryStore::new();
        let saved = registry(Some("m"), &[]);

        save_registry(&store, &saved).unwrap();

        assert_eq!(get_registry(&store).unwrap(), saved);
    }

    #[test]
    fn test_resave_merges_teams_and_overwrites_manager() {
        let store = InMemoryStore::new();
        save_registry(&store, &registry(Some("m"), &[("owls", "o1"), ("foxes", "f1")])).unwrap();

        save_registry(&store, &registry(None, &[("owls", "o2")])).unwrap();

        let loaded = get_registry(&store).unwrap();
        assert_eq!(loaded.manager, None);
        assert_eq!(loaded.teams["owls"], sheet("o2"));
        assert_eq!(loaded.teams["foxes"], sheet("f1"));
    }

    #[test]
    fn test_persisted_values_use_upper_case_json_keys() {
        let store = InMemoryStore::new();
        save_registry(&store, &registry(None, &[("owls", "o")])).unwrap();

        let (manager, team) = store
            .read(|tx| {
                Ok((
                    tx.get(Bucket::GameConfiguration, MANAGER_SPREADSHEET_KEY)?,
                    tx.get(Bucket::TeamsSpreadsheets, b"owls")?,
                ))
            })
            .unwrap();
        assert_eq!(manager.as_deref(), Some(&b"null"[..]));
        assert_eq!(
            team.as_deref(),
            Some(&br#"{"ID":"o","URL":"https://sheets.test/o"}"#[..])
        );
    }

    #[test]
    fn test_missing_teams_bucket_reads_as_empty_map() {
        let store = InMemoryStore::with_buckets(&[Bucket::GameConfiguration]);
        store.insert_raw(
            Bucket::GameConfiguration,
            MANAGER_SPREADSHEET_KEY,
            br#"{"ID":"m","URL":"https://sheets.test/m"}"#,
        );

        let loaded = get_registry(&store).unwrap();

        assert_eq!(loaded, registry(Some("m"), &[]));
    }

    #[test]
    fn test_absent_manager_key_is_a_decode_failure() {
        let store = InMemoryStore::with_buckets(&Bucket::ALL);

        let err = get_registry(&store).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[test]
    fn test_never_written_store_reports_missing_bucket() {
        let err = get_registry(&InMemoryStore::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingBucket);
    }

    #[test]
    fn test_corrupt_team_entry_is_fatal() {
        let store = InMemoryStore::new();
        save_registry(&store, &registry(Some("m"), &[])).unwrap();
        store.insert_raw(Bucket::TeamsSpreadsheets, b"owls", b"{not json");

        let err = get_registry(&store).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[test]
    fn test_store_failures_propagate() {
        let err = save_registry(&FailingStore, &registry(Some("m"), &[])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Infrastructure);

        let err = get_registry(&FailingStore).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Infrastructure);
    }
}
