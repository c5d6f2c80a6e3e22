//! Round results persistence and the final tally.
//!
//! Each round is stored whole in the `game-results` bucket under its decimal
//! round number.

use std::collections::BTreeMap;

use quizmaster_core::config::GameConfig;
use quizmaster_core::error::{DomainError, ErrorKind};
use quizmaster_core::store::{Bucket, Store};
use tracing::{debug, info};

use crate::domain::round::{ResponseStatus, RoundResults};

fn round_key(round: u32) -> Vec<u8> {
    round.to_string().into_bytes()
}

/// Saves a round record, replacing any previous record for that round.
///
/// # Errors
///
/// Returns `DomainError::Serialization` if the record cannot be encoded, or
/// the store's error if the transaction fails.
pub fn save_round(store: &impl Store, results: &RoundResults) -> Result<(), DomainError> {
    let value = serde_json::to_vec(results)?;
    store.update(|tx| tx.put(Bucket::GameResults, &round_key(results.round), &value))?;
    info!(
        round = results.round,
        teams = results.results.len(),
        "saved round results"
    );
    Ok(())
}

/// Loads a round record.
///
/// A store without a results bucket yields an empty record for `round`.
///
/// # Errors
///
/// Returns `DomainError::RoundNotFound` if the round was never saved,
/// `DomainError::Serialization` if the stored record fails to decode, or the
/// store's error if the transaction fails.
pub fn get_round(store: &impl Store, round: u32) -> Result<RoundResults, DomainError> {
    store.read(|tx| match tx.get(Bucket::GameResults, &round_key(round)) {
        Ok(Some(bytes)) => Ok(serde_json::from_slice(&bytes)?),
        Ok(None) => Err(DomainError::RoundNotFound(round)),
        Err(err) if err.kind() == ErrorKind::MissingBucket => Ok(RoundResults {
            round,
            ..RoundResults::default()
        }),
        Err(err) => Err(err),
    })
}

/// Counts accepted answers per team over every numbered round.
///
/// Rounds run from the first numbered round up to but excluding the
/// question count; the warm-up round never scores. Rounds that were never
/// saved are skipped. Every configured team appears in the result.
///
/// # Errors
///
/// Returns `DomainError::UnknownTeam` if a stored round names a team that is
/// not in `config`, `DomainError::Serialization` if a round fails to decode,
/// or the store's error if a transaction fails.
pub fn total(store: &impl Store, config: &GameConfig) -> Result<BTreeMap<String, u32>, DomainError> {
    let mut totals: BTreeMap<String, u32> =
        config.teams.iter().map(|team| (team.clone(), 0)).collect();

    let first = u32::from(config.has_warm_up_question);
    for round in first..config.number_of_questions {
        let results = match get_round(store, round) {
            Ok(results) => results,
            Err(err) if err.kind() == ErrorKind::RoundNotFound => {
                debug!(round, "round not saved, skipping");
                continue;
            }
            Err(err) => return Err(err),
        };
        for (team, response) in &results.results {
            let score = totals
                .get_mut(team)
                .ok_or_else(|| DomainError::UnknownTeam(team.clone()))?;
            if response.status == ResponseStatus::Ok {
                *score += 1;
            }
        }
    }

    Ok(totals)
}
