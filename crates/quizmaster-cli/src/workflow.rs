//! Game workflow: the operations behind each console command.
//!
//! Every operation computes its cell ranges from the layout engine, talks to
//! the remote spreadsheet service and persists through the repositories.

use std::collections::BTreeMap;

use quizmaster_core::config::GameConfig;
use quizmaster_core::error::DomainError;
use quizmaster_core::sheets::{CellValue, RangeWrite, SpreadsheetRef, SpreadsheetService};
use quizmaster_core::store::Store;
use quizmaster_layout::application::builders::{
    link_groups, manager_answer_groups, team_answer_groups, team_border_ranges,
};
use quizmaster_layout::domain::ranges::LayoutEngine;
use quizmaster_registry::application::repository::{get_registry, save_registry};
use quizmaster_registry::domain::registry::SpreadsheetRegistry;
use quizmaster_results::application::ledger::{self, get_round, save_round};
use quizmaster_results::domain::grading::grade_round;
use quizmaster_results::domain::round::RoundResults;
use tracing::{info, instrument};

use crate::grading_prompt::GradingPrompt;

/// Orchestrates one game over a store and a spreadsheet service.
pub struct GameWorkflow<S, C> {
    config: GameConfig,
    layout: LayoutEngine,
    store: S,
    sheets: C,
}

impl<S: Store, C: SpreadsheetService> GameWorkflow<S, C> {
    /// Creates a workflow for `config`.
    pub fn new(config: GameConfig, store: S, sheets: C) -> Self {
        let layout = LayoutEngine::from_config(&config);
        Self {
            config,
            layout,
            store,
            sheets,
        }
    }

    /// The game configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Provisions a new game: creates the manager and team spreadsheets,
    /// records them, fills in the answer grids and links every team's
    /// responses into the manager sheet.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GroupTooLarge` before any remote call if the
    /// layout does not fit, the service's error if a remote call fails, or
    /// the store's error if the registry cannot be saved.
    #[instrument(skip(self), fields(game = %self.config.game_name))]
    pub async fn create_game(&self) -> Result<SpreadsheetRegistry, DomainError> {
        let manager_writes = manager_answer_groups(&self.layout, &self.config.teams)?;
        let team_writes = team_answer_groups(&self.layout)?;
        let team_borders = team_border_ranges(&self.layout)?;

        let manager = self
            .sheets
            .create_sheet(&format!("{}-manager", self.config.game_name))
            .await?;
        info!(url = %manager.url, "created the manager spreadsheet");

        let mut teams = BTreeMap::new();
        for team in &self.config.teams {
            let sheet = self
                .sheets
                .create_sheet(&format!("{}: team {team}", self.config.game_name))
                .await?;
            info!(team = %team, url = %sheet.url, "created a team spreadsheet");
            teams.insert(team.clone(), sheet);
        }

        let registry = SpreadsheetRegistry {
            manager: Some(manager.clone()),
            teams,
        };
        save_registry(&self.store, &registry)?;

        self.write(&manager, &manager_writes).await?;
        for sheet in registry.teams.values() {
            self.write(sheet, &team_writes).await?;
            if !team_borders.is_empty() {
                self.sheets.draw_borders(sheet, &team_borders).await?;
            }
        }
        let links = link_groups(&self.layout, &self.config.teams, &registry.teams)?;
        self.write(&manager, &links).await?;

        info!(teams = registry.teams.len(), "game provisioned");
        Ok(registry)
    }

    async fn write(&self, sheet: &SpreadsheetRef, writes: &[RangeWrite]) -> Result<(), DomainError> {
        if writes.is_empty() {
            return Ok(());
        }
        self.sheets.write_ranges(sheet, writes).await
    }

    /// The recorded spreadsheets of the game.
    ///
    /// # Errors
    ///
    /// Returns any error from [`get_registry`].
    pub fn list_urls(&self) -> Result<SpreadsheetRegistry, DomainError> {
        get_registry(&self.store)
    }

    /// Reads a round's responses from the manager sheet and stores them with
    /// every team at not checked, replacing any earlier grading. Teams past
    /// the last returned cell get an empty response.
    ///
    /// # Errors
    ///
    /// Returns a layout error for a round outside the game,
    /// `DomainError::Validation` if no manager spreadsheet is recorded, the
    /// service's error if the read fails, or the store's error.
    #[instrument(skip(self))]
    pub async fn fetch_round(&self, round: u32) -> Result<RoundResults, DomainError> {
        let range = self.layout.round_range(round)?;
        let manager = get_registry(&self.store)?.manager.ok_or_else(|| {
            DomainError::Validation("the game has no manager spreadsheet".to_owned())
        })?;

        let rows = self.sheets.read_range(&manager, &range).await?;
        let responses = self.config.teams.iter().enumerate().map(|(i, team)| {
            let response = rows
                .get(i)
                .and_then(|row| row.first())
                .map(CellValue::as_text)
                .unwrap_or_default();
            (team.clone(), response)
        });
        let results = RoundResults::fetched(round, responses);

        save_round(&self.store, &results)?;
        Ok(results)
    }

    /// A stored round.
    ///
    /// # Errors
    ///
    /// Returns any error from [`get_round`].
    pub fn get_round(&self, round: u32) -> Result<RoundResults, DomainError> {
        get_round(&self.store, round)
    }

    /// Grades a stored round with decisions from `prompt` and stores the
    /// outcome. Teams are asked in name order.
    ///
    /// # Errors
    ///
    /// Returns a layout error for a round outside the game, any error from
    /// [`get_round`], the prompt's error, or the store's error when saving.
    #[instrument(skip(self, prompt))]
    pub fn check_round(
        &self,
        round: u32,
        prompt: &mut dyn GradingPrompt,
    ) -> Result<RoundResults, DomainError> {
        self.layout.check_round(round)?;
        let results = get_round(&self.store, round)?;
        let mut decisions = BTreeMap::new();
        for (team, response) in &results.results {
            decisions.insert(team.clone(), prompt.decide(team, response)?);
        }
        let graded = grade_round(results, &decisions);
        save_round(&self.store, &graded)?;
        Ok(graded)
    }

    /// Accepted answers per team.
    ///
    /// # Errors
    ///
    /// Returns any error from [`ledger::total`].
    pub fn total(&self) -> Result<BTreeMap<String, u32>, DomainError> {
        ledger::total(&self.store, &self.config)
    }

    /// Deletes every recorded spreadsheet. The local store is left as is.
    /// Returns the number of spreadsheets deleted.
    ///
    /// # Errors
    ///
    /// Returns any error from [`get_registry`] or the service's error for
    /// the first deletion that fails.
    #[instrument(skip(self), fields(game = %self.config.game_name))]
    pub async fn delete_game(&self) -> Result<usize, DomainError> {
        let registry = get_registry(&self.store)?;
        let mut deleted = 0;
        for sheet in registry.all_sheets() {
            self.sheets.delete_sheet(sheet).await?;
            info!(url = %sheet.url, "deleted spreadsheet");
            deleted += 1;
        }
        Ok(deleted)
    }
}
