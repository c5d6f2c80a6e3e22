//! The spreadsheet registry of a game.

use std::collections::BTreeMap;
use std::fmt;

use quizmaster_core::sheets::SpreadsheetRef;

/// Spreadsheets provisioned for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpreadsheetRegistry {
    /// The manager spreadsheet, if one has been recorded.
    pub manager: Option<SpreadsheetRef>,
    /// Team spreadsheets keyed by team name.
    pub teams: BTreeMap<String, SpreadsheetRef>,
}

impl SpreadsheetRegistry {
    /// Every registered spreadsheet, manager first.
    pub fn all_sheets(&self) -> impl Iterator<Item = &SpreadsheetRef> {
        self.manager.iter().chain(self.teams.values())
    }
}

impl fmt::Display for SpreadsheetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.manager {
            Some(manager) => writeln!(f, "manager: {}", manager.url)?,
            None => writeln!(f, "manager: <none>")?,
        }
        for (team, sheet) in &self.teams {
            writeln!(f, "team {team}: {}", sheet.url)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(id: &str) -> SpreadsheetRef {
        SpreadsheetRef {
            id: id.to_owned(),
            url: format!("https://sheets.test/{id}"),
        }
    }

    #[test]
    fn test_display_lists_manager_then_teams() {
        let mut registry = SpreadsheetRegistry {
            manager: Some(sheet("m")),
            ..SpreadsheetRegistry::default()
        };
        registry.teams.insert("owls".to_owned(), sheet("o"));
        registry.teams.insert("foxes".to_owned(), sheet("f"));

        assert_eq!(
            registry.to_string(),
            "manager: https://sheets.test/m\n\
             team foxes: https://sheets.test/f\n\
             team owls: https://sheets.test/o\n"
        );
    }

    #[test]
    fn test_all_sheets_starts_with_manager() {
        let mut registry = SpreadsheetRegistry {
            manager: Some(sheet("m")),
            ..SpreadsheetRegistry::default()
        };
        registry.teams.insert("owls".to_owned(), sheet("o"));

        let ids: Vec<&str> = registry.all_sheets().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["m", "o"]);
    }

    #[test]
    fn test_display_without_manager() {
        assert_eq!(SpreadsheetRegistry::default().to_string(), "manager: <none>\n");
    }
}
