//! Console command parsing.

use quizmaster_core::error::DomainError;

/// One line typed at the console prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `listURLs`: print the registered spreadsheets.
    ListUrls,
    /// `fetch <round>`: pull a round's responses from the manager sheet.
    Fetch(u32),
    /// `get <round>`: print a stored round.
    Get(u32),
    /// `check <round>`: grade a stored round interactively.
    Check(u32),
    /// `total`: print the score of every team.
    Total,
    /// `delete`: delete every registered spreadsheet.
    Delete,
    /// `exit`: leave the console.
    Exit,
    /// A blank line.
    Empty,
    /// Any other command word.
    Unknown(String),
}

/// Parses a console line. The first word selects the command; round
/// commands take exactly one numeric argument.
///
/// # Errors
///
/// Returns `DomainError::Validation` if a round command has the wrong
/// number of arguments or a non-numeric round.
pub fn parse_command(line: &str) -> Result<Command, DomainError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(Command::Empty);
    };
    let args: Vec<&str> = words.collect();

    let command = match name {
        "listURLs" => Command::ListUrls,
        "fetch" => Command::Fetch(round_argument(&args)?),
        "get" => Command::Get(round_argument(&args)?),
        "check" => Command::Check(round_argument(&args)?),
        "total" => Command::Total,
        "delete" => Command::Delete,
        "exit" => Command::Exit,
        other => Command::Unknown(other.to_owned()),
    };
    Ok(command)
}

fn round_argument(args: &[&str]) -> Result<u32, DomainError> {
    let [round] = args else {
        return Err(DomainError::Validation(format!(
            "expected 1 argument, got {}",
            args.len()
        )));
    };
    round.parse().map_err(|e| {
        DomainError::Validation(format!(
            "failed to parse argument {round} as a round number: {e}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizmaster_core::error::ErrorKind;

    #[test]
    fn test_round_commands() {
        assert_eq!(parse_command("fetch 3").unwrap(), Command::Fetch(3));
        assert_eq!(parse_command("get 0").unwrap(), Command::Get(0));
        assert_eq!(parse_command("check 12").unwrap(), Command::Check(12));
    }

    #[test]
    fn test_plain_commands() {
        assert_eq!(parse_command("listURLs").unwrap(), Command::ListUrls);
        assert_eq!(parse_command("total").unwrap(), Command::Total);
        assert_eq!(parse_command("delete").unwrap(), Command::Delete);
        assert_eq!(parse_command("exit").unwrap(), Command::Exit);
    }

    #[test]
    fn test_blank_line_is_empty() {
        assert_eq!(parse_command("").unwrap(), Command::Empty);
        assert_eq!(parse_command("   ").unwrap(), Command::Empty);
    }

    #[test]
    fn test_unknown_command_keeps_its_name() {
        assert_eq!(
            parse_command("score 3").unwrap(),
            Command::Unknown("score".to_owned())
        );
    }

    #[test]
    fn test_missing_round_is_rejected() {
        let err = parse_command("fetch").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "validation error: expected 1 argument, got 0");
    }

    #[test]
    fn test_extra_arguments_are_rejected() {
        let err = parse_command("get 1 2").unwrap_err();
        assert_eq!(err.to_string(), "validation error: expected 1 argument, got 2");
    }

    #[test]
    fn test_malformed_round_is_rejected() {
        for line in ["check x", "fetch -1", "get 1.5"] {
            let err = parse_command(line).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{line}");
            assert!(err.to_string().contains("as a round number"), "{line}");
        }
    }
}
