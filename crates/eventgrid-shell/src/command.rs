//! Parsing of one line of user input into a shell command.
//!
//! Input is trimmed and lower-cased first. `exit` ends the session, a
//! leading `?` asks for the contents of a cell, and anything else must be
//! an `x, y` pair to search around.

use eventgrid_types::Coordinate;

/// Marks a cell query rather than a search.
const QUERY_PREFIX: char = '?';

/// Word that ends the session.
const EXIT_WORD: &str = "exit";

/// A parsed line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the shell.
    Exit,
    /// List the nearest events with tickets around a coordinate.
    Search(Coordinate),
    /// Show everything hosted at one cell.
    Inspect(Coordinate),
}

/// Why a line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The line was not a comma-separated pair of integers.
    #[error("Coordinates must be entered as follows: x, y")]
    InvalidCoordinates,
}

/// Parse one line of input.
///
/// # Errors
///
/// Returns [`CommandError::InvalidCoordinates`] when the line is neither
/// `exit` nor a coordinate pair.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let normalized = line.trim().to_lowercase();
    if normalized == EXIT_WORD {
        return Ok(Command::Exit);
    }

    if normalized.starts_with(QUERY_PREFIX) {
        let stripped = normalized.replace(QUERY_PREFIX, "");
        return parse_coordinates(&stripped).map(Command::Inspect);
    }

    parse_coordinates(&normalized).map(Command::Search)
}

/// Parse exactly two comma-separated integers.
fn parse_coordinates(text: &str) -> Result<Coordinate, CommandError> {
    let mut parts = text.split(',').map(str::trim);
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CommandError::InvalidCoordinates);
    };
    let x = x.parse().map_err(|_e| CommandError::InvalidCoordinates)?;
    let y = y.parse().map_err(|_e| CommandError::InvalidCoordinates)?;
    Ok(Coordinate::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_is_case_and_space_insensitive() {
        assert_eq!(parse_command("exit"), Ok(Command::Exit));
        assert_eq!(parse_command("  EXIT \n"), Ok(Command::Exit));
    }

    #[test]
    fn plain_pair_is_search() {
        assert_eq!(
            parse_command("3, -4\n"),
            Ok(Command::Search(Coordinate::new(3, -4)))
        );
        assert_eq!(
            parse_command("  +7,8"),
            Ok(Command::Search(Coordinate::new(7, 8)))
        );
    }

    #[test]
    fn question_mark_prefix_is_inspect() {
        assert_eq!(
            parse_command("? 1, 2"),
            Ok(Command::Inspect(Coordinate::new(1, 2)))
        );
        assert_eq!(
            parse_command("?-5,?0"),
            Ok(Command::Inspect(Coordinate::new(-5, 0)))
        );
    }

    #[test]
    fn malformed_input_is_rejected() {
        for line in ["", "1", "1,2,3", "a, b", "1.5, 2", "exit now", "1 2", "?", "99999999999, 0"] {
            assert_eq!(
                parse_command(line),
                Err(CommandError::InvalidCoordinates),
                "{line:?} should be rejected"
            );
        }
    }

    #[test]
    fn error_message_explains_format() {
        assert_eq!(
            CommandError::InvalidCoordinates.to_string(),
            "Coordinates must be entered as follows: x, y"
        );
    }
}
