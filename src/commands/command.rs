use std::str::SplitWhitespace;

use snafu::{OptionExt, ResultExt, Snafu, ensure};

use crate::filesystem::{InvalidPathError, NodePath};

/// One structural operation against the tree, parsed from a batch line.
///
/// The dispatch table of the command language lives in this enum: each
/// variant carries its already-validated path arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MakeDirectory { path: NodePath },
    MakeFile { path: NodePath },
    Remove { path: NodePath },
    Copy { source: NodePath, destination: NodePath },
    Move { source: NodePath, destination: NodePath },
}

impl Command {
    /// Parses one whitespace-separated batch line. The command name is
    /// checked first, then every argument must be a well-formed path, then
    /// the argument count must match the command.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut tokens = line.split_whitespace();
        let command = tokens.next().context(EmptyCommandSnafu)?;

        match command {
            "md" => Ok(Self::MakeDirectory {
                path: Self::single_path(command, tokens)?,
            }),
            "mf" => Ok(Self::MakeFile {
                path: Self::single_path(command, tokens)?,
            }),
            "rm" => Ok(Self::Remove {
                path: Self::single_path(command, tokens)?,
            }),
            "cp" => {
                let (source, destination) = Self::path_pair(command, tokens)?;
                Ok(Self::Copy {
                    source,
                    destination,
                })
            }
            "mv" => {
                let (source, destination) = Self::path_pair(command, tokens)?;
                Ok(Self::Move {
                    source,
                    destination,
                })
            }
            _ => UnknownCommandSnafu { command }.fail(),
        }
    }

    fn parse_paths(tokens: SplitWhitespace<'_>) -> Result<Vec<NodePath>, ParseError> {
        tokens
            .map(|token| token.parse().context(PathSnafu { argument: token }))
            .collect()
    }

    fn single_path(
        command: &str,
        tokens: SplitWhitespace<'_>,
    ) -> Result<NodePath, ParseError> {
        let mut paths = Self::parse_paths(tokens)?;
        ensure!(
            paths.len() == 1,
            ArgumentCountSnafu {
                command,
                expected: 1usize,
                actual: paths.len(),
            }
        );
        Ok(paths.remove(0))
    }

    fn path_pair(
        command: &str,
        tokens: SplitWhitespace<'_>,
    ) -> Result<(NodePath, NodePath), ParseError> {
        let mut paths = Self::parse_paths(tokens)?;
        ensure!(
            paths.len() == 2,
            ArgumentCountSnafu {
                command,
                expected: 2usize,
                actual: paths.len(),
            }
        );
        let destination = paths.remove(1);
        let source = paths.remove(0);
        Ok((source, destination))
    }
}

#[derive(Debug, Snafu)]
pub enum ParseError {
    #[snafu(display("Empty command line"))]
    EmptyCommandError,
    #[snafu(display("Unknown command - '{}'", command))]
    UnknownCommandError { command: String },
    #[snafu(display(
        "{} - invalid number of arguments, expected {}, got {}",
        command,
        expected,
        actual
    ))]
    ArgumentCountError {
        command: String,
        expected: usize,
        actual: usize,
    },
    #[snafu(display("Invalid path - '{}'", argument))]
    PathError {
        argument: String,
        source: InvalidPathError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_path_commands() {
        match Command::parse("md /Dir1/Dir2").unwrap() {
            Command::MakeDirectory { path } => assert_eq!(path.segments(), ["Dir1", "Dir2"]),
            other => panic!("expected MakeDirectory, got {other:?}"),
        }
    }

    #[test]
    fn parses_two_path_commands_in_order() {
        match Command::parse("cp /a /b").unwrap() {
            Command::Copy {
                source,
                destination,
            } => {
                assert_eq!(source.segments(), ["a"]);
                assert_eq!(destination.segments(), ["b"]);
            }
            other => panic!("expected Copy, got {other:?}"),
        }
    }

    #[test]
    fn tolerates_repeated_whitespace_between_tokens() {
        let command = Command::parse("  mv   /a\t/b ").unwrap();
        assert!(matches!(command, Command::Move { .. }));
    }

    #[test]
    fn blank_line_is_an_empty_command_error() {
        assert!(matches!(
            Command::parse("   "),
            Err(ParseError::EmptyCommandError)
        ));
    }

    #[test]
    fn unrecognized_command_name_is_rejected() {
        assert!(matches!(
            Command::parse("ls /"),
            Err(ParseError::UnknownCommandError { .. })
        ));
    }

    #[test]
    fn unknown_command_wins_over_its_malformed_arguments() {
        assert!(matches!(
            Command::parse("ls no-slash"),
            Err(ParseError::UnknownCommandError { .. })
        ));
    }

    #[test]
    fn argument_count_is_validated_per_command() {
        assert!(matches!(
            Command::parse("md /a /b"),
            Err(ParseError::ArgumentCountError {
                expected: 1,
                actual: 2,
                ..
            })
        ));
        assert!(matches!(
            Command::parse("mv /a"),
            Err(ParseError::ArgumentCountError {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn malformed_path_argument_is_rejected() {
        assert!(matches!(
            Command::parse("md Dir1"),
            Err(ParseError::PathError { .. })
        ));
        assert!(matches!(
            Command::parse("rm /a//b"),
            Err(ParseError::PathError { .. })
        ));
    }
}
