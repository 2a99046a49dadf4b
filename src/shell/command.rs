/*!
 * Shell Commands
 * Parsing of the line-oriented command language
 */

use miette::Diagnostic;
use std::str::FromStr;
use thiserror::Error;

/// Value used for a number argument that does not parse
///
/// Always rejected downstream, so a malformed number ends up as an ordinary
/// `error` result instead of a parse failure.
pub const INVALID_NUMBER: i64 = -1;

/// One parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init,
    Create { id: String, priority: i64 },
    Destroy { id: String },
    Request { rid: String, units: i64 },
    Release { rid: String, units: i64 },
    TimeOut,
    ListProcesses,
    ListResources,
    GetProcess { id: String },
    GetResource { rid: String },
}

impl Command {
    /// Command word as written in scripts
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Create { .. } => "cr",
            Self::Destroy { .. } => "de",
            Self::Request { .. } => "req",
            Self::Release { .. } => "rel",
            Self::TimeOut => "to",
            Self::ListProcesses => "allp",
            Self::ListResources => "allr",
            Self::GetProcess { .. } => "getp",
            Self::GetResource { .. } => "getr",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ParseError {
    #[error("Empty command line")]
    #[diagnostic(code(shell::empty))]
    Empty,

    #[error("Unknown command: {0}")]
    #[diagnostic(
        code(shell::unknown_command),
        help("Commands: init, cr, de, req, rel, to, allp, allr, getp, getr")
    )]
    UnknownCommand(String),

    #[error("{command} takes {expected} argument(s), got {found}")]
    #[diagnostic(code(shell::argument_count))]
    ArgumentCount {
        command: &'static str,
        expected: usize,
        found: usize,
    },
}

fn number(word: &str) -> i64 {
    word.parse().unwrap_or(INVALID_NUMBER)
}

fn expect_args<'a>(
    command: &'static str,
    args: &'a [&'a str],
    expected: usize,
) -> Result<&'a [&'a str], ParseError> {
    if args.len() != expected {
        return Err(ParseError::ArgumentCount {
            command,
            expected,
            found: args.len(),
        });
    }
    Ok(args)
}

impl FromStr for Command {
    type Err = ParseError;

    /// Parse one line; the command word is case-insensitive and commands
    /// without arguments ignore anything after the word
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let word = words.next().ok_or(ParseError::Empty)?;
        let args: Vec<&str> = words.collect();

        let command = match word.to_ascii_lowercase().as_str() {
            "init" => Self::Init,
            "to" => Self::TimeOut,
            "allp" => Self::ListProcesses,
            "allr" => Self::ListResources,
            "cr" => {
                let args = expect_args("cr", &args, 2)?;
                Self::Create {
                    id: args[0].to_string(),
                    priority: number(args[1]),
                }
            }
            "de" => Self::Destroy {
                id: expect_args("de", &args, 1)?[0].to_string(),
            },
            "req" => {
                let args = expect_args("req", &args, 2)?;
                Self::Request {
                    rid: args[0].to_string(),
                    units: number(args[1]),
                }
            }
            "rel" => {
                let args = expect_args("rel", &args, 2)?;
                Self::Release {
                    rid: args[0].to_string(),
                    units: number(args[1]),
                }
            }
            "getp" => Self::GetProcess {
                id: expect_args("getp", &args, 1)?[0].to_string(),
            },
            "getr" => Self::GetResource {
                rid: expect_args("getr", &args, 1)?[0].to_string(),
            },
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_all_commands() {
        assert_eq!("init".parse(), Ok(Command::Init));
        assert_eq!(
            "cr x 1".parse(),
            Ok(Command::Create {
                id: "x".into(),
                priority: 1
            })
        );
        assert_eq!("de x".parse(), Ok(Command::Destroy { id: "x".into() }));
        assert_eq!(
            "req R2 2".parse(),
            Ok(Command::Request {
                rid: "R2".into(),
                units: 2
            })
        );
        assert_eq!(
            "rel R2 1".parse(),
            Ok(Command::Release {
                rid: "R2".into(),
                units: 1
            })
        );
        assert_eq!("to".parse(), Ok(Command::TimeOut));
        assert_eq!("allp".parse(), Ok(Command::ListProcesses));
        assert_eq!("allr".parse(), Ok(Command::ListResources));
        assert_eq!("getp x".parse(), Ok(Command::GetProcess { id: "x".into() }));
        assert_eq!("getr R1".parse(), Ok(Command::GetResource { rid: "R1".into() }));
    }

    #[test]
    fn test_command_word_ignores_case_and_spacing() {
        assert_eq!(
            "  CR   x\t2 ".parse(),
            Ok(Command::Create {
                id: "x".into(),
                priority: 2
            })
        );
        assert_eq!("To".parse(), Ok(Command::TimeOut));
    }

    #[test]
    fn test_bad_number_becomes_invalid() {
        assert_eq!(
            "req R1 lots".parse(),
            Ok(Command::Request {
                rid: "R1".into(),
                units: INVALID_NUMBER
            })
        );
    }

    #[test]
    fn test_argument_count_enforced() {
        assert_eq!(
            "cr x".parse::<Command>(),
            Err(ParseError::ArgumentCount {
                command: "cr",
                expected: 2,
                found: 1
            })
        );
        assert!("de".parse::<Command>().is_err());
        assert!("getr R1 R2".parse::<Command>().is_err());
        assert_eq!("to now".parse(), Ok(Command::TimeOut));
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(
            "fork x".parse::<Command>(),
            Err(ParseError::UnknownCommand("fork".into()))
        );
        assert_eq!("   ".parse::<Command>(), Err(ParseError::Empty));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(Command::Init.keyword(), "init");
        assert_eq!(Command::ListResources.keyword(), "allr");
    }
}
