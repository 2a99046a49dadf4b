/*!
 * Command Shell
 * Text front end for scripted test sequences
 */

pub mod command;
pub mod dispatcher;

pub use command::{Command, ParseError, INVALID_NUMBER};
pub use dispatcher::{process_line, resource_line, Shell, ERROR_TOKEN};
