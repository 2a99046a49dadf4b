/*!
 * Shell Dispatcher
 * Drives a ProcessManager from command lines and renders the results
 */

use super::command::Command;
use crate::core::errors::{ManagerError, SimError};
use crate::core::types::{Pid, Priority};
use crate::monitoring::span_command;
use crate::process::{ProcessInfo, ProcessManager};
use crate::resources::ResourceInfo;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Text written for any failed command
pub const ERROR_TOKEN: &str = "error";

/// Written before the banner of an `init` command to start a new sequence
const SEQUENCE_BREAK: &str = "\r\n\r\n";

/// Line-oriented front end over a ProcessManager
///
/// Mutating commands print the identity of the running process followed by a
/// space; listings print one line per entry. Every failure prints `error `
/// and leaves the manager as it was.
pub struct Shell<W: Write> {
    manager: ProcessManager,
    out: W,
    line: usize,
}

impl<W: Write> Shell<W> {
    pub fn new(manager: ProcessManager, out: W) -> Self {
        Self {
            manager,
            out,
            line: 0,
        }
    }

    /// Initialize the manager and print the banner of the first sequence
    pub fn boot(&mut self) -> Result<(), SimError> {
        let init = self.manager.initialize();
        self.emit(&init)
    }

    /// Execute every line of `input`, returning the number of commands run
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<usize, SimError> {
        let mut executed = 0;
        for line in input.lines() {
            if self.execute_line(&line?)? {
                executed += 1;
            }
        }
        self.out.flush()?;
        Ok(executed)
    }

    /// Execute one line; blank lines are skipped and report false
    pub fn execute_line(&mut self, line: &str) -> Result<bool, SimError> {
        self.line += 1;
        if line.trim().is_empty() {
            return Ok(false);
        }

        match line.parse::<Command>() {
            Ok(command) => self.execute(command)?,
            Err(e) => {
                warn!(line = self.line, error = %e, "Unparsable command");
                self.emit_error()?;
            }
        }
        Ok(true)
    }

    /// Execute a parsed command
    pub fn execute(&mut self, command: Command) -> Result<(), SimError> {
        let span = span_command(command.keyword(), self.line);
        let _entered = span.enter();

        let outcome = match command {
            Command::Init => {
                self.out.write_all(SEQUENCE_BREAK.as_bytes())?;
                Ok(self.manager.initialize())
            }
            Command::Create { id, priority } => {
                Priority::try_from(priority).and_then(|p| self.manager.create_process(&id, p))
            }
            Command::Destroy { id } => self.manager.destroy_process(&id),
            Command::Request { rid, units } => self.manager.request_resource(&rid, units),
            Command::Release { rid, units } => self.manager.release_resource(&rid, units),
            Command::TimeOut => self.manager.time_out(),
            Command::ListProcesses => {
                let lines = self.manager.list_processes().iter().map(process_line).collect();
                return self.write_lines(lines);
            }
            Command::ListResources => {
                let lines = self.manager.list_resources().iter().map(resource_line).collect();
                return self.write_lines(lines);
            }
            Command::GetProcess { id } => {
                return match self.manager.query_process(&id) {
                    Ok(info) => self.write_lines(vec![process_line(&info)]),
                    Err(e) => self.query_failed(e),
                };
            }
            Command::GetResource { rid } => {
                return match self.manager.query_resource(&rid) {
                    Ok(info) => self.write_lines(vec![resource_line(&info)]),
                    Err(e) => self.query_failed(e),
                };
            }
        };

        match outcome {
            Ok(running) => {
                span.record_running(running.as_str());
                self.emit(&running)
            }
            Err(e) => {
                span.record_error(&e.to_string());
                self.emit_error()
            }
        }
    }

    pub fn manager(&self) -> &ProcessManager {
        &self.manager
    }

    /// Give back the output sink
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines(&mut self, lines: Vec<String>) -> Result<(), SimError> {
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn query_failed(&mut self, error: ManagerError) -> Result<(), SimError> {
        debug!(error = %error, "Query failed");
        self.emit_error()
    }

    fn emit(&mut self, running: &Pid) -> Result<(), SimError> {
        write!(self.out, "{} ", running)?;
        Ok(())
    }

    fn emit_error(&mut self) -> Result<(), SimError> {
        write!(self.out, "{} ", ERROR_TOKEN)?;
        Ok(())
    }
}

/// `id priority status`
pub fn process_line(info: &ProcessInfo) -> String {
    format!("{} {} {}", info.id, info.priority, info.status)
}

/// `rid free/capacity waiting`
pub fn resource_line(info: &ResourceInfo) -> String {
    format!("{} {}/{} {}", info.id, info.free, info.capacity, info.waiting)
}
