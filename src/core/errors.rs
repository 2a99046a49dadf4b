/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Name, Units};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for manager operations
pub type ManagerResult<T> = std::result::Result<T, ManagerError>;

/// Rejections raised by the process & resource manager
///
/// Every variant is raised before any state is touched, so a rejected
/// operation leaves the manager exactly as it found it. Callers at the text
/// boundary collapse all of them into a single `error` marker.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ManagerError {
    #[error("Invalid priority: {0}")]
    #[diagnostic(
        code(process::invalid_priority),
        help("Priority must be 0 (init), 1 (user) or 2 (system).")
    )]
    InvalidPriority(i64),

    #[error("Priority INIT is reserved for the init process, not {0}")]
    #[diagnostic(
        code(process::reserved_priority),
        help("Create user processes with priority 1 or 2.")
    )]
    ReservedPriority(Name),

    #[error("Process {0} already exists")]
    #[diagnostic(
        code(process::duplicate),
        help("Process identities are unique regardless of letter case.")
    )]
    DuplicateProcess(Name),

    #[error("Process {0} not found")]
    #[diagnostic(
        code(process::not_found),
        help("The process may have been destroyed or never existed.")
    )]
    ProcessNotFound(Name),

    #[error("Resource {0} not found")]
    #[diagnostic(
        code(resource::not_found),
        help("Resources are fixed at initialization and named R1, R2, ...")
    )]
    ResourceNotFound(Name),

    #[error("Process {0} is protected")]
    #[diagnostic(
        code(process::protected),
        help("The init process cannot be destroyed and never holds resources.")
    )]
    ProtectedProcess(Name),

    #[error("Invalid unit count: {0}")]
    #[diagnostic(
        code(resource::invalid_units),
        help("Unit counts must be non-negative and, on release, no more than held.")
    )]
    InvalidUnits(i64),

    #[error("Requesting {requested} units of {resource} exceeds its capacity of {capacity}")]
    #[diagnostic(
        code(resource::capacity_exceeded),
        help("A process can never hold more units than the resource was created with.")
    )]
    CapacityExceeded {
        resource: Name,
        requested: i64,
        capacity: Units,
    },

    #[error("Process {process} does not hold resource {resource}")]
    #[diagnostic(
        code(resource::not_held),
        help("Only the running process can release, and only what it holds.")
    )]
    NotHeld { process: Name, resource: Name },

    #[error("No process is running")]
    #[diagnostic(
        code(scheduler::no_running_process),
        help("Call initialize() before issuing kernel calls.")
    )]
    NoRunningProcess,
}

/// Unified error type for the simulator outside the core operations
#[derive(Error, Debug, Diagnostic)]
pub enum SimError {
    #[error("Manager error: {0}")]
    #[diagnostic(transparent)]
    Manager(#[from] ManagerError),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(sim::configuration_error),
        help("Check PRM_RESOURCES, PRM_TRACE_JSON or the configuration file.")
    )]
    Configuration(String),

    #[error("Invariant violated: {0}")]
    #[diagnostic(
        code(sim::invariant_violation),
        help("The manager reached an inconsistent state. Please report this issue.")
    )]
    InvariantViolation(String),

    #[error("I/O error: {0}")]
    #[diagnostic(code(sim::io_error))]
    Io(String),
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_error_serialization() {
        let error = ManagerError::CapacityExceeded {
            resource: Name::from("R2"),
            requested: 3,
            capacity: 2,
        };
        let json = serde_json::to_string(&error).unwrap();
        let deserialized: ManagerError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, deserialized);
        assert!(json.contains("capacity_exceeded"));
    }

    #[test]
    fn test_manager_error_display() {
        let error = ManagerError::ProcessNotFound(Name::from("p9"));
        assert_eq!(error.to_string(), "Process p9 not found");

        let error = ManagerError::NotHeld {
            process: Name::from("p1"),
            resource: Name::from("R3"),
        };
        assert_eq!(error.to_string(), "Process p1 does not hold resource R3");
    }

    #[test]
    fn test_sim_error_from_manager_error() {
        let error: SimError = ManagerError::NoRunningProcess.into();
        assert!(matches!(error, SimError::Manager(ManagerError::NoRunningProcess)));
        assert_eq!(error.to_string(), "Manager error: No process is running");
    }

    #[test]
    fn test_sim_error_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing script");
        let error: SimError = io.into();
        assert!(matches!(error, SimError::Io(_)));
    }
}
