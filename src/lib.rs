/*!
 * Process & Resource Manager Library
 * Simulated process lifecycle, priority scheduling and resource allocation
 */

pub mod core;
pub mod monitoring;
pub mod process;
pub mod resources;
pub mod scheduler;
pub mod shell;

// Re-exports
pub use crate::core::{ManagerError, ManagerResult, Pid, Priority, ProcessStatus, Rid, SimConfig, SimError, Units};
pub use monitoring::init_tracing;
pub use process::{ProcessInfo, ProcessManager, ProcessManagerBuilder};
pub use resources::ResourceInfo;
pub use scheduler::SchedulerStats;
pub use shell::{Command, Shell};
