/*!
 * Process Module
 * Process table, creation tree, lifecycle and consistency checks
 */

mod invariants;
pub mod manager;
pub mod manager_builder;
pub mod table;
mod tree;
pub mod types;

// Re-export for convenience
pub use manager::ProcessManager;
pub use manager_builder::ProcessManagerBuilder;
pub use table::ProcessTable;
pub use types::{Holdings, Process, ProcessHandle, ProcessInfo, QueueTag};
