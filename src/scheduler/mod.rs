/*!
 * Scheduler
 * Priority selection of the single running process
 */

mod ready;

pub use ready::ReadyList;

use crate::core::types::ProcessStatus;
use crate::process::{ProcessHandle, ProcessTable, QueueTag};
use log::debug;
use serde::{Deserialize, Serialize};

/// Scheduler statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    /// Scheduler invocations (one per successful kernel call)
    pub invocations: u64,
    /// Times the running process changed
    pub context_switches: u64,
    /// Times a running process was demoted for a higher-priority one
    pub preemptions: u64,
    /// Round-robin time-outs
    pub time_outs: u64,
}

/// Ready list plus the running-process reference
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    ready: ReadyList,
    running: Option<ProcessHandle>,
    stats: SchedulerStats,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected process, if any
    #[inline(always)]
    pub fn running(&self) -> Option<ProcessHandle> {
        self.running
    }

    #[inline(always)]
    pub fn ready(&self) -> &ReadyList {
        &self.ready
    }

    #[inline(always)]
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Put a process at the back of its level and mark it READY
    pub(crate) fn make_ready(&mut self, table: &mut ProcessTable, handle: ProcessHandle) {
        let process = &mut table[handle];
        process.status = ProcessStatus::Ready;
        process.queue = QueueTag::Ready(process.priority);
        self.ready.push_back(process.priority, handle);
    }

    /// Take a process off its ready level
    pub(crate) fn unready(&mut self, table: &mut ProcessTable, handle: ProcessHandle) -> bool {
        let process = &mut table[handle];
        let QueueTag::Ready(priority) = process.queue else {
            return false;
        };
        process.queue = QueueTag::Unqueued;
        self.ready.remove(priority, handle)
    }

    /// Forget the running reference if it points at `handle`
    pub(crate) fn forget(&mut self, handle: ProcessHandle) {
        if self.running == Some(handle) {
            self.running = None;
        }
    }

    /// Move the running process to the back of its level as READY
    ///
    /// Returns false when nothing is running.
    pub(crate) fn time_out(&mut self, table: &mut ProcessTable) -> bool {
        let Some(handle) = self.running else {
            return false;
        };
        let Some(process) = table.get_mut(handle) else {
            return false;
        };
        let priority = process.priority;
        process.status = ProcessStatus::Ready;
        self.ready.rotate(priority, handle);
        self.stats.time_outs += 1;
        debug!("Process {} timed out", process.name);
        true
    }

    /// Select the running process
    ///
    /// The front of the highest non-empty level replaces the current runner
    /// when nothing is running, when it has strictly higher priority, or when
    /// the current runner is no longer RUNNING. A demoted runner keeps its
    /// queue position.
    pub fn schedule(&mut self, table: &mut ProcessTable) -> Option<ProcessHandle> {
        self.stats.invocations += 1;

        let Some((priority, candidate)) = self.ready.candidate() else {
            return self.running;
        };

        let current = self
            .running
            .and_then(|h| table.get(h).map(|p| (h, p.priority, p.status)));

        let promote = match current {
            None => true,
            Some((_, running_priority, status)) => {
                priority > running_priority || status != ProcessStatus::Running
            }
        };

        if !promote {
            return self.running;
        }

        if let Some((previous, running_priority, ProcessStatus::Running)) = current {
            table[previous].status = ProcessStatus::Ready;
            if previous != candidate && priority > running_priority {
                self.stats.preemptions += 1;
            }
        }

        if self.running != Some(candidate) {
            self.stats.context_switches += 1;
            debug!(
                "Switching to {} (priority {:?})",
                table[candidate].name, priority
            );
        }

        table[candidate].status = ProcessStatus::Running;
        self.running = Some(candidate);
        self.running
    }
}
