/*!
 * Ready List
 * One FIFO queue per priority level
 */

use crate::core::limits::PRIORITY_LEVELS;
use crate::core::types::Priority;
use crate::process::ProcessHandle;
use std::collections::VecDeque;

/// Per-priority ready queues
///
/// The running process stays at its position in its queue; only its status
/// says it is running.
#[derive(Debug, Clone, Default)]
pub struct ReadyList {
    levels: [VecDeque<ProcessHandle>; PRIORITY_LEVELS],
}

impl ReadyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the back of a level
    pub fn push_back(&mut self, priority: Priority, handle: ProcessHandle) {
        self.levels[priority.level()].push_back(handle);
    }

    /// Remove a process from a level, wherever it sits
    pub fn remove(&mut self, priority: Priority, handle: ProcessHandle) -> bool {
        let queue = &mut self.levels[priority.level()];
        match queue.iter().position(|h| *h == handle) {
            Some(pos) => {
                queue.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Move a process to the back of its level
    pub fn rotate(&mut self, priority: Priority, handle: ProcessHandle) -> bool {
        if self.remove(priority, handle) {
            self.push_back(priority, handle);
            true
        } else {
            false
        }
    }

    /// Front of the highest non-empty level
    pub fn candidate(&self) -> Option<(Priority, ProcessHandle)> {
        Priority::descending()
            .find_map(|p| self.levels[p.level()].front().map(|h| (p, *h)))
    }

    pub fn level(&self, priority: Priority) -> impl Iterator<Item = ProcessHandle> + '_ {
        self.levels[priority.level()].iter().copied()
    }

    /// Number of times a process appears across all levels
    pub fn occurrences(&self, handle: ProcessHandle) -> usize {
        self.levels
            .iter()
            .map(|q| q.iter().filter(|h| **h == handle).count())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(VecDeque::is_empty)
    }
}
