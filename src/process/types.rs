/*!
 * Process Types
 * Process control block and query snapshots
 */

use crate::core::types::{Pid, Priority, ProcessStatus, Rid, Units};
use crate::resources::ResourceIndex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle of a process in the process table
///
/// Handles are never reused within one initialization, so a handle held by
/// a queue or a parent always refers to the same process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessHandle(pub(crate) u32);

impl ProcessHandle {
    #[inline(always)]
    pub(crate) fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which queue a process currently sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueTag {
    /// In no queue (only between transitions)
    Unqueued,
    /// In the ready list of the given level
    Ready(Priority),
    /// In the wait queue of a resource, asking for `units`
    Blocked { resource: ResourceIndex, units: Units },
}

/// Units held per resource, in the order they were first acquired
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Holdings {
    entries: Vec<(ResourceIndex, Units)>,
}

impl Holdings {
    /// Units held of `resource`, if any
    pub fn get(&self, resource: ResourceIndex) -> Option<Units> {
        self.entries
            .iter()
            .find(|(r, _)| *r == resource)
            .map(|(_, units)| *units)
    }

    /// Add units, creating the entry at the back if it is new
    pub(crate) fn add(&mut self, resource: ResourceIndex, units: Units) {
        if units == 0 {
            return;
        }
        match self.entries.iter_mut().find(|(r, _)| *r == resource) {
            Some((_, held)) => *held += units,
            None => self.entries.push((resource, units)),
        }
    }

    /// Subtract units, dropping the entry when it reaches zero
    ///
    /// Returns false (and changes nothing) when fewer units are held.
    pub(crate) fn subtract(&mut self, resource: ResourceIndex, units: Units) -> bool {
        let Some(pos) = self.entries.iter().position(|(r, _)| *r == resource) else {
            return false;
        };
        let held = self.entries[pos].1;
        if units > held {
            return false;
        }
        if units == held {
            self.entries.remove(pos);
        } else {
            self.entries[pos].1 = held - units;
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceIndex, Units)> + '_ {
        self.entries.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Process control block
#[derive(Debug, Clone)]
pub struct Process {
    pub(crate) name: Pid,
    pub(crate) priority: Priority,
    pub(crate) status: ProcessStatus,
    pub(crate) holdings: Holdings,
    pub(crate) parent: Option<ProcessHandle>,
    pub(crate) children: Vec<ProcessHandle>,
    pub(crate) queue: QueueTag,
}

impl Process {
    /// New processes start READY and unqueued; the caller enqueues them
    pub(crate) fn new(name: Pid, priority: Priority, parent: Option<ProcessHandle>) -> Self {
        Self {
            name,
            priority,
            status: ProcessStatus::Ready,
            holdings: Holdings::default(),
            parent,
            children: Vec::new(),
            queue: QueueTag::Unqueued,
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &Pid {
        &self.name
    }

    #[inline(always)]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    #[inline(always)]
    pub fn status(&self) -> ProcessStatus {
        self.status
    }

    #[inline(always)]
    pub fn holdings(&self) -> &Holdings {
        &self.holdings
    }

    #[inline(always)]
    pub fn parent(&self) -> Option<ProcessHandle> {
        self.parent
    }

    #[inline(always)]
    pub fn children(&self) -> &[ProcessHandle] {
        &self.children
    }

    #[inline(always)]
    pub fn queue(&self) -> QueueTag {
        self.queue
    }

    #[inline]
    pub fn is_init(&self) -> bool {
        self.priority == Priority::Init && self.name.is_init()
    }
}

/// Process query result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessInfo {
    pub id: Pid,
    pub priority: Priority,
    pub status: ProcessStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Pid>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<Pid>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub held: Vec<(Rid, Units)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_on: Option<(Rid, Units)>,
}
