/*!
 * Resource Entity
 * Fixed-capacity resource with a FIFO wait queue
 */

use crate::core::limits::RESOURCE_PREFIX;
use crate::core::types::{Rid, Units};
use crate::process::ProcessHandle;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Position of a resource in the manager's fixed resource table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceIndex(pub(crate) usize);

impl ResourceIndex {
    #[inline(always)]
    pub fn get(self) -> usize {
        self.0
    }
}

/// Blocked request waiting for units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waiter {
    pub process: ProcessHandle,
    pub units: Units,
}

/// Resource control block
#[derive(Debug, Clone)]
pub struct Resource {
    name: Rid,
    capacity: Units,
    free: Units,
    waiters: VecDeque<Waiter>,
}

impl Resource {
    /// Create resource `ordinal` (1-based): named `R{ordinal}`, capacity `ordinal`
    pub fn with_ordinal(ordinal: Units) -> Self {
        Self::new(Rid::from(format!("{RESOURCE_PREFIX}{ordinal}")), ordinal)
    }

    pub fn new(name: Rid, capacity: Units) -> Self {
        Self {
            name,
            capacity,
            free: capacity,
            waiters: VecDeque::new(),
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &Rid {
        &self.name
    }

    #[inline(always)]
    pub fn capacity(&self) -> Units {
        self.capacity
    }

    #[inline(always)]
    pub fn free(&self) -> Units {
        self.free
    }

    /// Number of blocked requests
    #[inline]
    pub fn waiting(&self) -> usize {
        self.waiters.len()
    }

    pub fn waiters(&self) -> impl Iterator<Item = &Waiter> + '_ {
        self.waiters.iter()
    }

    /// Oldest blocked request
    #[inline]
    pub fn front(&self) -> Option<&Waiter> {
        self.waiters.front()
    }

    /// Whether `units` can be granted right now
    #[inline]
    pub fn can_grant(&self, units: Units) -> bool {
        self.free >= units
    }

    /// Take `units` out of the free pool
    pub(crate) fn take(&mut self, units: Units) {
        debug_assert!(units <= self.free, "grant larger than free pool");
        self.free -= units;
    }

    /// Return `units` to the free pool
    pub(crate) fn put_back(&mut self, units: Units) {
        debug_assert!(self.free + units <= self.capacity, "release overflows capacity");
        self.free += units;
    }

    /// Append a blocked request to the back of the queue
    pub(crate) fn enqueue(&mut self, waiter: Waiter) {
        self.waiters.push_back(waiter);
    }

    /// Pop the front request if it fits in the free pool, granting it
    ///
    /// A request that does not fit stops the drain even if later, smaller
    /// requests would fit.
    pub(crate) fn grant_front(&mut self) -> Option<Waiter> {
        let units = self.waiters.front()?.units;
        if !self.can_grant(units) {
            return None;
        }
        let waiter = self.waiters.pop_front()?;
        self.take(waiter.units);
        Some(waiter)
    }

    /// Remove a process's request wherever it sits in the queue
    pub(crate) fn remove_waiter(&mut self, process: ProcessHandle) -> Option<Waiter> {
        let pos = self.waiters.iter().position(|w| w.process == process)?;
        self.waiters.remove(pos)
    }

    /// Query snapshot
    pub fn info(&self) -> ResourceInfo {
        ResourceInfo {
            id: self.name.clone(),
            free: self.free,
            capacity: self.capacity,
            waiting: self.waiting(),
        }
    }
}

/// Resource query result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ResourceInfo {
    pub id: Rid,
    pub free: Units,
    pub capacity: Units,
    pub waiting: usize,
}
