/*!
 * Process Table
 * Arena of process control blocks addressed by stable handles
 */

use super::types::{Process, ProcessHandle};
use crate::core::types::fold;
use ahash::RandomState;
use smartstring::alias::String as SmartString;
use std::collections::HashMap;
use std::ops::{Index, IndexMut};

/// Owning registry of all live processes
///
/// Slots are appended in creation order and never reused, so iterating the
/// table walks processes in the order they were created.
#[derive(Debug, Default)]
pub struct ProcessTable {
    slots: Vec<Option<Process>>,
    index: HashMap<SmartString, ProcessHandle, RandomState>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a process and return its handle
    pub(crate) fn insert(&mut self, process: Process) -> ProcessHandle {
        let handle = ProcessHandle(self.slots.len() as u32);
        self.index.insert(process.name.key(), handle);
        self.slots.push(Some(process));
        handle
    }

    /// Remove a process, freeing its identity for reuse
    pub(crate) fn remove(&mut self, handle: ProcessHandle) -> Option<Process> {
        let process = self.slots.get_mut(handle.slot())?.take()?;
        self.index.remove(&process.name.key());
        Some(process)
    }

    /// Find a process by identity, ignoring case
    pub fn lookup(&self, name: &str) -> Option<ProcessHandle> {
        self.index.get(&fold(name)).copied()
    }

    pub fn get(&self, handle: ProcessHandle) -> Option<&Process> {
        self.slots.get(handle.slot()).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, handle: ProcessHandle) -> Option<&mut Process> {
        self.slots.get_mut(handle.slot()).and_then(Option::as_mut)
    }

    #[inline]
    pub fn contains(&self, handle: ProcessHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Live processes in creation order
    pub fn iter(&self) -> impl Iterator<Item = (ProcessHandle, &Process)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, p)| p.as_ref().map(|p| (ProcessHandle(slot as u32), p)))
    }

    /// Number of live processes
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl Index<ProcessHandle> for ProcessTable {
    type Output = Process;

    fn index(&self, handle: ProcessHandle) -> &Process {
        match self.get(handle) {
            Some(process) => process,
            None => panic!("stale process handle {handle}"),
        }
    }
}

impl IndexMut<ProcessHandle> for ProcessTable {
    fn index_mut(&mut self, handle: ProcessHandle) -> &mut Process {
        match self.get_mut(handle) {
            Some(process) => process,
            None => panic!("stale process handle {handle}"),
        }
    }
}
