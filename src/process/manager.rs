/*!
 * Process Management
 * Handles process creation, destruction, time-out and queries
 */

use super::manager_builder::ProcessManagerBuilder;
use super::table::ProcessTable;
use super::types::{Process, ProcessHandle, ProcessInfo, QueueTag};
use crate::core::errors::{ManagerError, ManagerResult};
use crate::core::limits::INIT_PROCESS;
use crate::core::types::{Name, Pid, Priority, Units};
use crate::resources::{Resource, ResourceIndex, ResourceInfo};
use crate::scheduler::{Scheduler, SchedulerStats};
use log::{info, warn};

/// Process & resource manager
///
/// Owns every piece of simulation state: the process table, the fixed
/// resource set and the scheduler. Each kernel call runs to completion,
/// ending with exactly one scheduler pass, and reports the identity of the
/// process left running.
#[derive(Debug)]
pub struct ProcessManager {
    pub(crate) table: ProcessTable,
    pub(crate) resources: Vec<Resource>,
    pub(crate) scheduler: Scheduler,
    resource_count: usize,
}

impl ProcessManager {
    /// Create an initialized manager with the default resource set
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for constructing a ProcessManager
    pub fn builder() -> ProcessManagerBuilder {
        ProcessManagerBuilder::new()
    }

    /// Manager with `resource_count` resources; not yet initialized
    pub(crate) fn with_resource_count(resource_count: usize) -> Self {
        Self {
            table: ProcessTable::new(),
            resources: Vec::new(),
            scheduler: Scheduler::new(),
            resource_count,
        }
    }

    /// Reset all state: fresh resources, a lone running init process
    pub fn initialize(&mut self) -> Pid {
        self.table = ProcessTable::new();
        self.scheduler = Scheduler::new();
        self.resources = (1..=self.resource_count)
            .map(|ordinal| Resource::with_ordinal(ordinal as Units))
            .collect();

        let init = self.spawn(Pid::from(INIT_PROCESS), Priority::Init, None);
        self.scheduler.schedule(&mut self.table);

        info!(
            "Manager initialized with {} resources",
            self.resources.len()
        );
        self.table[init].name.clone()
    }

    /// Create a READY child of the running process
    pub fn create_process(&mut self, name: &str, priority: Priority) -> ManagerResult<Pid> {
        if priority == Priority::Init && !Name::from(name).is_init() {
            return Err(self.reject(ManagerError::ReservedPriority(name.into())));
        }
        if self.table.lookup(name).is_some() {
            return Err(self.reject(ManagerError::DuplicateProcess(name.into())));
        }

        let parent = self.scheduler.running().filter(|h| self.table.contains(*h));
        self.spawn(Pid::from(name), priority, parent);
        info!(
            "Created process {} (priority {:?}, parent {:?})",
            name,
            priority,
            parent.map(|p| self.table[p].name.as_str())
        );
        self.reschedule()
    }

    /// Destroy a process and all of its descendants
    pub fn destroy_process(&mut self, name: &str) -> ManagerResult<Pid> {
        let handle = self
            .table
            .lookup(name)
            .ok_or_else(|| self.reject(ManagerError::ProcessNotFound(name.into())))?;
        if self.table[handle].name.is_init() {
            return Err(self.reject(ManagerError::ProtectedProcess(name.into())));
        }

        let destroyed = self.destroy_subtree(handle);
        info!("Destroyed {} process(es) rooted at {}", destroyed, name);
        self.reschedule()
    }

    /// Send the running process to the back of its ready level
    pub fn time_out(&mut self) -> ManagerResult<Pid> {
        if !self.scheduler.time_out(&mut self.table) {
            return Err(self.reject(ManagerError::NoRunningProcess));
        }
        self.reschedule()
    }

    /// Identity of the running process
    pub fn running(&self) -> Option<&Pid> {
        self.scheduler
            .running()
            .and_then(|h| self.table.get(h))
            .map(Process::name)
    }

    pub fn query_process(&self, name: &str) -> ManagerResult<ProcessInfo> {
        self.table
            .lookup(name)
            .map(|h| self.process_info(h))
            .ok_or_else(|| ManagerError::ProcessNotFound(name.into()))
    }

    pub fn query_resource(&self, name: &str) -> ManagerResult<ResourceInfo> {
        self.resource_index(name).map(|r| self.resources[r.get()].info())
    }

    /// Processes in creation order
    pub fn list_processes(&self) -> Vec<ProcessInfo> {
        self.table.iter().map(|(h, _)| self.process_info(h)).collect()
    }

    /// Resources in ordinal order
    pub fn list_resources(&self) -> Vec<ResourceInfo> {
        self.resources.iter().map(Resource::info).collect()
    }

    pub fn scheduler_stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    /// Number of live processes
    pub fn process_count(&self) -> usize {
        self.table.len()
    }

    /// Read access to the process table
    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub(crate) fn resource_index(&self, name: &str) -> ManagerResult<ResourceIndex> {
        self.resources
            .iter()
            .position(|r| r.name().matches(name))
            .map(ResourceIndex)
            .ok_or_else(|| ManagerError::ResourceNotFound(name.into()))
    }

    /// The process allowed to issue resource calls
    pub(crate) fn caller(&self) -> ManagerResult<ProcessHandle> {
        self.scheduler
            .running()
            .filter(|h| self.table.contains(*h))
            .ok_or(ManagerError::NoRunningProcess)
    }

    /// Allocate a process, link it to its parent and queue it as READY
    fn spawn(&mut self, name: Pid, priority: Priority, parent: Option<ProcessHandle>) -> ProcessHandle {
        let handle = self.table.insert(Process::new(name, priority, parent));
        if let Some(parent) = parent {
            self.link_child(parent, handle);
        }
        self.scheduler.make_ready(&mut self.table, handle);
        handle
    }

    /// Final scheduler pass of every successful kernel call
    pub(crate) fn reschedule(&mut self) -> ManagerResult<Pid> {
        self.scheduler
            .schedule(&mut self.table)
            .and_then(|h| self.table.get(h))
            .map(|p| p.name.clone())
            .ok_or(ManagerError::NoRunningProcess)
    }

    /// Log a rejected call and hand the error back
    pub(crate) fn reject(&self, error: ManagerError) -> ManagerError {
        warn!("Rejected: {}", error);
        error
    }

    fn process_info(&self, handle: ProcessHandle) -> ProcessInfo {
        let process = &self.table[handle];
        let resource_name = |r: ResourceIndex| self.resources[r.get()].name().clone();

        ProcessInfo {
            id: process.name.clone(),
            priority: process.priority,
            status: process.status,
            parent: process
                .parent
                .and_then(|p| self.table.get(p))
                .map(|p| p.name.clone()),
            children: process
                .children
                .iter()
                .filter_map(|c| self.table.get(*c))
                .map(|c| c.name.clone())
                .collect(),
            held: process
                .holdings
                .iter()
                .map(|(r, units)| (resource_name(r), units))
                .collect(),
            blocked_on: match process.queue {
                QueueTag::Blocked { resource, units } => Some((resource_name(resource), units)),
                _ => None,
            },
        }
    }
}

impl Default for ProcessManager {
    fn default() -> Self {
        Self::new()
    }
}
