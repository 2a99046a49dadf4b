/*!
 * Resource Allocator
 * Grants, blocks and releases on behalf of the running process
 */

use super::resource::{ResourceIndex, Waiter};
use crate::core::errors::{ManagerError, ManagerResult};
use crate::core::types::{Pid, ProcessStatus, Units};
use crate::process::{ProcessHandle, ProcessManager, QueueTag};
use log::debug;

impl ProcessManager {
    /// Request units of a resource for the running process
    ///
    /// Grants immediately when enough units are free, otherwise blocks the
    /// process at the back of the resource's wait queue. A zero-unit request
    /// changes nothing but still runs the scheduler.
    pub fn request_resource(&mut self, resource: &str, units: i64) -> ManagerResult<Pid> {
        let r = self.resource_index(resource).map_err(|e| self.reject(e))?;
        let caller = self.caller().map_err(|e| self.reject(e))?;
        let process = &self.table[caller];

        if process.is_init() {
            return Err(self.reject(ManagerError::ProtectedProcess(process.name.clone())));
        }
        if units == 0 {
            return self.reschedule();
        }

        let target = &self.resources[r.get()];
        let capacity = target.capacity();
        if units < 0 {
            return Err(self.reject(ManagerError::InvalidUnits(units)));
        }
        let held = process.holdings.get(r).unwrap_or(0);
        if units > i64::from(capacity) || i64::from(held) + units > i64::from(capacity) {
            return Err(self.reject(ManagerError::CapacityExceeded {
                resource: target.name().clone(),
                requested: units,
                capacity,
            }));
        }
        let units = units as Units;

        if target.can_grant(units) {
            self.grant(r, caller, units);
            debug!(
                "Granted {} unit(s) of {} to {}",
                units,
                self.resources[r.get()].name(),
                self.table[caller].name
            );
        } else {
            self.block(r, caller, units);
        }

        self.reschedule()
    }

    /// Release units of a resource held by the running process
    ///
    /// Releasing everything held drops the holding; releasing part of it
    /// decrements. Freed units go to waiters in strict FIFO order before the
    /// single scheduler pass.
    pub fn release_resource(&mut self, resource: &str, units: i64) -> ManagerResult<Pid> {
        let r = self.resource_index(resource).map_err(|e| self.reject(e))?;
        let caller = self.caller().map_err(|e| self.reject(e))?;
        let process = &self.table[caller];

        if process.is_init() {
            return Err(self.reject(ManagerError::ProtectedProcess(process.name.clone())));
        }
        let Some(held) = process.holdings.get(r) else {
            return Err(self.reject(ManagerError::NotHeld {
                process: process.name.clone(),
                resource: self.resources[r.get()].name().clone(),
            }));
        };
        if units == 0 {
            return self.reschedule();
        }
        if units < 0 || units > i64::from(held) {
            return Err(self.reject(ManagerError::InvalidUnits(units)));
        }
        let units = units as Units;

        self.table[caller].holdings.subtract(r, units);
        let woken = self.return_units(r, units, None);
        debug!(
            "{} released {} unit(s) of {}, {} waiter(s) woken",
            self.table[caller].name,
            units,
            self.resources[r.get()].name(),
            woken
        );

        self.reschedule()
    }

    /// Put units back in the pool and serve the wait queue from the front
    ///
    /// Returns the number of processes made READY. Shared by explicit
    /// releases and the destroy cascade; during a cascade `leaving` is the
    /// process being destroyed, and the drain stops at its queue entry
    /// without granting it.
    pub(crate) fn return_units(
        &mut self,
        r: ResourceIndex,
        units: Units,
        leaving: Option<ProcessHandle>,
    ) -> usize {
        self.resources[r.get()].put_back(units);

        let mut woken = 0;
        loop {
            let front = self.resources[r.get()].front().map(|w| w.process);
            if front.is_none() || front == leaving {
                break;
            }
            let Some(Waiter { process, units: granted }) = self.resources[r.get()].grant_front() else {
                break;
            };
            self.table[process].holdings.add(r, granted);
            self.scheduler.make_ready(&mut self.table, process);
            debug!(
                "Woke {} with {} unit(s) of {}",
                self.table[process].name,
                granted,
                self.resources[r.get()].name()
            );
            woken += 1;
        }
        woken
    }

    fn grant(&mut self, r: ResourceIndex, process: ProcessHandle, units: Units) {
        self.resources[r.get()].take(units);
        self.table[process].holdings.add(r, units);
    }

    fn block(&mut self, r: ResourceIndex, process: ProcessHandle, units: Units) {
        self.scheduler.unready(&mut self.table, process);

        let pcb = &mut self.table[process];
        pcb.status = ProcessStatus::Blocked;
        pcb.queue = QueueTag::Blocked { resource: r, units };
        self.resources[r.get()].enqueue(Waiter { process, units });

        debug!(
            "{} blocked on {} for {} unit(s)",
            pcb.name,
            self.resources[r.get()].name(),
            units
        );
    }
}
