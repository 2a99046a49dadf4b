/*!
 * Consistency Checks
 * Verifies the manager's invariants between kernel calls
 */

use super::manager::ProcessManager;
use super::types::QueueTag;
use crate::core::errors::SimError;
use crate::core::types::{Priority, ProcessStatus, Units};
use crate::resources::ResourceIndex;

macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err(SimError::InvariantViolation(format!($($arg)+)));
        }
    };
}

impl ProcessManager {
    /// Check every structural invariant of the manager
    ///
    /// Meant to be called between kernel calls; mid-call states are allowed
    /// to violate these.
    pub fn check_invariants(&self) -> Result<(), SimError> {
        self.check_conservation()?;
        self.check_runner()?;
        self.check_queues()?;
        self.check_tree()?;
        self.check_init()
    }

    /// free + held == capacity for every resource
    fn check_conservation(&self) -> Result<(), SimError> {
        for (i, resource) in self.resources.iter().enumerate() {
            let held: Units = self
                .table
                .iter()
                .filter_map(|(_, p)| p.holdings.get(ResourceIndex(i)))
                .sum();
            ensure!(
                resource.free() + held == resource.capacity(),
                "{}: free {} + held {} != capacity {}",
                resource.name(),
                resource.free(),
                held,
                resource.capacity()
            );
        }

        for (_, process) in self.table.iter() {
            ensure!(
                process.holdings.iter().all(|(_, units)| units > 0),
                "{} has a zero-unit holding",
                process.name
            );
        }
        Ok(())
    }

    /// At most one RUNNING; exactly one if anything is not BLOCKED
    fn check_runner(&self) -> Result<(), SimError> {
        let runners: Vec<_> = self
            .table
            .iter()
            .filter(|(_, p)| p.status == ProcessStatus::Running)
            .map(|(h, _)| h)
            .collect();
        ensure!(runners.len() <= 1, "{} processes are RUNNING", runners.len());

        let any_unblocked = self
            .table
            .iter()
            .any(|(_, p)| p.status != ProcessStatus::Blocked);
        if any_unblocked {
            ensure!(runners.len() == 1, "no process is RUNNING");
            ensure!(
                self.scheduler.running() == runners.first().copied(),
                "running reference does not match the RUNNING process"
            );
        }
        Ok(())
    }

    /// Every process sits in exactly one queue matching its tag
    fn check_queues(&self) -> Result<(), SimError> {
        let ready = self.scheduler.ready();

        for (handle, process) in self.table.iter() {
            let waits: usize = self
                .resources
                .iter()
                .map(|r| r.waiters().filter(|w| w.process == handle).count())
                .sum();
            let readies = ready.occurrences(handle);

            match process.queue {
                QueueTag::Ready(priority) => {
                    ensure!(
                        process.status != ProcessStatus::Blocked,
                        "{} is BLOCKED but tagged ready",
                        process.name
                    );
                    ensure!(
                        priority == process.priority,
                        "{} is queued at the wrong level",
                        process.name
                    );
                    ensure!(
                        readies == 1 && waits == 0,
                        "{} appears {} time(s) in ready lists and {} in wait queues",
                        process.name,
                        readies,
                        waits
                    );
                    ensure!(
                        ready.level(priority).any(|h| h == handle),
                        "{} missing from its ready level",
                        process.name
                    );
                }
                QueueTag::Blocked { resource, units } => {
                    ensure!(
                        process.status == ProcessStatus::Blocked,
                        "{} waits on a resource but is not BLOCKED",
                        process.name
                    );
                    ensure!(
                        readies == 0 && waits == 1,
                        "{} appears {} time(s) in ready lists and {} in wait queues",
                        process.name,
                        readies,
                        waits
                    );
                    let queued = self.resources[resource.get()]
                        .waiters()
                        .find(|w| w.process == handle)
                        .map(|w| w.units);
                    ensure!(
                        queued == Some(units),
                        "{} pending request disagrees with its wait queue entry",
                        process.name
                    );
                }
                QueueTag::Unqueued => {
                    return Err(SimError::InvariantViolation(format!(
                        "{} is in no queue",
                        process.name
                    )));
                }
            }
        }

        let queued = ready.len()
            + self
                .resources
                .iter()
                .map(|r| r.waiting())
                .sum::<usize>();
        ensure!(
            queued == self.table.len(),
            "{} queue entries for {} processes",
            queued,
            self.table.len()
        );
        Ok(())
    }

    /// Parent and child links agree and reach only live processes
    fn check_tree(&self) -> Result<(), SimError> {
        for (handle, process) in self.table.iter() {
            if let Some(parent) = process.parent {
                let parent = self.table.get(parent);
                ensure!(
                    parent.is_some_and(|p| p.children.contains(&handle)),
                    "{} is not listed by its parent",
                    process.name
                );
            }
            for child in &process.children {
                ensure!(
                    self.table.get(*child).is_some_and(|c| c.parent == Some(handle)),
                    "{} lists a child that does not point back",
                    process.name
                );
            }
        }
        Ok(())
    }

    /// Exactly one INIT process, named init, holding nothing
    fn check_init(&self) -> Result<(), SimError> {
        let inits: Vec<_> = self
            .table
            .iter()
            .filter(|(_, p)| p.priority == Priority::Init)
            .collect();
        ensure!(inits.len() == 1, "{} INIT processes", inits.len());

        let (_, init) = inits[0];
        ensure!(init.name.is_init(), "INIT process is named {}", init.name);
        ensure!(init.holdings.is_empty(), "init holds resources");
        ensure!(init.parent.is_none(), "init has a parent");
        Ok(())
    }
}
