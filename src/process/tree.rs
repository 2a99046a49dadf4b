/*!
 * Process Tree
 * Creation hierarchy and cascading destroy
 */

use super::manager::ProcessManager;
use super::table::ProcessTable;
use super::types::{ProcessHandle, QueueTag};
use log::debug;

impl ProcessTable {
    /// Handles of the subtree rooted at `root`, children before parents
    ///
    /// Siblings appear in creation order, each one's whole subtree before the
    /// next sibling.
    pub fn post_order(&self, root: ProcessHandle) -> Vec<ProcessHandle> {
        let mut order = Vec::new();
        // (node, children already expanded)
        let mut stack = vec![(root, false)];

        while let Some((handle, expanded)) = stack.pop() {
            let Some(process) = self.get(handle) else {
                continue;
            };
            if expanded {
                order.push(handle);
                continue;
            }
            stack.push((handle, true));
            for child in process.children.iter().rev() {
                stack.push((*child, false));
            }
        }

        order
    }
}

impl ProcessManager {
    /// Record `child` under `parent`; the only place a parent link is formed
    pub(crate) fn link_child(&mut self, parent: ProcessHandle, child: ProcessHandle) {
        self.table[parent].children.push(child);
        self.table[child].parent = Some(parent);
    }

    /// Destroy the subtree rooted at `root`, returning how many processes went
    ///
    /// Descendants go first. Each process returns its units before it leaves
    /// its queue; a wait queue it still heads is not served past it.
    pub(crate) fn destroy_subtree(&mut self, root: ProcessHandle) -> usize {
        let doomed = self.table.post_order(root);
        for handle in &doomed {
            self.dispose(*handle);
        }
        doomed.len()
    }

    fn dispose(&mut self, handle: ProcessHandle) {
        let holdings = std::mem::take(&mut self.table[handle].holdings);
        for (resource, units) in holdings.iter() {
            self.return_units(resource, units, Some(handle));
        }

        match self.table[handle].queue {
            QueueTag::Ready(_) => {
                self.scheduler.unready(&mut self.table, handle);
            }
            QueueTag::Blocked { resource, .. } => {
                self.resources[resource.get()].remove_waiter(handle);
                self.table[handle].queue = QueueTag::Unqueued;
            }
            QueueTag::Unqueued => {}
        }

        if let Some(parent) = self.table[handle].parent {
            if let Some(parent) = self.table.get_mut(parent) {
                parent.children.retain(|c| *c != handle);
            }
        }

        self.scheduler.forget(handle);
        if let Some(process) = self.table.remove(handle) {
            debug!("Process {} destroyed", process.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Priority;

    #[test]
    fn test_post_order_children_first() {
        let mut pm = ProcessManager::new();
        // init -> a -> (b -> d, c)
        pm.create_process("a", Priority::User).unwrap();
        pm.create_process("b", Priority::System).unwrap();
        pm.create_process("d", Priority::System).unwrap();
        pm.destroy_process("d").unwrap();
        pm.create_process("d", Priority::User).unwrap();
        pm.time_out().unwrap();

        let a = pm.table.lookup("a").unwrap();
        let names: Vec<_> = pm
            .table
            .post_order(a)
            .into_iter()
            .map(|h| pm.table[h].name().to_string())
            .collect();
        assert_eq!(names, vec!["d", "b", "a"]);
    }

    #[test]
    fn test_post_order_siblings_in_creation_order() {
        let mut pm = ProcessManager::new();
        pm.create_process("root", Priority::User).unwrap();
        pm.create_process("x", Priority::User).unwrap();
        pm.create_process("y", Priority::User).unwrap();
        pm.create_process("z", Priority::User).unwrap();

        let root = pm.table.lookup("root").unwrap();
        let names: Vec<_> = pm
            .table
            .post_order(root)
            .into_iter()
            .map(|h| pm.table[h].name().to_string())
            .collect();
        assert_eq!(names, vec!["x", "y", "z", "root"]);
    }

    #[test]
    fn test_destroy_detaches_from_parent() {
        let mut pm = ProcessManager::new();
        pm.create_process("p", Priority::User).unwrap();
        pm.create_process("c", Priority::User).unwrap();

        pm.destroy_process("c").unwrap();
        let p = pm.query_process("p").unwrap();
        assert!(p.children.is_empty());
        assert_eq!(pm.process_count(), 2);
    }
}
