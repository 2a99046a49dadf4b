/*!
 * Cascading Destroy Tests
 * Subtree removal, resource return and waiter cleanup
 */

use pr_manager::{Pid, Priority, ProcessManager, ProcessStatus};
use pretty_assertions::assert_eq;

/// init -> p -> (c1 -> g, c2), all USER so p keeps running while it creates
fn family() -> ProcessManager {
    let mut pm = ProcessManager::new();
    pm.create_process("p", Priority::User).unwrap();
    pm.create_process("c1", Priority::User).unwrap();
    pm.create_process("c2", Priority::User).unwrap();
    // Rotate to c1 so it can create g
    pm.time_out().unwrap();
    assert_eq!(pm.running().map(Pid::as_str), Some("c1"));
    pm.create_process("g", Priority::User).unwrap();
    pm
}

#[test]
fn test_destroy_removes_whole_subtree() {
    let mut pm = family();

    assert_eq!(pm.destroy_process("p").unwrap().as_str(), "init");
    assert_eq!(pm.process_count(), 1);
    for id in ["p", "c1", "c2", "g"] {
        assert!(pm.query_process(id).is_err(), "{id} survived");
    }
    assert!(pm.query_process("init").unwrap().children.is_empty());
    pm.check_invariants().unwrap();
}

#[test]
fn test_destroy_leaf_keeps_siblings() {
    let mut pm = family();

    pm.destroy_process("c1").unwrap();
    assert!(pm.query_process("g").is_err());
    assert_eq!(pm.query_process("p").unwrap().children, vec![Pid::from("c2")]);
    pm.check_invariants().unwrap();
}

#[test]
fn test_destroy_returns_units_to_waiters() {
    let mut pm = ProcessManager::new();
    pm.create_process("holder", Priority::User).unwrap();
    pm.request_resource("R2", 2).unwrap();

    pm.create_process("w1", Priority::System).unwrap();
    pm.request_resource("R2", 1).unwrap();
    // w1 blocked, so holder runs again and creates w2
    pm.create_process("w2", Priority::System).unwrap();
    assert_eq!(pm.request_resource("R2", 2).unwrap().as_str(), "holder");
    assert_eq!(pm.query_resource("R2").unwrap().waiting, 2);

    // w1 and w2 are holder's children, so only init survives
    assert_eq!(pm.destroy_process("holder").unwrap().as_str(), "init");
    let r2 = pm.query_resource("R2").unwrap();
    assert_eq!((r2.free, r2.waiting), (2, 0));
    pm.check_invariants().unwrap();
}

#[test]
fn test_destroy_takes_blocked_descendant_along() {
    let mut pm = ProcessManager::new();
    pm.create_process("a", Priority::User).unwrap();
    pm.request_resource("R1", 1).unwrap();
    pm.create_process("b", Priority::User).unwrap();
    pm.time_out().unwrap();
    pm.request_resource("R1", 1).unwrap();
    // b blocked on R1; a running again
    assert_eq!(pm.running().map(Pid::as_str), Some("a"));
    pm.create_process("s", Priority::System).unwrap();

    // s destroys a; b and s are both a's children and go with it
    assert_eq!(pm.destroy_process("a").unwrap().as_str(), "init");
    let r1 = pm.query_resource("R1").unwrap();
    assert_eq!((r1.free, r1.waiting), (1, 0));
    assert_eq!(pm.process_count(), 1);
    pm.check_invariants().unwrap();
}

#[test]
fn test_destroy_blocked_waiter_leaves_queue() {
    let mut pm = ProcessManager::new();
    pm.create_process("a", Priority::User).unwrap();
    pm.request_resource("R3", 3).unwrap();
    pm.create_process("w", Priority::System).unwrap();
    assert_eq!(pm.request_resource("R3", 1).unwrap().as_str(), "a");
    assert_eq!(pm.query_process("w").unwrap().status, ProcessStatus::Blocked);

    assert_eq!(pm.destroy_process("w").unwrap().as_str(), "a");
    assert_eq!(pm.query_resource("R3").unwrap().waiting, 0);
    assert_eq!(pm.query_resource("R3").unwrap().free, 0);
    pm.check_invariants().unwrap();
}

#[test]
fn test_destroying_running_process_reschedules() {
    let mut pm = ProcessManager::new();
    pm.create_process("a", Priority::User).unwrap();
    pm.create_process("b", Priority::User).unwrap();

    assert_eq!(pm.destroy_process("a").unwrap().as_str(), "init");
    assert_eq!(pm.query_process("init").unwrap().status, ProcessStatus::Running);
}

#[test]
fn test_destroyed_waiter_keeps_its_place_while_releasing() {
    let mut pm = ProcessManager::new();
    pm.create_process("o", Priority::User).unwrap();
    pm.request_resource("R3", 2).unwrap();

    // d holds 1 unit of R3 and waits for 2 more
    pm.create_process("d", Priority::System).unwrap();
    pm.request_resource("R3", 1).unwrap();
    assert_eq!(pm.request_resource("R3", 2).unwrap().as_str(), "o");

    // e queues behind d for a single unit
    pm.create_process("e", Priority::System).unwrap();
    assert_eq!(pm.request_resource("R3", 1).unwrap().as_str(), "o");
    let r3 = pm.query_resource("R3").unwrap();
    assert_eq!((r3.free, r3.waiting), (0, 2));

    // d's unit comes back while d still heads the queue, so e cannot jump it
    assert_eq!(pm.destroy_process("d").unwrap().as_str(), "o");
    let r3 = pm.query_resource("R3").unwrap();
    assert_eq!((r3.free, r3.waiting), (1, 1));
    assert_eq!(pm.query_process("e").unwrap().status, ProcessStatus::Blocked);
    pm.check_invariants().unwrap();
}
