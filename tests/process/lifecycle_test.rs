/*!
 * Process Lifecycle Tests
 * Creation, time-out and identity rules through the public API
 */

use pr_manager::{ManagerError, Pid, Priority, ProcessManager, ProcessStatus};
use pretty_assertions::assert_eq;

fn running(pm: &ProcessManager) -> String {
    pm.running().map(Pid::to_string).unwrap_or_default()
}

#[test]
fn test_create_preempts_lower_priority() {
    let mut pm = ProcessManager::new();

    assert_eq!(pm.create_process("u", Priority::User).unwrap().as_str(), "u");
    assert_eq!(pm.query_process("init").unwrap().status, ProcessStatus::Ready);

    assert_eq!(pm.create_process("s", Priority::System).unwrap().as_str(), "s");
    assert_eq!(pm.query_process("u").unwrap().status, ProcessStatus::Ready);
    assert_eq!(running(&pm), "s");
    pm.check_invariants().unwrap();
}

#[test]
fn test_create_equal_priority_keeps_runner() {
    let mut pm = ProcessManager::new();
    pm.create_process("a", Priority::User).unwrap();

    assert_eq!(pm.create_process("b", Priority::User).unwrap().as_str(), "a");
    assert_eq!(pm.query_process("b").unwrap().status, ProcessStatus::Ready);
    assert_eq!(pm.query_process("b").unwrap().parent, Some(Pid::from("a")));
}

#[test]
fn test_identity_is_case_insensitive() {
    let mut pm = ProcessManager::new();
    pm.create_process("Worker", Priority::User).unwrap();

    assert!(matches!(
        pm.create_process("WORKER", Priority::User),
        Err(ManagerError::DuplicateProcess(_))
    ));
    assert_eq!(pm.query_process("worker").unwrap().id.as_str(), "Worker");
}

#[test]
fn test_priority_range() {
    assert_eq!(Priority::try_from(0i64), Ok(Priority::Init));
    assert_eq!(Priority::try_from(2i64), Ok(Priority::System));
    assert_eq!(Priority::try_from(3i64), Err(ManagerError::InvalidPriority(3)));
    assert_eq!(Priority::try_from(-1i64), Err(ManagerError::InvalidPriority(-1)));
}

#[test]
fn test_time_out_only_rotates_within_level() {
    let mut pm = ProcessManager::new();
    pm.create_process("a", Priority::User).unwrap();
    pm.create_process("b", Priority::User).unwrap();
    pm.create_process("c", Priority::User).unwrap();

    let order: Vec<String> = (0..4).map(|_| pm.time_out().unwrap().to_string()).collect();
    assert_eq!(order, vec!["b", "c", "a", "b"]);
    assert_eq!(pm.scheduler_stats().time_outs, 4);
}

#[test]
fn test_system_time_out_never_yields_to_user() {
    let mut pm = ProcessManager::new();
    pm.create_process("u", Priority::User).unwrap();
    pm.create_process("s", Priority::System).unwrap();

    assert_eq!(pm.time_out().unwrap().as_str(), "s");
    assert_eq!(pm.query_process("u").unwrap().status, ProcessStatus::Ready);
}

#[test]
fn test_list_processes_in_creation_order() {
    let mut pm = ProcessManager::new();
    pm.create_process("b", Priority::User).unwrap();
    pm.create_process("a", Priority::System).unwrap();
    pm.destroy_process("b").unwrap();
    pm.create_process("c", Priority::User).unwrap();

    let ids: Vec<String> = pm.list_processes().into_iter().map(|p| p.id.to_string()).collect();
    assert_eq!(ids, vec!["init", "c"]);
}

#[test]
fn test_errors_do_not_invoke_scheduler() {
    let mut pm = ProcessManager::new();
    pm.create_process("a", Priority::User).unwrap();
    let before = pm.scheduler_stats();

    assert!(pm.create_process("a", Priority::User).is_err());
    assert!(pm.destroy_process("ghost").is_err());
    assert!(pm.request_resource("R1", 9).is_err());
    assert!(pm.release_resource("R1", 1).is_err());

    assert_eq!(pm.scheduler_stats(), before);
    pm.check_invariants().unwrap();
}

#[test]
fn test_builder_resource_count() {
    let pm = ProcessManager::builder().with_resource_count(6).build();
    let last = pm.list_resources().pop().unwrap();
    assert_eq!(last.id.as_str(), "R6");
    assert_eq!(last.capacity, 6);
}
