/*!
 * System Limits and Constants
 *
 * Centralized location for the fixed shape of a simulation: the resource
 * set created at initialization, the protected init process and the
 * priority levels of the ready list.
 */

// =============================================================================
// RESOURCES
// =============================================================================

/// Resources created by `initialize()` unless configured otherwise.
/// Resource `i` (1-based) is named `R{i}` and has capacity `i`.
pub const DEFAULT_RESOURCE_COUNT: usize = 4;

/// Upper bound accepted for a configured resource count
pub const MAX_RESOURCE_COUNT: usize = 16;

/// Prefix of generated resource identities
pub const RESOURCE_PREFIX: &str = "R";

// =============================================================================
// PROCESSES
// =============================================================================

/// Identity of the process created at initialization.
/// It cannot be destroyed and never requests or releases resources.
pub const INIT_PROCESS: &str = "init";

/// Number of ready-list levels (INIT, USER, SYSTEM)
pub const PRIORITY_LEVELS: usize = 3;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Overrides the resource count
pub const ENV_RESOURCES: &str = "PRM_RESOURCES";

/// Switches log output to JSON when set to `1` or `true`
pub const ENV_TRACE_JSON: &str = "PRM_TRACE_JSON";
