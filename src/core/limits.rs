/*!
 * Simulator Limits and Constants
 *
 * Defaults used when no explicit configuration is supplied.
 */

// =============================================================================
// ADDRESS SPACE
// =============================================================================

/// Default size of the simulated address space (units)
pub const DEFAULT_TOTAL_MEMORY: usize = 64;

/// Default page/frame size (units)
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// First PID handed out after construction or a mode switch
pub const FIRST_PID: u32 = 1;

// =============================================================================
// MEMORY PRESSURE (percent of total in use)
// =============================================================================

pub const PRESSURE_MEDIUM_PCT: f64 = 60.0;
pub const PRESSURE_HIGH_PCT: f64 = 80.0;
pub const PRESSURE_CRITICAL_PCT: f64 = 95.0;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Overrides the total memory size
pub const ENV_TOTAL_MEMORY: &str = "MEMSIM_TOTAL_MEMORY";

/// Overrides the page size
pub const ENV_PAGE_SIZE: &str = "MEMSIM_PAGE_SIZE";

/// Selects the initial mode (`paging` or `segmentation`)
pub const ENV_MODE: &str = "MEMSIM_MODE";

/// Enables JSON trace output when set to `1` or `true`
pub const ENV_TRACE_JSON: &str = "MEMSIM_TRACE_JSON";
