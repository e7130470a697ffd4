/*!
 * System Limits and Constants
 *
 * Centralized location for the simulator's default sizing, display
 * geometry and pressure thresholds.
 */

// =============================================================================
// POOL SIZING
// =============================================================================

/// Pages in the simulated pool (32 pages of 4KB = 128KB)
pub const DEFAULT_CAPACITY_PAGES: usize = 32;

/// Capacity units per page (4KB pages)
pub const DEFAULT_UNITS_PER_PAGE: u64 = 4;

/// Label printed after capacity-unit prompts
pub const DEFAULT_UNIT_LABEL: &str = "KB";

// =============================================================================
// MEMORY MAP DISPLAY
// =============================================================================

/// Labels per row when printing the memory map
pub const DEFAULT_MAP_WIDTH: usize = 8;

/// Minimum column width for each map label (right-aligned)
pub const MAP_COLUMN_WIDTH: usize = 5;

/// Label used for free pages in the memory map
pub const FREE_LABEL: &str = "Free";

// =============================================================================
// MEMORY PRESSURE THRESHOLDS
// =============================================================================

/// Usage ratio at which pressure is reported as MEDIUM
pub const PRESSURE_MEDIUM_RATIO: f64 = 0.60;

/// Usage ratio at which pressure is reported as HIGH
pub const PRESSURE_HIGH_RATIO: f64 = 0.80;

/// Usage ratio at which pressure is reported as CRITICAL
pub const PRESSURE_CRITICAL_RATIO: f64 = 0.95;
