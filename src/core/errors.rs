/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export allocator errors from memory module
pub use crate::memory::{AllocError, FreeError, InvariantViolation};

/// Configuration errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Pool capacity must be at least one page")]
    #[diagnostic(
        code(config::zero_capacity),
        help("Set PAGEMEM_CAPACITY_PAGES to a positive page count.")
    )]
    ZeroCapacity,

    #[error("Units per page must be at least one")]
    #[diagnostic(
        code(config::zero_units_per_page),
        help("Set PAGEMEM_UNITS_PER_PAGE to a positive unit count.")
    )]
    ZeroUnitsPerPage,

    #[error("Memory map width must be at least one column")]
    #[diagnostic(
        code(config::zero_map_width),
        help("Set PAGEMEM_MAP_WIDTH to a positive column count.")
    )]
    ZeroMapWidth,

    #[error("Invalid value {value:?} for {var}")]
    #[diagnostic(
        code(config::invalid_env),
        help("The variable must hold a non-negative integer.")
    )]
    InvalidEnv { var: String, value: String },
}

/// Unified error type for the binary entry point
#[derive(Error, Debug, Diagnostic)]
pub enum PagememError {
    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code(pagemem::io_error),
        help("Reading commands or writing output failed. Check the terminal or pipe.")
    )]
    Io(#[from] std::io::Error),
}
