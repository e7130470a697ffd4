/*!
 * Page Memory Simulator Library
 * Fixed-pool page allocator with best-fit and worst-fit placement
 */

pub mod config;
pub mod core;
pub mod memory;
pub mod monitoring;
pub mod shell;

// Re-exports
pub use crate::config::PoolConfig;
pub use crate::core::errors::{ConfigError, PagememError};
pub use memory::{
    AllocError, Allocator, BlockInfo, BlockState, FreeError, MemoryInfo, PageAllocator,
    PlacementPolicy, PoolStats,
};
pub use monitoring::init_tracing;
pub use shell::Shell;
