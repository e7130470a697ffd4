/*!
 * Memory Module
 * Page-granular pool allocation
 */

pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use manager::PageAllocator;
pub use traits::*;
pub use types::*;
