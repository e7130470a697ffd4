/*!
 * Core Types
 * Common types used across the simulator
 */

/// Page count or page-sized quantity
pub type Pages = usize;

/// Requested size in capacity units (e.g. KB)
///
/// Signed so that negative input survives the trip from the shell to the
/// allocator and is rejected there rather than wrapping.
pub type Units = i64;

/// Zero-based page number within the pool
pub type PageIndex = usize;
