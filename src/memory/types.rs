/*!
 * Memory Types
 * Blocks, placement policies, statistics and allocator errors
 */

use crate::core::limits::{
    FREE_LABEL, PRESSURE_CRITICAL_RATIO, PRESSURE_HIGH_RATIO, PRESSURE_MEDIUM_RATIO,
};
use crate::core::types::{PageIndex, Pages, Units};
use crate::core::ProgramName;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Allocation result
pub type AllocResult<T> = Result<T, AllocError>;

/// Deallocation result
pub type FreeResult<T> = Result<T, FreeError>;

/// Allocation errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum AllocError {
    #[error("Program {0} is already running")]
    #[diagnostic(
        code(memory::already_running),
        help("Kill the running program first or choose another name.")
    )]
    AlreadyRunning(String),

    #[error("Out of memory: requested {requested} pages, largest free block {largest_free} pages")]
    #[diagnostic(
        code(memory::out_of_memory),
        help("Kill a program to release pages, or request less memory.")
    )]
    OutOfMemory { requested: Pages, largest_free: Pages },

    #[error("Invalid size: {0} units rounds to fewer than one page")]
    #[diagnostic(code(memory::invalid_size), help("Request a positive size."))]
    InvalidSize(Units),

    #[error("Invalid program name: {0:?}")]
    #[diagnostic(
        code(memory::invalid_name),
        help("Program names must be non-empty and contain no whitespace.")
    )]
    InvalidName(String),
}

/// Deallocation errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum FreeError {
    #[error("Program {0} not found in memory")]
    #[diagnostic(
        code(memory::not_found),
        help("The program may never have been added or was already killed.")
    )]
    NotFound(String),
}

/// Broken pool invariant, reported by consistency checks
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum InvariantViolation {
    #[error("Block sequence is empty")]
    #[diagnostic(code(memory::empty_sequence))]
    EmptySequence,

    #[error("Block sizes sum to {actual} pages, capacity is {expected}")]
    #[diagnostic(code(memory::capacity_mismatch))]
    CapacityMismatch { expected: Pages, actual: Pages },

    #[error("Adjacent free blocks at pages {first} and {second}")]
    #[diagnostic(code(memory::uncoalesced_free))]
    UncoalescedFree { first: PageIndex, second: PageIndex },

    #[error("Program {0} occupies more than one block")]
    #[diagnostic(code(memory::duplicate_name))]
    DuplicateName(String),

    #[error("Zero-sized block at page {0}")]
    #[diagnostic(code(memory::empty_block))]
    EmptyBlock(PageIndex),

    #[error("Broken link at arena slot {0}")]
    #[diagnostic(code(memory::broken_link))]
    BrokenLink(usize),
}

/// Placement policy used to choose among adequate free blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementPolicy {
    /// Smallest adequate free block
    #[default]
    BestFit,
    /// Largest adequate free block
    WorstFit,
}

impl PlacementPolicy {
    /// Select a policy from a startup argument
    ///
    /// An argument beginning with `w` or `W` selects worst-fit; anything
    /// else, including no argument, selects best-fit.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg.and_then(|a| a.chars().next()) {
            Some('w') | Some('W') => PlacementPolicy::WorstFit,
            _ => PlacementPolicy::BestFit,
        }
    }

    /// Human-readable policy name
    pub fn describe(&self) -> &'static str {
        match self {
            PlacementPolicy::BestFit => "best fit",
            PlacementPolicy::WorstFit => "worst fit",
        }
    }
}

impl std::fmt::Display for PlacementPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PlacementPolicy::BestFit => write!(f, "BEST_FIT"),
            PlacementPolicy::WorstFit => write!(f, "WORST_FIT"),
        }
    }
}

/// State of a block of pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "program", rename_all = "snake_case")]
pub enum BlockState {
    Free,
    Occupied(ProgramName),
}

impl BlockState {
    #[inline]
    pub fn is_free(&self) -> bool {
        matches!(self, BlockState::Free)
    }

    /// Name of the occupying program, if any
    #[inline]
    pub fn program(&self) -> Option<&ProgramName> {
        match self {
            BlockState::Free => None,
            BlockState::Occupied(name) => Some(name),
        }
    }

    /// Map label for every page in a block with this state
    pub fn label(&self) -> &str {
        match self {
            BlockState::Free => FREE_LABEL,
            BlockState::Occupied(name) => name.as_str(),
        }
    }
}

/// Maximal run of contiguous pages in one state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub size: Pages,
    pub state: BlockState,
}

impl Block {
    pub fn free(size: Pages) -> Self {
        Self {
            size,
            state: BlockState::Free,
        }
    }

    pub fn is_free(&self) -> bool {
        self.state.is_free()
    }
}

/// Owned snapshot of a block, detached from the allocator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// First page of the block
    pub base: PageIndex,
    pub size: Pages,
    #[serde(flatten)]
    pub state: BlockState,
}

impl BlockInfo {
    pub fn is_free(&self) -> bool {
        self.state.is_free()
    }

    /// One past the last page of the block
    pub fn end(&self) -> PageIndex {
        self.base + self.size
    }
}

/// Pool statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolStats {
    pub policy: PlacementPolicy,
    pub capacity_pages: Pages,
    pub used_pages: Pages,
    pub free_pages: Pages,
    pub largest_free_block: Pages,
    pub fragments: usize,
    pub occupied_blocks: usize,
    pub usage_percentage: f64,
    pub pressure: MemoryPressure,
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    /// Classify a used/total ratio
    pub fn from_usage(used: Pages, total: Pages) -> Self {
        if total == 0 {
            return MemoryPressure::Low;
        }
        let ratio = used as f64 / total as f64;
        if ratio >= PRESSURE_CRITICAL_RATIO {
            MemoryPressure::Critical
        } else if ratio >= PRESSURE_HIGH_RATIO {
            MemoryPressure::High
        } else if ratio >= PRESSURE_MEDIUM_RATIO {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
