/*!
 * Text Rendering
 * Memory map grid and outcome messages
 */

use crate::core::limits::MAP_COLUMN_WIDTH;
use crate::core::types::Pages;
use crate::memory::{AllocError, FreeError};

/// Lay out per-page labels as rows of `width` right-aligned columns
///
/// Labels wider than a column are printed in full and push the row wider.
pub fn format_map(labels: &[&str], width: usize) -> String {
    let mut out = String::new();
    for row in labels.chunks(width.max(1)) {
        for label in row {
            out.push_str(&format!("{:>w$}", label, w = MAP_COLUMN_WIDTH));
        }
        out.push('\n');
    }
    out
}

pub fn added(name: &str, pages: Pages) -> String {
    format!("Program {} added successfully, {} page(s) used.", name, pages)
}

pub fn add_failed(name: &str, err: &AllocError) -> String {
    match err {
        AllocError::AlreadyRunning(_) => format!("Error, Program {} is already running.", name),
        AllocError::OutOfMemory { .. } => format!("Error, not enough memory for Program {}", name),
        AllocError::InvalidSize(_) => invalid_size(name),
        AllocError::InvalidName(_) => "Error, invalid program name".to_string(),
    }
}

pub fn invalid_size(name: &str) -> String {
    format!("Error, invalid size for Program {}", name)
}

pub fn killed(name: &str, pages: Pages) -> String {
    format!(
        "Program {} successfully killed, {} page(s) reclaimed.",
        name, pages
    )
}

pub fn kill_failed(name: &str, err: &FreeError) -> String {
    match err {
        FreeError::NotFound(_) => format!("Program {} could not be found in memory", name),
    }
}

pub fn fragments(count: usize) -> String {
    format!("There are {} fragment(s).", count)
}
