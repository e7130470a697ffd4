/*!
 * Program Names
 * Inline-optimized identifiers for programs occupying memory
 */

use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::fmt;

/// Name of a program resident in the pool
///
/// Short names (≤23 bytes) are stored inline without heap allocation, which
/// covers virtually every name typed at the shell.
///
/// A valid name is non-empty and contains no whitespace. Construct through
/// [`ProgramName::parse`] so the rule is enforced in one place.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct ProgramName {
    inner: SmartString,
}

impl ProgramName {
    /// Validate and wrap a raw name
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return None;
        }
        Some(Self {
            inner: SmartString::from(raw),
        })
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Always false for a parsed name; present for API symmetry with `str`
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Check if the name is stored inline (no heap allocation)
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.inner.is_inline()
    }
}

impl AsRef<str> for ProgramName {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::borrow::Borrow<str> for ProgramName {
    #[inline(always)]
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for ProgramName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ProgramName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for ProgramName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
