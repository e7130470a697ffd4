/*!
 * Pool Configuration
 *
 * Runtime configuration for pool sizing, placement policy and map display
 */

use crate::core::errors::ConfigError;
use crate::core::limits::{
    DEFAULT_CAPACITY_PAGES, DEFAULT_MAP_WIDTH, DEFAULT_UNITS_PER_PAGE, DEFAULT_UNIT_LABEL,
};
use crate::core::types::Pages;
use crate::memory::PlacementPolicy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Environment variable overriding the pool capacity in pages
pub const ENV_CAPACITY_PAGES: &str = "PAGEMEM_CAPACITY_PAGES";
/// Environment variable overriding units per page
pub const ENV_UNITS_PER_PAGE: &str = "PAGEMEM_UNITS_PER_PAGE";
/// Environment variable overriding map labels per row
pub const ENV_MAP_WIDTH: &str = "PAGEMEM_MAP_WIDTH";
/// Environment variable overriding the unit label shown in prompts
pub const ENV_UNIT_LABEL: &str = "PAGEMEM_UNIT_LABEL";

/// Pool and display configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    pub policy: PlacementPolicy,
    pub capacity_pages: Pages,
    pub units_per_page: u64,
    /// Unit name shown in size prompts
    pub unit_label: String,
    /// Map labels printed per row
    pub map_width: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            policy: PlacementPolicy::BestFit,
            capacity_pages: DEFAULT_CAPACITY_PAGES,
            units_per_page: DEFAULT_UNITS_PER_PAGE,
            unit_label: DEFAULT_UNIT_LABEL.to_string(),
            map_width: DEFAULT_MAP_WIDTH,
        }
    }
}

impl PoolConfig {
    /// Defaults overridden by `PAGEMEM_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(pages) = parse_var(&lookup, ENV_CAPACITY_PAGES)? {
            config.capacity_pages = pages;
        }
        if let Some(units) = parse_var(&lookup, ENV_UNITS_PER_PAGE)? {
            config.units_per_page = units;
        }
        if let Some(width) = parse_var(&lookup, ENV_MAP_WIDTH)? {
            config.map_width = width;
        }
        if let Some(label) = lookup(ENV_UNIT_LABEL) {
            config.unit_label = label;
        }
        config.validate()?;
        Ok(config)
    }

    /// Apply the startup policy argument
    pub fn with_policy_arg(mut self, arg: Option<&str>) -> Self {
        self.policy = PlacementPolicy::from_arg(arg);
        self
    }

    pub fn with_policy(mut self, policy: PlacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_capacity(mut self, capacity_pages: Pages) -> Self {
        self.capacity_pages = capacity_pages;
        self
    }

    pub fn with_units_per_page(mut self, units_per_page: u64) -> Self {
        self.units_per_page = units_per_page;
        self
    }

    pub fn with_map_width(mut self, map_width: usize) -> Self {
        self.map_width = map_width;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity_pages == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.units_per_page == 0 {
            return Err(ConfigError::ZeroUnitsPerPage);
        }
        if self.map_width == 0 {
            return Err(ConfigError::ZeroMapWidth);
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                var: var.to_string(),
                value: raw,
            }),
    }
}
