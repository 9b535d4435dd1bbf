/*!
 * Engine Configuration
 * Construction parameters with defaults, validation, and environment overrides
 */

use super::types::{MemoryError, MemoryResult, Mode};
use crate::core::limits::{DEFAULT_PAGE_SIZE, DEFAULT_TOTAL_MEMORY, ENV_MODE, ENV_PAGE_SIZE, ENV_TOTAL_MEMORY};
use crate::core::types::Size;
use log::warn;
use serde::{Deserialize, Serialize};

/// Allocation engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Units in the address space
    pub total_memory: Size,
    /// Units per page/frame
    pub page_size: Size,
    /// Mode entered at construction
    pub initial_mode: Mode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            total_memory: DEFAULT_TOTAL_MEMORY,
            page_size: DEFAULT_PAGE_SIZE,
            initial_mode: Mode::Paging,
        }
    }
}

impl EngineConfig {
    pub fn new(total_memory: Size, page_size: Size) -> Self {
        Self {
            total_memory,
            page_size,
            ..Self::default()
        }
    }

    pub fn with_total_memory(mut self, total_memory: Size) -> Self {
        self.total_memory = total_memory;
        self
    }

    pub fn with_page_size(mut self, page_size: Size) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Number of whole frames; trailing units beyond the last frame are unaddressable in paging mode
    pub fn total_pages(&self) -> usize {
        self.total_memory / self.page_size
    }

    pub fn validate(&self) -> MemoryResult<()> {
        if self.total_memory == 0 {
            return Err(MemoryError::InvalidConfig(
                "total memory must be positive".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(MemoryError::InvalidConfig(
                "page size must be positive".to_string(),
            ));
        }
        if self.page_size > self.total_memory {
            return Err(MemoryError::InvalidConfig(format!(
                "page size {} exceeds total memory {}",
                self.page_size, self.total_memory
            )));
        }
        Ok(())
    }

    /// Defaults overridden by MEMSIM_TOTAL_MEMORY, MEMSIM_PAGE_SIZE and MEMSIM_MODE
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_TOTAL_MEMORY) {
            match raw.trim().parse::<Size>() {
                Ok(total) => config.total_memory = total,
                Err(_) => warn!("Ignoring {}={:?}: not a size", ENV_TOTAL_MEMORY, raw),
            }
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            match raw.trim().parse::<Size>() {
                Ok(page) => config.page_size = page,
                Err(_) => warn!("Ignoring {}={:?}: not a size", ENV_PAGE_SIZE, raw),
            }
        }
        if let Some(raw) = lookup(ENV_MODE) {
            match raw.parse::<Mode>() {
                Ok(mode) => config.initial_mode = mode,
                Err(e) => warn!("Ignoring {}: {}", ENV_MODE, e),
            }
        }

        config
    }
}
