/*!
 * Memory Module
 * Paging and segmentation allocation engine
 */

pub mod config;
pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use config::EngineConfig;
pub use manager::MemoryManager;
pub use traits::*;
pub use types::*;
