//! Services layer - orchestration logic
//!
//! This module coordinates between domain logic and infrastructure.
//! Services drive multi-step protocols over the `ApiClient`.

pub mod asset_service;

// Re-export commonly used types
pub use asset_service::AssetService;
