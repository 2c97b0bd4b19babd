//! Infrastructure layer - external I/O adapters
//!
//! This module contains all code that talks to the releases API:
//! - Request building (auth, timeout, accept headers)
//! - Release operations (get/create/edit/delete)
//! - Asset operations (upload/edit/delete)
//! - Release lookup by id or tag

pub mod api_client;
mod assets;
mod lookup;
mod releases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use api_client::ApiClient;
