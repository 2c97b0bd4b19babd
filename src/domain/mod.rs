//! Domain layer - pure business logic
//!
//! This module contains business logic with no external I/O.
//! Types and functions here can be unit tested without mocking.

pub mod outcome;
pub mod release;
pub mod replacement;
pub mod retention;

// Re-export commonly used types
pub use outcome::{ApiResponse, Diagnostic, Failure, Outcome, RecoveryNotice};
pub use release::{
    Asset, AssetEdit, CreateRelease, Release, ReleaseFields, ReleaseSelector, UploadRequest,
};
pub use replacement::ReplaceState;
