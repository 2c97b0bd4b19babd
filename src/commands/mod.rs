//! Command handlers
//!
//! Each handler runs one CLI command against an `ApiClient` and returns
//! whether it succeeded. Ids that scripts capture go to stdout; everything
//! else goes through `ui` and `tracing`.

pub mod asset;
pub mod release;
