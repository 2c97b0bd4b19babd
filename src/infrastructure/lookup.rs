//! Release lookup
//!
//! Both selector kinds converge on a numeric release id before any
//! mutating call. An id is used as-is; a tag costs one round trip.

use super::api_client::ApiClient;
use crate::domain::{Release, ReleaseSelector};
use crate::error::ReleaseError;

impl ApiClient {
    /// Release id for `selector`, or `None` when no such release exists
    pub async fn resolve(&self, selector: &ReleaseSelector) -> Result<Option<u64>, ReleaseError> {
        match selector {
            ReleaseSelector::Id(id) => Ok(Some(*id)),
            ReleaseSelector::Tag(_) => Ok(self.fetch(selector).await?.map(|r| r.id)),
        }
    }

    /// Full release data; always fetched, whatever the selector kind
    pub async fn fetch(&self, selector: &ReleaseSelector) -> Result<Option<Release>, ReleaseError> {
        Ok(self.get_release(selector, false).await?.into_data())
    }
}
