//! Release operations: get, create, edit, delete.

use reqwest::Method;
use tracing::{error, info};

use super::api_client::{decode, log_rejection, ApiClient};
use crate::domain::{CreateRelease, Outcome, Release, ReleaseFields, ReleaseSelector};
use crate::error::ReleaseError;

impl ApiClient {
    /// Fetch a release by id or tag
    ///
    /// Fails on any status other than 200. With `silent` the failure is not
    /// logged (used for existence checks).
    pub async fn get_release(
        &self,
        selector: &ReleaseSelector,
        silent: bool,
    ) -> Result<Outcome<Release>, ReleaseError> {
        let url = match selector {
            ReleaseSelector::Id(id) => self.release_url(*id),
            ReleaseSelector::Tag(tag) => self.tag_url(tag),
        };

        let response = self.send(self.request(Method::GET, &url)).await?;
        if response.status != 200 {
            if !silent {
                log_rejection(&response, "Failed to fetch release!");
            }
            return Ok(Outcome::rejected(response));
        }

        let release = decode(&response, "release")?;
        Ok(Outcome::succeeded(release, response))
    }

    /// Create a new release
    ///
    /// Unless creating a draft, refuses (without calling the create
    /// endpoint) when a release with the same tag already exists.
    pub async fn create_release(
        &self,
        params: &CreateRelease,
    ) -> Result<Outcome<Release>, ReleaseError> {
        if !params.draft {
            let existing = ReleaseSelector::Tag(params.tag.clone());
            if self.get_release(&existing, true).await?.is_success() {
                error!("Release tag already exists: {}", params.tag);
                return Ok(Outcome::precondition(format!(
                    "Release tag already exists: {}",
                    params.tag
                )));
            }
        }

        let response = self
            .send(
                self.request(Method::POST, &self.releases_url())
                    .json(&params.fields()),
            )
            .await?;
        if response.status != 201 {
            log_rejection(&response, "Failed to create release!");
            return Ok(Outcome::rejected(response));
        }

        let release: Release = decode(&response, "created release")?;
        info!(release_id = release.id, tag = %release.tag_name, "Created release");
        Ok(Outcome::succeeded(release, response))
    }

    /// Edit an existing release; only the set fields are changed
    pub async fn edit_release(
        &self,
        release_id: u64,
        fields: &ReleaseFields,
    ) -> Result<Outcome<Release>, ReleaseError> {
        if fields.is_empty() {
            error!("No edit parameters supplied!");
            return Ok(Outcome::precondition("No edit parameters supplied"));
        }

        let response = self
            .send(
                self.request(Method::PATCH, &self.release_url(release_id))
                    .json(fields),
            )
            .await?;
        if response.status != 200 {
            log_rejection(&response, "Failed to edit release!");
            return Ok(Outcome::rejected(response));
        }

        let release = decode(&response, "edited release")?;
        info!(release_id, "Edited release");
        Ok(Outcome::succeeded(release, response))
    }

    /// Edit the release currently carrying `tag`
    pub async fn edit_release_by_tag(
        &self,
        tag: &str,
        fields: &ReleaseFields,
    ) -> Result<Outcome<Release>, ReleaseError> {
        if fields.is_empty() {
            error!("No edit parameters supplied!");
            return Ok(Outcome::precondition("No edit parameters supplied"));
        }
        let Some(release_id) = self.resolve(&ReleaseSelector::Tag(tag.to_string())).await? else {
            error!("Release not found, cannot edit!");
            return Ok(Outcome::precondition(format!(
                "Release with tag '{}' not found, cannot edit",
                tag
            )));
        };
        self.edit_release(release_id, fields).await
    }

    /// Delete a release
    pub async fn delete_release(&self, release_id: u64) -> Result<Outcome<()>, ReleaseError> {
        let response = self
            .send(self.request(Method::DELETE, &self.release_url(release_id)))
            .await?;
        if response.status != 204 {
            log_rejection(&response, "Failed to delete release!");
            return Ok(Outcome::rejected(response));
        }

        info!(release_id, "Deleted release");
        Ok(Outcome::succeeded((), response))
    }

    /// Delete the release currently carrying `tag`
    pub async fn delete_release_by_tag(&self, tag: &str) -> Result<Outcome<()>, ReleaseError> {
        let Some(release_id) = self.resolve(&ReleaseSelector::Tag(tag.to_string())).await? else {
            error!("Release not found; nothing deleted!");
            return Ok(Outcome::precondition(format!(
                "Release with tag '{}' not found, nothing deleted",
                tag
            )));
        };
        self.delete_release(release_id).await
    }
}
