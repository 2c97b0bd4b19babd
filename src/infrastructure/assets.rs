//! Asset operations: upload, edit, delete.

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Method;
use std::path::Path;
use tracing::{error, info};

use super::api_client::{decode, log_rejection, ApiClient};
use crate::domain::{Asset, AssetEdit, Outcome, Release, UploadRequest};
use crate::error::ReleaseError;

/// An upload whose local preconditions passed
#[derive(Debug, Clone)]
pub struct PreparedUpload {
    pub release: Release,
    /// Final asset name
    pub name: String,
    /// Asset already holding `name`, if any
    pub existing: Option<Asset>,
}

impl ApiClient {
    /// Check upload preconditions
    ///
    /// The local path must be a regular file and the release must be
    /// fetchable. An asset already holding the name is refused unless the
    /// request allows it, in which case it is reported back.
    pub async fn prepare_upload(
        &self,
        request: &UploadRequest,
    ) -> Result<Outcome<PreparedUpload>, ReleaseError> {
        if !request.path.is_file() {
            error!("File does not exist: {}", request.path.display());
            return Ok(Outcome::precondition(format!(
                "File does not exist: {}",
                request.path.display()
            )));
        }
        let Some(name) = request.asset_name() else {
            error!("Cannot derive an asset name from {}", request.path.display());
            return Ok(Outcome::precondition(format!(
                "Cannot derive an asset name from {}",
                request.path.display()
            )));
        };

        let fetched = self.get_release(&request.selector, false).await?;
        let (release, response) = match fetched {
            Outcome::Succeeded { data, response } => (data, response),
            Outcome::Failed(_) => {
                error!("Release data could not be retrieved, cannot upload.");
                return Ok(Outcome::precondition(format!(
                    "Release with {} could not be retrieved",
                    request.selector
                )));
            }
        };

        let existing = release.asset_named(&name).cloned();
        if let Some(asset) = &existing {
            if !request.allow_existing {
                error!("Asset '{}' already exists, not uploading!", name);
                return Ok(Outcome::precondition(format!(
                    "Asset '{}' already exists (id {}), not uploading",
                    name, asset.id
                )));
            }
        }
        Ok(Outcome::succeeded(
            PreparedUpload {
                release,
                name,
                existing,
            },
            response,
        ))
    }

    /// Upload a local file as a new release asset
    ///
    /// Refuses when an asset with the same name exists, unless the request
    /// allows it.
    pub async fn upload_asset(
        &self,
        request: &UploadRequest,
    ) -> Result<Outcome<Asset>, ReleaseError> {
        let prepared = match self.prepare_upload(request).await? {
            Outcome::Succeeded { data, .. } => data,
            Outcome::Failed(failure) => return Ok(Outcome::Failed(failure)),
        };

        self.upload_file(
            &prepared.release,
            &request.path,
            &prepared.name,
            request.label.as_deref(),
        )
        .await
    }

    /// Single-shot upload of `path` to `release` under `name`
    ///
    /// Streams the file; no precondition checks. Succeeds only on 201.
    pub async fn upload_file(
        &self,
        release: &Release,
        path: &Path,
        name: &str,
        label: Option<&str>,
    ) -> Result<Outcome<Asset>, ReleaseError> {
        let url = release.upload_endpoint(name, label);
        let file = tokio::fs::File::open(path).await?;
        let size = file.metadata().await?.len();

        info!(
            release_id = release.id,
            asset = %name,
            bytes = size,
            "Uploading {}",
            path.display()
        );

        let response = self
            .send(
                self.request(Method::POST, &url)
                    .header(CONTENT_TYPE, "application/octet-stream")
                    .header(CONTENT_LENGTH, size)
                    .body(file),
            )
            .await?;
        if response.status != 201 {
            log_rejection(&response, &format!("Upload of '{}' failed", path.display()));
            return Ok(Outcome::rejected(response));
        }

        let asset: Asset = decode(&response, "uploaded asset")?;
        info!(asset_id = asset.id, asset = %asset.name, "Uploaded asset");
        Ok(Outcome::succeeded(asset, response))
    }

    /// Change an asset's name and/or label
    pub async fn edit_asset(
        &self,
        asset_id: u64,
        edit: &AssetEdit,
    ) -> Result<Outcome<Asset>, ReleaseError> {
        if edit.is_empty() {
            error!("No edit parameters supplied");
            return Ok(Outcome::precondition("No edit parameters supplied"));
        }

        let response = self
            .send(
                self.request(Method::PATCH, &self.asset_url(asset_id))
                    .json(edit),
            )
            .await?;
        if response.status != 200 {
            log_rejection(&response, "Failed to edit asset!");
            return Ok(Outcome::rejected(response));
        }

        let asset = decode(&response, "edited asset")?;
        info!(asset_id, "Edited asset");
        Ok(Outcome::succeeded(asset, response))
    }

    /// Delete an asset
    pub async fn delete_asset(&self, asset_id: u64) -> Result<Outcome<()>, ReleaseError> {
        let response = self
            .send(self.request(Method::DELETE, &self.asset_url(asset_id)))
            .await?;
        if response.status != 204 {
            log_rejection(&response, "Failed to delete asset!");
            return Ok(Outcome::rejected(response));
        }

        info!(asset_id, "Deleted asset");
        Ok(Outcome::succeeded((), response))
    }
}
