//! Asset service - multi-step asset workflows
//!
//! - Safe replacement of an existing asset (upload, delete old, rename)
//! - Retention: pruning the oldest assets beyond a cap
//! - Sequential multi-file uploads
//!
//! Nothing here retries. Past the point where the new file is uploaded,
//! failures are reported with a manual-recovery diagnostic instead.

use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::domain::replacement::temp_asset_name;
use crate::domain::retention::select_oldest;
use crate::domain::{
    Asset, AssetEdit, Diagnostic, Failure, Outcome, RecoveryNotice, ReleaseSelector,
    ReplaceState, UploadRequest,
};
use crate::error::ReleaseError;
use crate::infrastructure::ApiClient;

/// Terminal state and result of an asset replacement
#[derive(Debug)]
pub struct Replacement {
    pub state: ReplaceState,
    pub outcome: Outcome<Asset>,
}

impl Replacement {
    fn new(state: ReplaceState, outcome: Outcome<Asset>) -> Self {
        Self { state, outcome }
    }
}

/// Accumulated per-item results of a best-effort batch
#[derive(Debug)]
pub struct BatchReport<T> {
    pub succeeded: Vec<T>,
    /// Item description and why it failed
    pub failed: Vec<(String, Failure)>,
}

impl<T> BatchReport<T> {
    fn new() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// True only if every item succeeded
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Service for asset workflows spanning several API calls
pub struct AssetService<'a> {
    client: &'a ApiClient,
}

impl<'a> AssetService<'a> {
    /// Create a new asset service
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Upload `request`, replacing any asset that already has its name
    ///
    /// The new file is uploaded under a temporary name first, so the old
    /// asset is only deleted once a complete copy of the new one exists.
    pub async fn replace_asset(
        &self,
        request: &UploadRequest,
    ) -> Result<Replacement, ReleaseError> {
        let mut state = ReplaceState::Start;

        let prepared = match self
            .client
            .prepare_upload(&request.clone().allow_existing())
            .await?
        {
            Outcome::Succeeded { data, .. } => data,
            Outcome::Failed(failure) => {
                return Ok(Replacement::new(state, Outcome::Failed(failure)))
            }
        };
        let label = request.label.as_deref();

        state = state.advance(true);
        let Some(old) = prepared.existing else {
            debug!(asset = %prepared.name, "No asset to replace, uploading directly");
            let outcome = self
                .client
                .upload_file(&prepared.release, &request.path, &prepared.name, label)
                .await?;
            let state = if outcome.is_success() {
                ReplaceState::Done
            } else {
                ReplaceState::UploadFailed
            };
            return Ok(Replacement::new(state, outcome));
        };

        let temp_name = temp_asset_name(&prepared.name);
        info!(
            asset = %prepared.name,
            old_asset_id = old.id,
            temp_name = %temp_name,
            "Replacing asset"
        );
        let uploaded = match self
            .client
            .upload_file(&prepared.release, &request.path, &temp_name, label)
            .await
        {
            Ok(outcome) => outcome,
            Err(e @ ReleaseError::Decode { .. }) => {
                // Accepted with 201, so the temp asset exists but its id is unknown
                error!(
                    temp_name = %temp_name,
                    old_asset_id = old.id,
                    "Upload under temporary name may have left asset '{}' behind, \
                     delete it by hand; asset {} ('{}') is untouched",
                    temp_name,
                    old.id,
                    prepared.name
                );
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        state = state.advance(uploaded.is_success());
        debug!(state = state.name(), "Replacement step finished");
        let temp = match uploaded {
            Outcome::Succeeded { data, .. } => data,
            Outcome::Failed(failure) => {
                return Ok(Replacement::new(state, Outcome::Failed(failure)))
            }
        };

        let mut notice = RecoveryNotice {
            state: ReplaceState::DeleteFailed,
            target_name: prepared.name.clone(),
            temp_asset_id: temp.id,
            temp_name: temp.name.clone(),
            old_asset_id: old.id,
            cause: String::new(),
        };

        state = state.advance(true);
        let deleted = match self.client.delete_asset(old.id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                notice.cause = e.to_string();
                report_recovery(&notice);
                return Err(e);
            }
        };
        state = state.advance(deleted.is_success());
        debug!(state = state.name(), "Replacement step finished");
        if let Outcome::Failed(failure) = deleted {
            error!("Uploaded asset will not be renamed!");
            return Ok(recovery(state, notice, failure));
        }

        state = state.advance(true);
        notice.state = ReplaceState::RenameFailed;
        let rename = AssetEdit {
            label: request.label.clone(),
            ..AssetEdit::rename(&prepared.name)
        };
        let renamed = match self.client.edit_asset(temp.id, &rename).await {
            Ok(outcome) => outcome,
            Err(e) => {
                notice.cause = e.to_string();
                report_recovery(&notice);
                return Err(e);
            }
        };
        state = state.advance(renamed.is_success());
        debug!(state = state.name(), "Replacement step finished");
        match renamed {
            Outcome::Failed(failure) => {
                error!("Edit of new asset failed after old asset was deleted!");
                Ok(recovery(state, notice, failure))
            }
            done => {
                info!(asset_id = temp.id, asset = %prepared.name, "Replaced asset");
                Ok(Replacement::new(state, done))
            }
        }
    }

    /// Delete the oldest assets so at most `max_assets` remain
    ///
    /// Deletions are independent: one failing does not stop the rest.
    pub async fn prune_oldest(
        &self,
        max_assets: usize,
        selector: &ReleaseSelector,
    ) -> Result<BatchReport<Asset>, ReleaseError> {
        let mut report = BatchReport::new();

        let release = match self.client.get_release(selector, false).await? {
            Outcome::Succeeded { data, .. } => data,
            Outcome::Failed(failure) => {
                error!("Release data could not be retrieved, nothing pruned.");
                report.failed.push((format!("release {}", selector), failure));
                return Ok(report);
            }
        };

        let doomed = select_oldest(&release.assets, max_assets);
        if doomed.is_empty() {
            debug!(
                count = release.assets.len(),
                max_assets, "Asset count within limit"
            );
        }

        for asset in doomed {
            info!("Deleting asset '{}'", asset.name);
            let item = format!("asset {} ('{}')", asset.id, asset.name);
            match self.client.delete_asset(asset.id).await {
                Ok(Outcome::Succeeded { .. }) => report.succeeded.push(asset),
                Ok(Outcome::Failed(failure)) => report.failed.push((item, failure)),
                Err(e) => {
                    warn!(asset_id = asset.id, error = %e, "Deletion aborted");
                    report.failed.push((item, Failure::fault(e.to_string())));
                }
            }
        }

        Ok(report)
    }

    /// Upload several files to one release, one after another
    ///
    /// Paths are de-duplicated and processed in ascending order. A fault
    /// on one file only fails that file.
    pub async fn upload_batch(
        &self,
        paths: &[PathBuf],
        selector: &ReleaseSelector,
        replace: bool,
    ) -> BatchReport<Asset> {
        let mut report = BatchReport::new();
        let unique: BTreeSet<&PathBuf> = paths.iter().collect();

        for path in unique {
            let request = UploadRequest::new(path.clone(), selector.clone());
            let result = if replace {
                self.replace_asset(&request).await.map(|r| r.outcome)
            } else {
                self.client.upload_asset(&request).await
            };

            let item = path.display().to_string();
            match result {
                Ok(Outcome::Succeeded { data, .. }) => report.succeeded.push(data),
                Ok(Outcome::Failed(failure)) => report.failed.push((item, failure)),
                Err(e) => {
                    error!(path = %item, error = %e, "Upload aborted");
                    report.failed.push((item, Failure::fault(e.to_string())));
                }
            }
        }

        report
    }
}

fn report_recovery(notice: &RecoveryNotice) {
    error!(
        state = notice.state.name(),
        temp_asset_id = notice.temp_asset_id,
        temp_name = %notice.temp_name,
        old_asset_id = notice.old_asset_id,
        "{}",
        notice
    );
}

fn recovery(state: ReplaceState, mut notice: RecoveryNotice, failure: Failure) -> Replacement {
    notice.state = state;
    notice.cause = failure.diagnostic.to_string();
    report_recovery(&notice);
    Replacement::new(
        state,
        Outcome::Failed(Failure {
            diagnostic: Diagnostic::ManualRecovery(notice),
            response: failure.response,
        }),
    )
}
