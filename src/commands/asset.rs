//! Asset commands: upload (with replace and pruning), edit, delete.

use anyhow::Result;
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::domain::{Asset, AssetEdit, Outcome, ReleaseSelector, UploadRequest};
use crate::infrastructure::ApiClient;
use crate::services::AssetService;
use crate::ui;

/// Options of the `upload-asset` command
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub selector: ReleaseSelector,
    pub files: Vec<PathBuf>,
    pub name: Option<String>,
    pub label: Option<String>,
    pub replace: bool,
    pub max_assets: Option<usize>,
}

/// Upload one or more files, then prune old assets if asked to
///
/// Prints `<asset id> <asset name>` for every uploaded asset.
pub async fn upload(client: &ApiClient, options: UploadOptions) -> Result<bool> {
    let service = AssetService::new(client);

    let mut success = match options.files.as_slice() {
        [path] => {
            let request = UploadRequest::new(path, options.selector.clone())
                .with_name(options.name.clone())
                .with_label(options.label.clone());
            let outcome = if options.replace {
                let replacement = service.replace_asset(&request).await?;
                if replacement.state.requires_manual_recovery() {
                    error!(state = replacement.state.name(), "Replacement stopped part way");
                }
                replacement.outcome
            } else {
                client.upload_asset(&request).await?
            };
            if let Some(asset) = outcome.data() {
                print_uploaded(asset);
            }
            if let Some(failure) = outcome.failure() {
                ui::print_failure(&format!("Upload of {} failed", path.display()), failure);
            }
            outcome.is_success()
        }
        paths => {
            if options.name.is_some() || options.label.is_some() {
                warn!("Asset name/label options ignored for multiple files");
                ui::print_warning("Asset name/label options ignored for multiple files");
            }
            let report = service
                .upload_batch(paths, &options.selector, options.replace)
                .await;
            for asset in &report.succeeded {
                print_uploaded(asset);
            }
            for (path, failure) in &report.failed {
                ui::print_failure(&format!("Upload of {} failed", path), failure);
            }
            let stranded = report
                .failed
                .iter()
                .filter(|(_, failure)| failure.needs_manual_recovery())
                .count();
            if stranded > 0 {
                ui::print_warning(&format!(
                    "{} replacement(s) need manual recovery, see the errors above",
                    stranded
                ));
            }
            report.is_success()
        }
    };

    if let Some(max_assets) = options.max_assets {
        info!(max_assets, "Pruning oldest assets");
        let report = service.prune_oldest(max_assets, &options.selector).await?;
        for (item, failure) in &report.failed {
            ui::print_failure(&format!("Could not delete {}", item), failure);
        }
        if !report.succeeded.is_empty() {
            ui::print_info(&format!("Deleted {} old asset(s)", report.succeeded.len()));
        }
        success = success && report.is_success();
    }

    Ok(success)
}

fn print_uploaded(asset: &Asset) {
    ui::print_success(&format!("Uploaded asset '{}' (id {})", asset.name, asset.id));
    println!("{} {}", asset.id, asset.name);
}

/// Change an asset's name and/or label
pub async fn edit(client: &ApiClient, asset_id: u64, edit: AssetEdit) -> Result<bool> {
    match client.edit_asset(asset_id, &edit).await? {
        Outcome::Succeeded { data, .. } => {
            ui::print_success(&format!("Edited asset {} ('{}')", data.id, data.name));
            Ok(true)
        }
        Outcome::Failed(failure) => {
            ui::print_failure(&format!("Asset {} was not edited", asset_id), &failure);
            Ok(false)
        }
    }
}

/// Delete an asset
pub async fn delete(client: &ApiClient, asset_id: u64) -> Result<bool> {
    let outcome = client.delete_asset(asset_id).await?;
    if let Some(failure) = outcome.failure() {
        ui::print_failure(&format!("Asset {} was not deleted", asset_id), failure);
        return Ok(false);
    }
    ui::print_success(&format!("Deleted asset {}", asset_id));
    Ok(true)
}
