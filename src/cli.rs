//! CLI definitions for release-keeper
//!
//! This module contains all CLI argument parsing structures using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{parse_timeout, validate_env_var_name, RepoSlug};
use crate::domain::{AssetEdit, CreateRelease, ReleaseFields, ReleaseSelector};
use crate::error::SelectorError;

#[derive(Parser, Debug)]
#[command(
    name = "release-keeper",
    version,
    about = "Manage GitHub releases and their assets",
    long_about = "Create, edit and delete releases, and upload, replace, prune and edit release assets.\nPrints the created release id or uploaded asset id on stdout."
)]
pub struct Cli {
    /// The 'user/repository' combination of the release
    #[arg(value_name = "REPO_SLUG")]
    pub repo_slug: RepoSlug,

    /// Timeout for network requests, e.g. 90s or 2m (default 60s)
    #[arg(long, env = "RELEASE_KEEPER_TIMEOUT", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// API base URL (default https://api.github.com)
    #[arg(long, env = "RELEASE_KEEPER_API_URL")]
    pub api_url: Option<String>,

    /// Config file (default: release-keeper.yaml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The environment variable holding the auth token
    #[arg(
        short = 'a',
        long,
        value_name = "VAR_NAME",
        value_parser = validate_env_var_name,
        conflicts_with = "auth_token"
    )]
    pub auth_token_var: Option<String>,

    /// Pass the auth token directly (use with caution!)
    #[arg(short = 'A', long, value_name = "TOKEN")]
    pub auth_token: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new release
    Create {
        /// Tag of the new release
        #[arg(value_name = "TAG_NAME")]
        tag: String,

        #[command(flatten)]
        release: ReleaseArgs,
    },

    /// Edit the release, if it exists
    Edit {
        #[command(flatten)]
        selector: SelectorArgs,

        #[command(flatten)]
        release: ReleaseArgs,

        /// Switch existing tag to the provided one
        #[arg(short = 's', long, value_name = "NEW_TAG")]
        switch_tag_to: Option<String>,
    },

    /// Delete the release, if it exists
    Delete {
        #[command(flatten)]
        selector: SelectorArgs,
    },

    /// Upload asset files to the release
    UploadAsset {
        #[command(flatten)]
        selector: SelectorArgs,

        #[command(flatten)]
        asset: AssetArgs,

        /// Delete the oldest assets such that this number is not exceeded
        #[arg(short = 'm', long, value_name = "MAX_ASSETS", value_parser = parse_max_assets)]
        max_assets: Option<usize>,

        /// If an asset with the same name already exists, replace it.
        /// Otherwise, nothing is uploaded.
        #[arg(short = 'r', long)]
        replace: bool,

        /// File path of an asset that will be added to the release
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Edit the name/label of an existing asset
    EditAsset {
        #[arg(value_name = "ASSET_ID")]
        asset_id: u64,

        #[command(flatten)]
        asset: AssetArgs,
    },

    /// Delete an existing asset
    DeleteAsset {
        #[arg(value_name = "ASSET_ID")]
        asset_id: u64,
    },
}

/// Exactly one of tag or id
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SelectorArgs {
    /// Identify release by tag
    #[arg(short = 't', long, value_name = "TAG_NAME")]
    pub tag: Option<String>,

    /// Identify release by id
    #[arg(short = 'i', long, value_name = "RELEASE_ID")]
    pub release_id: Option<u64>,
}

impl SelectorArgs {
    pub fn selector(&self) -> Result<ReleaseSelector, SelectorError> {
        ReleaseSelector::from_parts(self.release_id, self.tag.clone())
    }
}

/// Options shared by create and edit; unset options are not sent
#[derive(Args, Debug, Clone, Default)]
pub struct ReleaseArgs {
    /// The name of the release
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Contents of the release body
    #[arg(short = 'b', long, value_name = "BODY")]
    pub body: Option<String>,

    /// Commit/branch of the release
    #[arg(short = 'c', long, value_name = "COMMITISH")]
    pub commitish: Option<String>,

    /// Mark release as a prerelease (default is true)
    #[arg(short = 'p', long, value_name = "true|false", value_parser = parse_bool_flag)]
    pub prerelease: Option<bool>,

    /// Mark release as a draft (default is false)
    #[arg(short = 'd', long, value_name = "true|false", value_parser = parse_bool_flag)]
    pub draft: Option<bool>,
}

impl ReleaseArgs {
    /// Parameters for `create`, keeping the defaults for unset flags
    pub fn create(self, tag: String) -> CreateRelease {
        let mut params = CreateRelease::new(tag);
        params.name = self.name;
        params.body = self.body;
        params.commitish = self.commitish;
        if let Some(draft) = self.draft {
            params = params.draft(draft);
        }
        if let Some(prerelease) = self.prerelease {
            params = params.prerelease(prerelease);
        }
        params
    }

    /// Fields for `edit`
    pub fn fields(self, new_tag: Option<String>) -> ReleaseFields {
        ReleaseFields {
            tag: new_tag,
            commitish: self.commitish,
            name: self.name,
            body: self.body,
            draft: self.draft,
            prerelease: self.prerelease,
        }
    }
}

/// Asset name and label
#[derive(Args, Debug, Clone, Default)]
pub struct AssetArgs {
    /// Asset name (file name when downloading); ignored when uploading multiple files
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Asset label (the name that is displayed); ignored when uploading multiple files
    #[arg(short = 'l', long, value_name = "LABEL")]
    pub label: Option<String>,
}

impl AssetArgs {
    pub fn edit(self) -> AssetEdit {
        AssetEdit {
            name: self.name,
            label: self.label,
        }
    }
}

/// `true` or `false`, case insensitive
fn parse_bool_flag(value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err("Argument must be 'true' or 'false' (case insensitive)".to_string()),
    }
}

fn parse_max_assets(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(max) if max > 0 => Ok(max),
        _ => Err("The maximum number of assets must be a positive integer.".to_string()),
    }
}
