//! Release and asset domain types
//!
//! Wire shapes follow the GitHub Releases API. Only the fields the
//! lifecycle operations need are modelled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::SelectorError;

/// A binary file attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub size: u64,
}

/// A tagged, versioned release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub target_commitish: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    /// URI template, e.g. `https://uploads.github.com/.../assets{?name,label}`
    pub upload_url: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Release {
    /// Find the asset currently holding `name`
    pub fn asset_named(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.name == name)
    }

    /// Concrete upload URL for an asset called `name`
    ///
    /// Strips the trailing `{?name,label}` template and appends a literal
    /// query string instead.
    pub fn upload_endpoint(&self, name: &str, label: Option<&str>) -> String {
        let base = match self.upload_url.rfind('{') {
            Some(idx) => &self.upload_url[..idx],
            None => self.upload_url.as_str(),
        };
        let mut url = format!("{}?name={}", base, urlencoding::encode(name));
        if let Some(label) = label.filter(|l| !l.is_empty()) {
            url.push_str("&label=");
            url.push_str(&urlencoding::encode(label));
        }
        url
    }
}

/// Addresses a release by exactly one of id or tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseSelector {
    Id(u64),
    Tag(String),
}

impl ReleaseSelector {
    /// Build a selector from optional parts, rejecting both/neither
    pub fn from_parts(id: Option<u64>, tag: Option<String>) -> Result<Self, SelectorError> {
        match (id, tag) {
            (Some(id), None) => Ok(Self::Id(id)),
            (None, Some(tag)) => Ok(Self::Tag(tag)),
            (Some(_), Some(_)) => Err(SelectorError::Both),
            (None, None) => Err(SelectorError::Neither),
        }
    }
}

impl fmt::Display for ReleaseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {}", id),
            Self::Tag(tag) => write!(f, "tag '{}'", tag),
        }
    }
}

/// Release fields sent on create/edit
///
/// Unset fields are omitted from the request body entirely, so `None`
/// means "leave as is" rather than false/empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseFields {
    #[serde(rename = "tag_name", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(rename = "target_commitish", skip_serializing_if = "Option::is_none")]
    pub commitish: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,
}

impl ReleaseFields {
    /// True when no field would be sent
    pub fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.commitish.is_none()
            && self.name.is_none()
            && self.body.is_none()
            && self.draft.is_none()
            && self.prerelease.is_none()
    }
}

/// Parameters for creating a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRelease {
    pub tag: String,
    pub name: Option<String>,
    pub body: Option<String>,
    pub commitish: Option<String>,
    pub draft: bool,
    pub prerelease: bool,
}

impl CreateRelease {
    /// New release parameters; not a draft, marked as prerelease
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: None,
            body: None,
            commitish: None,
            draft: false,
            prerelease: true,
        }
    }

    /// Builder: set release name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set release body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Builder: set target commitish
    pub fn with_commitish(mut self, commitish: impl Into<String>) -> Self {
        self.commitish = Some(commitish.into());
        self
    }

    /// Builder: set draft flag
    pub fn draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    /// Builder: set prerelease flag
    pub fn prerelease(mut self, prerelease: bool) -> Self {
        self.prerelease = prerelease;
        self
    }

    /// Request body for the create endpoint
    pub fn fields(&self) -> ReleaseFields {
        ReleaseFields {
            tag: Some(self.tag.clone()),
            commitish: self.commitish.clone(),
            name: self.name.clone(),
            body: self.body.clone(),
            draft: Some(self.draft),
            prerelease: Some(self.prerelease),
        }
    }
}

/// Asset fields sent on edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl AssetEdit {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            label: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.label.is_none()
    }
}

/// A single local file to attach to a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: PathBuf,
    pub selector: ReleaseSelector,
    pub name: Option<String>,
    pub label: Option<String>,
    /// Upload even if an asset with the same name exists
    pub allow_existing: bool,
}

impl UploadRequest {
    pub fn new(path: impl Into<PathBuf>, selector: ReleaseSelector) -> Self {
        Self {
            path: path.into(),
            selector,
            name: None,
            label: None,
            allow_existing: false,
        }
    }

    /// Builder: skip the existing-name check
    pub fn allow_existing(mut self) -> Self {
        self.allow_existing = true;
        self
    }

    /// Builder: set asset name (defaults to the file name)
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Builder: set asset label
    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    /// Name the asset will carry once uploaded
    pub fn asset_name(&self) -> Option<String> {
        self.name.clone().or_else(|| file_name(&self.path))
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release_with_upload_url(url: &str) -> Release {
        Release {
            id: 1,
            tag_name: "v1.0".to_string(),
            name: None,
            body: None,
            target_commitish: None,
            draft: false,
            prerelease: false,
            upload_url: url.to_string(),
            assets: Vec::new(),
        }
    }

    #[test]
    fn test_selector_from_parts() {
        assert_eq!(
            ReleaseSelector::from_parts(Some(7), None),
            Ok(ReleaseSelector::Id(7))
        );
        assert_eq!(
            ReleaseSelector::from_parts(None, Some("v1".to_string())),
            Ok(ReleaseSelector::Tag("v1".to_string()))
        );
        assert_eq!(
            ReleaseSelector::from_parts(Some(7), Some("v1".to_string())),
            Err(SelectorError::Both)
        );
        assert_eq!(
            ReleaseSelector::from_parts(None, None),
            Err(SelectorError::Neither)
        );
    }

    #[test]
    fn test_upload_endpoint_strips_template() {
        let release = release_with_upload_url(
            "https://uploads.github.com/repos/o/r/releases/1/assets{?name,label}",
        );
        assert_eq!(
            release.upload_endpoint("tool.bin", None),
            "https://uploads.github.com/repos/o/r/releases/1/assets?name=tool.bin"
        );
        assert_eq!(
            release.upload_endpoint("tool 2.bin", Some("Linux x86")),
            "https://uploads.github.com/repos/o/r/releases/1/assets?name=tool%202.bin&label=Linux%20x86"
        );
    }

    #[test]
    fn test_upload_endpoint_without_template() {
        let release = release_with_upload_url("http://localhost/upload");
        assert_eq!(
            release.upload_endpoint("a.zip", Some("")),
            "http://localhost/upload?name=a.zip"
        );
    }

    #[test]
    fn test_release_fields_omit_unset() {
        let fields = ReleaseFields {
            name: Some("Nightly".to_string()),
            draft: Some(false),
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Nightly", "draft": false}));
        assert!(!fields.is_empty());
        assert!(ReleaseFields::default().is_empty());
    }

    #[test]
    fn test_create_release_defaults() {
        let create = CreateRelease::new("v2.0").with_name("Two");
        let json = serde_json::to_value(create.fields()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "tag_name": "v2.0",
                "name": "Two",
                "draft": false,
                "prerelease": true,
            })
        );
    }

    #[test]
    fn test_asset_name_defaults_to_file_name() {
        let req = UploadRequest::new("dist/tool.bin", ReleaseSelector::Id(1));
        assert_eq!(req.asset_name().as_deref(), Some("tool.bin"));

        let req = req.with_name(Some("renamed.bin".to_string()));
        assert_eq!(req.asset_name().as_deref(), Some("renamed.bin"));
    }

    #[test]
    fn test_release_deserialize() {
        let json = r#"{
            "id": 42,
            "tag_name": "v1.0",
            "name": null,
            "draft": false,
            "prerelease": true,
            "upload_url": "https://uploads.example/assets{?name,label}",
            "assets": [
                {"id": 5, "name": "tool.bin", "label": null,
                 "updated_at": "2024-01-02T03:04:05Z", "size": 12}
            ]
        }"#;
        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.id, 42);
        assert_eq!(release.asset_named("tool.bin").map(|a| a.id), Some(5));
        assert!(release.asset_named("other").is_none());
    }
}
