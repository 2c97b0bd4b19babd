//! Shared fixtures for tests that run against `httpmock`.

use httpmock::MockServer;
use serde_json::{json, Value};
use std::io::Write;
use std::time::Duration;

use super::ApiClient;
use crate::config::{ClientConfig, Credential};

pub const TOKEN: &str = "t0ken";
pub const RELEASES: &str = "/repos/octo/tools/releases";

pub fn client_for(api_url: &str) -> ApiClient {
    let config = ClientConfig::new("octo/tools".parse().unwrap(), Credential::new(TOKEN))
        .with_api_url(api_url);
    ApiClient::new(config).unwrap()
}

pub fn client(server: &MockServer) -> ApiClient {
    client_for(&server.base_url())
}

/// Client that gives up on a response after `timeout`
pub fn impatient_client(server: &MockServer, timeout: Duration) -> ApiClient {
    let config = ClientConfig::new("octo/tools".parse().unwrap(), Credential::new(TOKEN))
        .with_api_url(server.base_url())
        .with_timeout(timeout);
    ApiClient::new(config).unwrap()
}

/// Path the release's `upload_url` points at
pub fn upload_path(release_id: u64) -> String {
    format!("/uploads/releases/{}/assets", release_id)
}

pub fn asset_json(id: u64, name: &str, updated_at: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "label": null,
        "updated_at": updated_at,
        "size": 4,
    })
}

/// Release JSON whose assets are `(id, name, updated_at)`
pub fn release_json(
    server: &MockServer,
    id: u64,
    tag: &str,
    assets: &[(u64, &str, &str)],
) -> Value {
    json!({
        "id": id,
        "tag_name": tag,
        "name": tag,
        "body": null,
        "target_commitish": "main",
        "draft": false,
        "prerelease": false,
        "upload_url": format!("{}{}{{?name,label}}", server.base_url(), upload_path(id)),
        "assets": assets
            .iter()
            .map(|(id, name, ts)| asset_json(*id, name, ts))
            .collect::<Vec<_>>(),
    })
}

/// Temp file with `content`, named `name` inside a fresh directory
pub fn local_file(name: &str, content: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content).unwrap();
    (dir, path)
}
