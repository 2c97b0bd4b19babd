//! Release commands: create, edit, delete.

use anyhow::Result;
use tracing::{debug, info};

use crate::domain::{CreateRelease, Outcome, ReleaseFields, ReleaseSelector};
use crate::infrastructure::ApiClient;
use crate::ui;

/// Create a release and print its id
pub async fn create(client: &ApiClient, params: CreateRelease) -> Result<bool> {
    info!(
        repo = %client.config().repo,
        tag = %params.tag,
        draft = params.draft,
        prerelease = params.prerelease,
        "Creating release"
    );

    match client.create_release(&params).await? {
        Outcome::Succeeded { data, .. } => {
            ui::print_success(&format!("Created release '{}' (id {})", data.tag_name, data.id));
            println!("{}", data.id);
            Ok(true)
        }
        Outcome::Failed(failure) => {
            ui::print_failure("Release was not created", &failure);
            Ok(false)
        }
    }
}

/// Edit the selected release
pub async fn edit(
    client: &ApiClient,
    selector: ReleaseSelector,
    fields: ReleaseFields,
) -> Result<bool> {
    let outcome = match &selector {
        ReleaseSelector::Id(id) => client.edit_release(*id, &fields).await?,
        ReleaseSelector::Tag(tag) => client.edit_release_by_tag(tag, &fields).await?,
    };
    debug!(
        status = ?outcome.response().map(|r| r.status),
        "Edit of release with {} finished",
        selector
    );

    match outcome {
        Outcome::Succeeded { data, .. } => {
            ui::print_success(&format!("Edited release '{}' (id {})", data.tag_name, data.id));
            Ok(true)
        }
        Outcome::Failed(failure) => {
            ui::print_failure(&format!("Release with {} was not edited", selector), &failure);
            Ok(false)
        }
    }
}

/// Delete the selected release
pub async fn delete(client: &ApiClient, selector: ReleaseSelector) -> Result<bool> {
    let outcome = match &selector {
        ReleaseSelector::Id(id) => client.delete_release(*id).await?,
        ReleaseSelector::Tag(tag) => client.delete_release_by_tag(tag).await?,
    };

    if let Some(failure) = outcome.failure() {
        ui::print_failure(&format!("Release with {} was not deleted", selector), failure);
        return Ok(false);
    }
    ui::print_success(&format!("Deleted release with {}", selector));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::{client, release_json, RELEASES};
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_reports_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("{}/tags/v3.0", RELEASES));
                then.status(404);
            })
            .await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST).path(RELEASES).json_body(json!({
                    "tag_name": "v3.0",
                    "draft": false,
                    "prerelease": true,
                }));
                then.status(201)
                    .json_body(release_json(&server, 30, "v3.0", &[]));
            })
            .await;

        let ok = create_release_cmd(&server, CreateRelease::new("v3.0")).await;

        assert!(ok);
        create.assert_async().await;
    }

    async fn create_release_cmd(server: &MockServer, params: CreateRelease) -> bool {
        create(&client(server), params).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_existing_tag_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("{}/tags/v1.0", RELEASES));
                then.status(200)
                    .json_body(release_json(&server, 1, "v1.0", &[]));
            })
            .await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(201);
            })
            .await;

        let ok = create_release_cmd(&server, CreateRelease::new("v1.0")).await;

        assert!(!ok);
        create.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_edit_by_tag_switches_tag() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("{}/tags/v1.0", RELEASES));
                then.status(200)
                    .json_body(release_json(&server, 1, "v1.0", &[]));
            })
            .await;
        let patch = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path(format!("{}/1", RELEASES))
                    .json_body(json!({"tag_name": "v1.0.1"}));
                then.status(200)
                    .json_body(release_json(&server, 1, "v1.0.1", &[]));
            })
            .await;

        let fields = ReleaseFields {
            tag: Some("v1.0.1".to_string()),
            ..ReleaseFields::default()
        };
        let ok = edit(&client(&server), ReleaseSelector::Tag("v1.0".to_string()), fields)
            .await
            .unwrap();

        assert!(ok);
        patch.assert_async().await;
    }

    #[tokio::test]
    async fn test_edit_without_fields_fails() {
        let server = MockServer::start_async().await;
        let any = server
            .mock_async(|when, then| {
                when.path_contains("/");
                then.status(200);
            })
            .await;

        let ok = edit(&client(&server), ReleaseSelector::Id(1), ReleaseFields::default())
            .await
            .unwrap();

        assert!(!ok);
        any.assert_hits_async(0).await;
    }

    #[test]
    fn test_delete_by_id() {
        let server = MockServer::start();
        let delete_mock = server.mock(|when, then| {
            when.method(DELETE).path(format!("{}/7", RELEASES));
            then.status(204);
        });

        let client = client(&server);
        let ok = tokio_test::block_on(delete(&client, ReleaseSelector::Id(7))).unwrap();

        assert!(ok);
        delete_mock.assert();
    }

    #[tokio::test]
    async fn test_delete_missing_tag_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("{}/tags/gone", RELEASES));
                then.status(404).json_body(json!({"message": "Not Found"}));
            })
            .await;
        let delete_mock = server
            .mock_async(|when, then| {
                when.method(DELETE);
                then.status(204);
            })
            .await;

        let ok = delete(&client(&server), ReleaseSelector::Tag("gone".to_string()))
            .await
            .unwrap();

        assert!(!ok);
        delete_mock.assert_hits_async(0).await;
    }
}
