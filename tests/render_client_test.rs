use std::sync::Arc;

use shipwright::adapters::render::RenderClient;
use shipwright::domain::errors::{ProviderError, PublishError};
use shipwright::domain::models::RenderConfig;
use shipwright::domain::ports::HostingProvider;
use shipwright::DeploymentTrigger;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "rnd_integrationtestkey000000000";

fn client(server: &MockServer) -> RenderClient {
    let config = RenderConfig {
        api_url: server.uri(),
        dashboard_url: "https://dashboard.render.com".to_string(),
        auto_deploy: true,
    };
    RenderClient::new(&config, API_KEY)
}

async fn mount_owners(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/owners"))
        .and(query_param("limit", "100"))
        .and(header("authorization", format!("Bearer {API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"owner": {"id": "usr-1", "name": "Ada", "email": "ada@example.com", "type": "user"}, "cursor": "c1"},
            {"owner": {"id": "tea-2", "name": "Platform", "type": "team"}, "cursor": "c2"}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_owners_unwraps_items() {
    let mock_server = MockServer::start().await;
    mount_owners(&mock_server).await;

    let owners = client(&mock_server).list_owners().await.unwrap();

    assert_eq!(owners.len(), 2);
    assert_eq!(owners[0].id, "usr-1");
    assert_eq!(owners[1].kind.as_deref(), Some("team"));
    assert!(owners[1].email.is_none());
}

#[tokio::test]
async fn test_deploy_creates_blueprint_service_for_chosen_owner() {
    let mock_server = MockServer::start().await;
    mount_owners(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v1/services"))
        .and(body_partial_json(serde_json::json!({
            "type": "blueprint",
            "name": "demo",
            "ownerId": "tea-2",
            "repo": "https://github.com/ada/demo",
            "autoDeploy": "yes"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "service": {"id": "srv-abc", "name": "demo"},
            "deployId": "dep-1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let trigger = DeploymentTrigger::new(Arc::new(client(&mock_server)), true);
    let outcome = trigger
        .deploy("https://github.com/ada/demo", Some("tea-2"), None)
        .await
        .unwrap();

    assert_eq!(outcome.service.id, "srv-abc");
    assert_eq!(outcome.owner.name, "Platform");
    assert_eq!(outcome.dashboard_url, "https://dashboard.render.com/web/srv-abc");
}

#[tokio::test]
async fn test_unauthorized_surfaces_as_hosting_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/owners"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&mock_server)
        .await;

    let trigger = DeploymentTrigger::new(Arc::new(client(&mock_server)), false);
    let err = trigger.deploy("https://github.com/ada/demo", None, None).await.unwrap_err();

    assert!(matches!(
        err,
        PublishError::Hosting(ProviderError::Api { status: 401, .. })
    ));
}
