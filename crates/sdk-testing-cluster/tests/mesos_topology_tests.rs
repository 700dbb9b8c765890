//! Private agent discovery against a mock Mesos master

mod common;

use common::state_summary;
use sdk_testing_cluster::{ClusterError, ClusterTopology, MesosStateTopology, Result};
use sdk_testing_core::types::ClusterSettings;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer, token: Option<&str>) -> ClusterSettings {
    ClusterSettings {
        url: Some(server.uri()),
        auth_token: token.map(str::to_string),
        request_timeout_secs: 5,
        ..ClusterSettings::default()
    }
}

/// The topology client is blocking, so it runs off the async runtime
async fn private_agents(settings: ClusterSettings) -> Result<Vec<String>> {
    tokio::task::spawn_blocking(move || {
        MesosStateTopology::from_settings(&settings)?.private_agents()
    })
    .await
    .expect("blocking task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lists_private_agents_with_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mesos/master/state-summary"))
        .and(header("Authorization", "token=acs-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(state_summary()))
        .expect(1)
        .mount(&server)
        .await;

    let agents = private_agents(settings_for(&server, Some("acs-secret")))
        .await
        .unwrap();

    assert_eq!(agents, vec!["10.0.0.21", "10.0.0.22"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mesos/master/state-summary"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = private_agents(settings_for(&server, None)).await.unwrap_err();

    assert!(matches!(err, ClusterError::HttpStatus { status: 401, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mesos/master/state-summary"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = private_agents(settings_for(&server, None)).await.unwrap_err();

    assert!(matches!(err, ClusterError::MalformedState { .. }));
}
