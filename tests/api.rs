// API client integration tests against a local mock server: each of the
// four operations must hit the documented method, path, query and body,
// carry bearer auth, and decode the documented shapes.

use mockito::Matcher;
use pretty_assertions::assert_eq;

use vdeploy::api::{ApiClient, Deployment, DeploymentState};
use vdeploy::config::{Config, Project};

fn test_config(endpoint: String) -> Config {
    Config {
        endpoint,
        token: "tok".into(),
        team_id: "team_1".into(),
        projects: vec![Project {
            name: "web".into(),
            id: "prj_1".into(),
        }],
    }
}

#[test]
fn list_deployments_filters_by_project_and_states() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v6/deployments")
        .match_header("authorization", "Bearer tok")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "10".into()),
            Matcher::UrlEncoded("projectId".into(), "prj_1".into()),
            Matcher::UrlEncoded("state".into(), "READY,BUILDING".into()),
            // `since` is clock-dependent; presence is enough.
            Matcher::Regex("since=\\d+".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"deployments":[
                {"uid":"dpl_1","name":"web","created":1700000000000,
                 "readyState":"READY","creator":{"username":"ana"}},
                {"uid":"dpl_2","name":"web","created":1700000100000,
                 "readyState":"BUILDING","creator":{"username":"bo"}}
            ]}"#,
        )
        .create();

    let api = ApiClient::new(&test_config(server.url())).unwrap();
    let deployments = api
        .list_deployments(
            "web",
            10,
            24,
            &[DeploymentState::Ready, DeploymentState::Building],
        )
        .unwrap();

    mock.assert();
    let uids: Vec<_> = deployments.iter().map(|d| d.uid.as_str()).collect();
    assert_eq!(uids, ["dpl_1", "dpl_2"]);
    assert_eq!(deployments[0].creator.username, "ana");
}

#[test]
fn list_deployments_rejects_unknown_project() {
    let server = mockito::Server::new();
    let api = ApiClient::new(&test_config(server.url())).unwrap();

    let err = api
        .list_deployments("nope", 10, 24, &[DeploymentState::Ready])
        .unwrap_err();
    assert!(err.to_string().contains("no project id configured"));
}

#[test]
fn get_deployment_fetches_details_by_id() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v13/deployments/dpl_1")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id":"dpl_1","name":"web","alias":["web.example.com"],
                "buildingAt":1700000000000,"readyState":"READY",
                "creator":{"username":"ana"},
                "gitSource":{"ref":"main","sha":"abc123"}}"#,
        )
        .create();

    let api = ApiClient::new(&test_config(server.url())).unwrap();
    let deployment = api.get_deployment("dpl_1").unwrap();

    mock.assert();
    assert_eq!(deployment.id, "dpl_1");
    assert_eq!(deployment.alias, vec!["web.example.com".to_string()]);
    assert_eq!(deployment.git_source.branch, "main");
    assert_eq!(deployment.git_source.commit_sha, "abc123");
}

#[test]
fn cancel_patches_the_cancel_endpoint() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("PATCH", "/v12/deployments/dpl_1/cancel")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"dpl_1","name":"web","readyState":"CANCELED"}"#)
        .create();

    let api = ApiClient::new(&test_config(server.url())).unwrap();
    let cancelled = api.cancel_deployment("dpl_1").unwrap();

    mock.assert();
    assert_eq!(cancelled.id, "dpl_1");
    assert_eq!(cancelled.ready_state, "CANCELED");
}

#[test]
fn redeploy_posts_the_source_deployment() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v13/deployments")
        .match_header("authorization", "Bearer tok")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("teamId".into(), "team_1".into()),
            Matcher::UrlEncoded("forceNew".into(), "1".into()),
        ]))
        .match_body(Matcher::Json(serde_json::json!({
            "name": "web",
            "deploymentId": "dpl_1",
            "projectSettings": {"commandForIgnoringBuildStep": ""}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"dpl_9","name":"web","readyState":"QUEUED"}"#)
        .create();

    let api = ApiClient::new(&test_config(server.url())).unwrap();
    let source = Deployment {
        id: "dpl_1".into(),
        name: "web".into(),
        ..Deployment::default()
    };
    let redeployed = api.redeploy(&source).unwrap();

    mock.assert();
    assert_eq!(redeployed.id, "dpl_9");
}

#[test]
fn http_failures_carry_status_and_body() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/v13/deployments/dpl_1")
        .with_status(500)
        .with_body("upstream exploded")
        .create();

    let api = ApiClient::new(&test_config(server.url())).unwrap();
    let err = api.get_deployment("dpl_1").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("500"), "missing status in {msg:?}");
    assert!(msg.contains("upstream exploded"), "missing body in {msg:?}");
}
