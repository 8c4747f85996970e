//! End-to-end tests over a real HTTP listener

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use flow_editor_api::adapters::memory::MemoryRuntime;
use flow_editor_api::api::EditorApi;
use flow_editor_api::config::{EditorConfig, ServerConfig};
use flow_editor_api::core::RuntimeHandle;
use flow_editor_api::core::models::Project;
use flow_editor_api::server::{ApiServer, MAX_BODY_BYTES, ShutdownHandle};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

use crate::common::fixtures::{handle, map};
use crate::common::mocks::{MockProjects, MockSettings, ProjectCall};

/// A listener on an ephemeral port, shut down on drop
struct TestServer {
    base: String,
    shutdown: ShutdownHandle,
    task: Option<JoinHandle<anyhow::Result<()>>>,
}

impl TestServer {
    fn start(server: ServerConfig, theme: Value, runtime: RuntimeHandle) -> Self {
        let config = EditorConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                ..server
            },
            theme: map(theme),
        };
        let api = Arc::new(EditorApi::init(&config, runtime));
        let server = ApiServer::bind(&config.server, api).unwrap();
        let addr: SocketAddr = server.local_addr().unwrap();
        let shutdown = server.shutdown_handle();
        let task = tokio::spawn(server.run());

        Self {
            base: format!("http://{addr}{}", config.server.prefix),
            shutdown,
            task: Some(task),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn stop(mut self) {
        self.shutdown.shutdown();
        if let Some(task) = self.task.take() {
            task.await.unwrap().unwrap();
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.shutdown();
    }
}

fn memory_server() -> TestServer {
    let runtime = RuntimeHandle::from_shared(Arc::new(MemoryRuntime::new()));
    TestServer::start(ServerConfig::default(), json!({ "header": "Flows" }), runtime)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_project_lifecycle_over_http() {
    let server = memory_server();
    let client = reqwest::Client::new();

    let resp = client.get(server.url("/projects")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "projects": [] }));

    let resp = client
        .post(server.url("/projects"))
        .json(&json!({ "name": "demo", "summary": "first" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get("content-type").unwrap().to_str().unwrap(),
        "application/json"
    );
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "name": "demo", "summary": "first" }));

    let resp = client
        .put(server.url("/projects/demo"))
        .json(&json!({ "name": "demo", "summary": "second" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await.unwrap()["summary"], json!("second"));

    let resp = client.delete(server.url("/projects/demo")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp.bytes().await.unwrap().is_empty());

    let resp = client.delete(server.url("/projects/demo")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>().await.unwrap()["code"], json!("NOT_FOUND"));

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_global_settings_over_http() {
    let server = memory_server();
    let client = reqwest::Client::new();

    let resp = client.get(server.url("/settings")).send().await.unwrap();
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "header": "Flows" }));

    let resp = client
        .post(server.url("/settings"))
        .json(&json!({ "header": "Mine", "palette": { "editable": false } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client.get(server.url("/settings")).send().await.unwrap();
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "header": "Mine", "palette": { "editable": false } })
    );

    let resp = client
        .post(server.url("/settings"))
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_user_header_injects_identity() {
    let projects = Arc::new(MockProjects::new());
    let settings =
        Arc::new(MockSettings::for_user("fred").with_user_settings(map(json!({ "c": 3, "d": 4 }))));
    let server_config = ServerConfig {
        prefix: "/admin".to_string(),
        user_header: Some("X-Editor-User".to_string()),
        ..ServerConfig::default()
    };
    let server = TestServer::start(server_config, json!({}), handle(&projects, &settings));
    let client = reqwest::Client::new();

    let resp = client
        .get(server.url("/settings/user"))
        .header("x-editor-user", "fred")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "c": 3, "d": 4 }));

    let resp = client.get(server.url("/settings/user")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .post(server.url("/settings/user"))
        .header("x-editor-user", "fred")
        .json(&json!({ "e": 4, "f": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(settings.user_updates()[0].settings, map(json!({ "e": 4, "f": 5 })));

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_shutdown_answers_accepted_requests() {
    let delay = Duration::from_millis(300);
    let projects = Arc::new(
        MockProjects::new()
            .returning_list(vec![Project::new("slow")])
            .slow_list(delay),
    );
    let settings = Arc::new(MockSettings::for_user("fred"));
    let server = TestServer::start(ServerConfig::default(), json!({}), handle(&projects, &settings));

    let started = Instant::now();
    let request = tokio::spawn(reqwest::get(server.url("/projects")));
    while projects.calls().is_empty() {
        assert!(started.elapsed() < Duration::from_secs(5), "request never reached the runtime");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(projects.calls(), vec![ProjectCall::Get]);

    server.stop().await;
    assert!(started.elapsed() >= delay);

    let resp = request.await.unwrap().unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "projects": [{ "name": "slow" }] }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_oversized_body_is_rejected() {
    let server = memory_server();
    let client = reqwest::Client::new();
    let body = vec![b' '; usize::try_from(MAX_BODY_BYTES).unwrap() + 1];

    let resp = client.post(server.url("/settings")).body(body).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(resp.json::<Value>().await.unwrap()["code"], json!("PAYLOAD_TOO_LARGE"));

    server.stop().await;
}
