use crate::common::*;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use topic_graph::server::{ensure_snapshot, serve, AppState};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

/// Starts the HTTP layer on an ephemeral port and returns its address
async fn start_server(
    mock_server: &MockServer,
    seeds: &[&str],
    snapshot_path: &Path,
    static_dir: &Path,
) -> SocketAddr {
    let state = Arc::new(AppState::new(
        builder(mock_server, seeds, snapshot_path),
        static_dir,
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        let _ = serve(listener, state).await;
    });

    addr
}

#[tokio::test]
async fn test_graph_data_missing_returns_404() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let addr = start_server(&mock_server, &["Science"], &dir.path().join("graph.json"), dir.path()).await;

    let response = reqwest::get(format!("http://{}/api/graph-data", addr))
        .await
        .expect("Request failed");

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = serde_json::from_str(&response.text().await.unwrap()).unwrap();
    assert!(body["error"].as_str().unwrap().contains("Graph data not found"));
}

#[tokio::test]
async fn test_graph_data_is_served_verbatim() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let snapshot_path = dir.path().join("graph.json");
    let stored = "{\n  \"nodes\": [],\n  \"links\": []\n}";
    std::fs::write(&snapshot_path, stored).unwrap();

    let addr = start_server(&mock_server, &["Science"], &snapshot_path, dir.path()).await;

    let response = reqwest::get(format!("http://{}/api/graph-data", addr))
        .await
        .expect("Request failed");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(response.text().await.unwrap(), stored);
}

#[tokio::test]
async fn test_rebuild_reports_counts_and_persists() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let snapshot_path = dir.path().join("graph.json");

    mount_first_page(
        &mock_server,
        "Science",
        json_response(links_body(26700, &["Physics", "Mathematics", "Physics"], None)),
    )
    .await;

    let addr = start_server(&mock_server, &["Science"], &snapshot_path, dir.path()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{}/api/rebuild-graph", addr))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = serde_json::from_str(&response.text().await.unwrap()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"success": true, "nodes": 3, "edges": 3})
    );

    let served = client
        .get(format!("http://{}/api/graph-data", addr))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(served, std::fs::read_to_string(&snapshot_path).unwrap());
}

#[tokio::test]
async fn test_rebuild_failure_returns_error_payload() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-directory");
    std::fs::write(&blocker, "file").unwrap();

    mount_first_page(&mock_server, "Science", json_response(links_body(1, &["Physics"], None))).await;

    let addr = start_server(&mock_server, &["Science"], &blocker.join("graph.json"), dir.path()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/rebuild-graph", addr))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = serde_json::from_str(&response.text().await.unwrap()).unwrap();
    assert!(body["error"].is_string());
    assert!(body.get("success").is_none());
}

#[tokio::test]
async fn test_static_files() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let static_dir = dir.path().join("static");
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("index.html"), "<html>graph</html>").unwrap();
    std::fs::write(static_dir.join("visualization.js"), "render();").unwrap();
    std::fs::write(dir.path().join("secret.txt"), "hidden").unwrap();

    let addr = start_server(&mock_server, &["Science"], &dir.path().join("graph.json"), &static_dir).await;

    let index = reqwest::get(format!("http://{}/", addr)).await.unwrap();
    assert_eq!(index.status().as_u16(), 200);
    assert!(index.headers()["content-type"].to_str().unwrap().starts_with("text/html"));
    assert_eq!(index.text().await.unwrap(), "<html>graph</html>");

    let script = reqwest::get(format!("http://{}/static/visualization.js", addr))
        .await
        .unwrap();
    assert_eq!(script.status().as_u16(), 200);
    assert_eq!(script.text().await.unwrap(), "render();");

    let missing = reqwest::get(format!("http://{}/static/nope.js", addr)).await.unwrap();
    assert_eq!(missing.status().as_u16(), 404);

}

/// Sends `target` as the request line verbatim, bypassing client-side
/// dot-segment normalization, and returns the whole response text
async fn raw_get(addr: SocketAddr, target: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        target, addr
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_static_paths_cannot_leave_static_dir() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let static_dir = dir.path().join("static");
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("app.js"), "ok();").unwrap();
    std::fs::write(dir.path().join("secret.txt"), "hidden").unwrap();

    let addr = start_server(&mock_server, &["Science"], &dir.path().join("graph.json"), &static_dir).await;

    let allowed = raw_get(addr, "/static/app.js").await;
    assert!(allowed.starts_with("HTTP/1.1 200"), "{}", allowed);

    for target in [
        "/static/../secret.txt",
        "/static/%2E%2E/secret.txt",
        "/static/css/../../secret.txt",
    ] {
        let response = raw_get(addr, target).await;
        assert!(response.starts_with("HTTP/1.1 404"), "{}: {}", target, response);
        assert!(!response.contains("hidden"), "{}", target);
    }
}

#[tokio::test]
async fn test_cors_headers_on_api() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let snapshot_path = dir.path().join("graph.json");
    std::fs::write(&snapshot_path, "{\"nodes\": [], \"links\": []}").unwrap();

    let addr = start_server(&mock_server, &["Science"], &snapshot_path, dir.path()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{}/api/graph-data", addr))
        .header("Origin", "http://other.example")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["access-control-allow-origin"].to_str().unwrap(),
        "*"
    );

    let preflight = client
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{}/api/rebuild-graph", addr),
        )
        .header("Origin", "http://other.example")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();
    assert!(preflight.status().is_success());
    assert!(preflight
        .headers()
        .contains_key("access-control-allow-methods"));
}

#[tokio::test]
async fn test_ensure_snapshot_builds_when_missing() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let snapshot_path = dir.path().join("graph.json");

    mount_first_page(&mock_server, "Science", json_response(links_body(1, &["Physics"], None))).await;

    let builder = builder(&mock_server, &["Science"], &snapshot_path);
    assert!(ensure_snapshot(&builder).await.unwrap());

    let snapshot = builder.store().load().await.unwrap();
    assert_eq!(snapshot.node_count(), 2);
    assert_eq!(snapshot.edge_count(), 1);
}

#[tokio::test]
async fn test_ensure_snapshot_keeps_existing_file() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let snapshot_path = dir.path().join("graph.json");
    let stored = "{\"nodes\": [], \"links\": []}";
    std::fs::write(&snapshot_path, stored).unwrap();

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(json_response(links_body(1, &["Physics"], None)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let builder = builder(&mock_server, &["Science"], &snapshot_path);
    assert!(!ensure_snapshot(&builder).await.unwrap());

    assert_eq!(std::fs::read_to_string(&snapshot_path).unwrap(), stored);
}
