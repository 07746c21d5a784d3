use super::activity_log::ActivityLog;
use super::dispatcher::{DispatchError, Dispatcher};
use super::json_view;
use super::server_config::{Scheme, ServerConfig};
use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_request::request_common::HTTPRequestMethod;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

fn bench_parts(
    config: ServerConfig,
) -> (Arc<RwLock<ServerConfig>>, Arc<Mutex<ActivityLog>>, Arc<Dispatcher>) {
    let config = Arc::new(RwLock::new(config));
    let log = Arc::new(Mutex::new(ActivityLog::new()));
    let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&config), Arc::clone(&log)));
    (config, log, dispatcher)
}

/// Answers exactly one connection with the given status line and JSON body,
/// returning what the client sent as the request head.
async fn one_shot_server(
    status_line: &'static str,
    body: &'static str,
) -> (std::net::SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let n = socket.read(&mut buf).await.unwrap();
        let head = String::from_utf8_lossy(&buf[..n]).to_string();
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        head
    });
    (addr, task)
}

fn local_config(addr: std::net::SocketAddr) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.set_host("127.0.0.1");
    config.set_port(addr.port());
    config
}

#[test]
fn base_url_matches_original_layout() {
    let config = ServerConfig::default();
    assert_eq!(config.base_url(), "http://localhost:8090/vss/api/v1");
    let client = HTTPClient::new(&config.base_url());
    assert_eq!(client.url_for("status"), "http://localhost:8090/vss/api/v1/status");
}

#[test]
fn base_url_collapses_empty_doc_root() {
    let mut config = ServerConfig::default();
    config.set_doc_root("");
    assert_eq!(config.base_url(), "http://localhost:8090");
    config.set_doc_root("/vss/api/v1/");
    assert_eq!(config.base_url(), "http://localhost:8090/vss/api/v1");
}

#[test]
fn addr_override_parses_host_and_port() {
    let config = ServerConfig::with_addr("vss-box:9001");
    assert_eq!(config.host(), "vss-box");
    assert_eq!(config.port(), 9001);

    let config = ServerConfig::with_addr("vss-box");
    assert_eq!(config.host(), "vss-box");
    assert_eq!(config.port(), 8090);

    let config = ServerConfig::with_addr("");
    assert_eq!(config.host(), "localhost");
}

#[test]
fn scheme_parses_case_insensitively() {
    assert_eq!("HTTPS".parse::<Scheme>().unwrap(), Scheme::Https);
    assert_eq!(Scheme::Http.to_string(), "http");
}

#[test]
fn activity_log_is_newest_first_and_monotonic() {
    let mut log = ActivityLog::new();
    for i in 0..4 {
        log.log_request(HTTPRequestMethod::Get, &format!("signals/S{i}"));
        if i < 3 {
            log.log_response(Some(200), "ok");
        }
    }
    let request_count = log.entries().filter(|e| e.is_request()).count();
    let response_count = log.len() - request_count;
    assert_eq!(request_count, 4);
    assert!(response_count <= 4);
    // The last appended entry is the newest and sits at index 0.
    assert_eq!(log.replay(0), Some("signals/S3"));
}

#[test]
fn replay_returns_exact_path_idempotently() {
    let mut log = ActivityLog::new();
    log.log_request(HTTPRequestMethod::Put, "signals/Vehicle.OBD.Speed?value=42");
    log.log_response(Some(200), "ok");
    assert_eq!(log.replay(1), Some("signals/Vehicle.OBD.Speed?value=42"));
    assert_eq!(log.replay(1), Some("signals/Vehicle.OBD.Speed?value=42"));
    // A response entry is not replayable.
    assert_eq!(log.replay(0), None);
    assert_eq!(log.replay(17), None);
}

#[test]
fn render_pretty_prints_and_rejects_garbage() {
    let view = json_view::render(r#"{"action":"get","value":120}"#).unwrap();
    assert!(view.contains("\"action\": \"get\""));
    assert!(json_view::render("<html>not json</html>").is_err());
}

#[tokio::test]
async fn dispatch_hits_expected_url_and_logs_both_entries() {
    let (addr, server) = one_shot_server("200 OK", r#"{"action":"get","requestId":"1"}"#).await;
    let (_config, log, dispatcher) = bench_parts(local_config(addr));

    let handle =
        dispatcher.dispatch_resource(HTTPRequestMethod::Get, "status").await.unwrap();
    assert_eq!(handle.request_id(), 1);
    handle.finished().await;

    let head = server.await.unwrap();
    assert!(head.starts_with("GET /vss/api/v1/status HTTP/1.1"));

    let log = log.lock().await;
    assert_eq!(log.len(), 2);
    let entries: Vec<_> = log.entries().collect();
    assert!(!entries[0].is_error());
    assert!(entries[1].is_request());
}

#[tokio::test]
async fn non_success_status_logs_error_entry() {
    let (addr, server) = one_shot_server("404 Not Found", "").await;
    let (_config, log, dispatcher) = bench_parts(local_config(addr));

    let handle =
        dispatcher.dispatch_resource(HTTPRequestMethod::Get, "missing").await.unwrap();
    handle.finished().await;
    server.await.unwrap();

    let log = log.lock().await;
    let entries: Vec<_> = log.entries().collect();
    assert!(entries[0].is_error());
    assert!(entries[0].display_line().contains("no response, check server status"));
}

#[tokio::test]
async fn refused_connection_logs_placeholder_entry() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let (_config, log, dispatcher) = bench_parts(local_config(addr));

    let handle =
        dispatcher.dispatch_resource(HTTPRequestMethod::Get, "status").await.unwrap();
    handle.finished().await;

    let log = log.lock().await;
    assert_eq!(log.len(), 2);
    let entries: Vec<_> = log.entries().collect();
    assert!(entries[0].is_error());
    assert!(entries[0].display_line().contains("no response, check server status"));
}

#[tokio::test]
async fn missing_host_is_an_explicit_error_and_logs_nothing() {
    let mut config = ServerConfig::default();
    config.set_host("");
    let (_config, log, dispatcher) = bench_parts(config);

    let result = dispatcher.dispatch_resource(HTTPRequestMethod::Get, "status").await;
    assert!(matches!(result, Err(DispatchError::MissingServer)));
    assert!(log.lock().await.is_empty());
}

#[tokio::test]
async fn cancelled_dispatch_logs_and_releases_its_context() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    // Accepts the connection and then never answers.
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 1024];
        let _ = socket.read(&mut buf).await;
        std::future::pending::<()>().await;
    });
    let (_config, log, dispatcher) = bench_parts(local_config(addr));

    let handle =
        dispatcher.dispatch_resource(HTTPRequestMethod::Get, "hang").await.unwrap();
    let id = handle.request_id();
    assert!(dispatcher.cancel(id).await);
    handle.finished().await;
    server.abort();

    let log = log.lock().await;
    let entries: Vec<_> = log.entries().collect();
    assert!(entries[0].is_error());
    assert!(entries[0].display_line().contains("cancelled"));
    drop(log);
    // The context is gone once the task finished.
    assert!(!dispatcher.cancel(id).await);
}

#[tokio::test]
async fn typed_signal_get_parses_the_action_envelope() {
    let (addr, server) = one_shot_server(
        "200 OK",
        r#"{"action":"get","path":"Vehicle.OBD.Speed","requestId":1234,"value":"120"}"#,
    )
    .await;
    let (_config, log, dispatcher) = bench_parts(local_config(addr));

    let response = dispatcher.signal_get("Vehicle.OBD.Speed").await.unwrap();
    let head = server.await.unwrap();
    assert!(head.starts_with("GET /vss/api/v1/signals/Vehicle.OBD.Speed HTTP/1.1"));
    assert_eq!(response.action(), "get");
    assert_eq!(response.path(), Some("Vehicle.OBD.Speed"));
    assert_eq!(log.lock().await.len(), 2);
}
