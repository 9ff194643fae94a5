//! Integration tests for the client-side sending pipeline

use apidiff_telemetry::{
    CommandInfo, Collector, Envelope, TelemetryConfig, TelemetryError, KEY_EVENTS, REDACTED,
};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Throwaway local collection endpoint: captures every posted envelope and
/// answers with a fixed status.
async fn spawn_capture_server(status: StatusCode) -> (String, mpsc::UnboundedReceiver<Envelope>) {
    let (tx, rx) = mpsc::unbounded_channel::<Envelope>();

    let app = Router::new().route(
        "/events",
        post(move |Json(envelope): Json<Envelope>| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(envelope);
                status
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/events"), rx)
}

fn config_for(endpoint: String) -> TelemetryConfig {
    TelemetryConfig {
        enabled: true,
        debug: false,
        endpoint: Some(endpoint),
    }
}

#[tokio::test]
async fn test_send_command_end_to_end() {
    let (endpoint, mut rx) = spawn_capture_server(StatusCode::CREATED).await;
    let collector = Collector::new(&config_for(endpoint));

    let command = CommandInfo::new("diff")
        .arg("https://aerial-data-production.herokuapp.com/bank/api/openapi3.json")
        .arg("https://app.swaggerhub.com/apis/g4/Banking/1.7.56")
        .flag("composed", true)
        .flag("match-path", "a/b/c")
        .flag("max-circular-dep", 7);

    collector.send_command("v1.2.3", &command).await.unwrap();

    let envelope = rx.recv().await.unwrap();
    assert_eq!(envelope.len(), 1);

    let events = &envelope[KEY_EVENTS];
    assert_eq!(events.len(), 1);

    let event = &events[0];
    assert!(!event.id.is_empty());
    assert!(!event.machine_id.is_empty());
    assert!(!event.runtime.is_empty());
    assert!(!event.platform.is_empty());
    assert_eq!(event.command, "diff");
    assert_eq!(event.application, "apidiff-cli");
    assert_eq!(event.application_version, "v1.2.3");
    assert_eq!(event.args, vec!["heroku", "swaggerhub"]);
    assert_eq!(event.flags.len(), 3);
    assert_eq!(event.flags["composed"], "true");
    assert_eq!(event.flags["match-path"], REDACTED);
    assert_eq!(event.flags["max-circular-dep"], "7");
}

#[tokio::test]
async fn test_custom_denylist_protects_chosen_flags() {
    let (endpoint, mut rx) = spawn_capture_server(StatusCode::CREATED).await;
    let denylist = std::collections::HashSet::from(["out".to_string()]);
    let collector = Collector::with_denylist(&config_for(endpoint), denylist);

    let command = CommandInfo::new("diff")
        .flag("out", "/home/user/report.html")
        .flag("match-path", "a/b/c");

    collector.send_command("v1.2.3", &command).await.unwrap();

    let envelope = rx.recv().await.unwrap();
    let event = &envelope[KEY_EVENTS][0];
    assert_eq!(event.flags["out"], REDACTED);
    // Not on this collector's denylist, so it passes through.
    assert_eq!(event.flags["match-path"], "a/b/c");
}

#[tokio::test]
async fn test_unexpected_status_is_an_error() {
    let (endpoint, _rx) = spawn_capture_server(StatusCode::OK).await;
    let collector = Collector::new(&config_for(endpoint));

    let result = collector
        .send_command("v1.2.3", &CommandInfo::new("diff"))
        .await;

    match result {
        Err(TelemetryError::UnexpectedStatus(status)) => assert_eq!(status, StatusCode::OK),
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_failure_is_a_transport_error() {
    // Nothing listens on the discard port.
    let collector = Collector::new(&config_for("http://127.0.0.1:9/events".to_string()));

    let result = collector
        .send_command("v1.2.3", &CommandInfo::new("diff"))
        .await;

    assert!(matches!(result, Err(TelemetryError::Transport(_))));
}

#[tokio::test]
async fn test_debug_mode_prints_instead_of_sending() {
    let (endpoint, mut rx) = spawn_capture_server(StatusCode::CREATED).await;
    let config = TelemetryConfig {
        enabled: true,
        debug: true,
        endpoint: Some(endpoint),
    };
    let collector = Collector::new(&config);

    collector
        .send_command("v1.2.3", &CommandInfo::new("diff").arg("./spec.yaml"))
        .await
        .unwrap();

    assert!(rx.try_recv().is_err());
}
