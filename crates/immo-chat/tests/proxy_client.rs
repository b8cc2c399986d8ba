//! Drives [`ProxyClient`] against a local axum stand-in for the proxy.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use immo_chat::api::{ApiClientError, ChatApi, ProxyClient};
use serde_json::{Value, json};

#[derive(Default)]
struct Received(Mutex<Vec<Value>>);

async fn spawn_proxy(status: StatusCode, response: Value) -> (String, Arc<Received>) {
    let received = Arc::new(Received::default());
    let app = Router::new()
        .route(
            "/api/chat",
            post(
                move |State(received): State<Arc<Received>>, Json(body): Json<Value>| {
                    let response = response.clone();
                    async move {
                        received.0.lock().unwrap().push(body);
                        (status, Json(response))
                    }
                },
            ),
        )
        .with_state(Arc::clone(&received));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), received)
}

#[tokio::test]
async fn posts_message_and_returns_reply() {
    let (base, received) = spawn_proxy(StatusCode::OK, json!({ "reply": "Bonjour !" })).await;
    let client = ProxyClient::new(&format!("{base}/"));

    let reply = client.send("Salut").await.unwrap();

    assert_eq!(reply, "Bonjour !");
    assert_eq!(client.endpoint(), format!("{base}/api/chat"));
    assert_eq!(*received.0.lock().unwrap(), vec![json!({ "message": "Salut" })]);
}

#[tokio::test]
async fn non_string_reply_is_shown_as_json_text() {
    let (base, _) = spawn_proxy(StatusCode::OK, json!({ "reply": { "prix": 12 } })).await;
    let client = ProxyClient::new(&base);

    let reply = client.send("Salut").await.unwrap();

    assert_eq!(reply, r#"{"prix":12}"#);
}

#[tokio::test]
async fn error_status_is_reported() {
    let (base, _) = spawn_proxy(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "Failed to contact assistant." }),
    )
    .await;
    let client = ProxyClient::new(&base);

    let err = client.send("Salut").await.unwrap_err();

    assert!(matches!(err, ApiClientError::Status(500)));
}

#[tokio::test]
async fn unreachable_proxy_is_an_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ProxyClient::new(&format!("http://{addr}"));
    let err = client.send("Salut").await.unwrap_err();

    assert!(matches!(err, ApiClientError::Http(_)));
}
