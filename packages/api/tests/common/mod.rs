//! Local test server shared by the integration tests
//!
//! The builder blocks, so the axum server runs on its own thread with its own
//! tokio runtime. The listener is bound before the thread starts, so requests
//! made right after `TestServer::start` queue until the server accepts them.

#![allow(dead_code)]

use std::net::{SocketAddr, TcpListener};
use std::thread;
use std::time::Duration;

use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::http::header::{CONTENT_TYPE, SET_COOKIE};
use axum::response::{AppendHeaders, IntoResponse, Redirect};
use axum::routing::get;
use axum::{Json, Router};
use cekmutasi::{Content, Response};
use serde_json::{Value, json};

pub struct TestServer {
    addr: SocketAddr,
}

impl TestServer {
    pub fn start() -> Self {
        env_logger::try_init().ok();

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
        listener.set_nonblocking(true).expect("non-blocking listener");
        let addr = listener.local_addr().expect("local address");

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("test server runtime");

            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                axum::serve(listener, router()).await.expect("test server");
            });
        });

        Self { addr }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

/// URL on a port nothing listens on
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}/gone")
}

fn router() -> Router {
    Router::new()
        .route("/json", get(json_document))
        .route("/not-json", get(not_json))
        .route("/cookies", get(set_cookies))
        .route("/binary", get(binary))
        .route("/redirect", get(|| async { Redirect::to("/json") }))
        .route("/slow", get(slow))
        .route("/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }))
        .fallback(echo)
}

/// Reflects the request back as JSON
async fn echo(request: Request<Body>) -> Json<Value> {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let headers: Vec<Value> = parts
        .headers
        .iter()
        .map(|(name, value)| json!([name.as_str(), String::from_utf8_lossy(value.as_bytes())]))
        .collect();

    Json(json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn json_document() -> Json<Value> {
    Json(json!({ "success": true, "data": [1, 2] }))
}

async fn not_json() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/html")], "<html>oops</html>")
}

async fn set_cookies() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, "session=abc; Path=/"), (SET_COOKIE, "theme=dark; Path=/")]),
        "cookies set",
    )
}

pub fn binary_payload() -> Vec<u8> {
    (0..=255u8).cycle().take(4096).collect()
}

async fn binary() -> Vec<u8> {
    binary_payload()
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(3)).await;
    "too late"
}

/// The echo document of a response decoded with `as_json_response(false)`
pub fn echoed(response: Response) -> Value {
    match response.into_content() {
        Content::Json(value) => value,
        other => panic!("expected an echoed JSON document, got {other:?}"),
    }
}

/// Values of a request header as seen by the server, ignoring name case
pub fn header_values(echo: &Value, name: &str) -> Vec<String> {
    echo["headers"]
        .as_array()
        .into_iter()
        .flatten()
        .filter(|pair| pair[0].as_str().is_some_and(|n| n.eq_ignore_ascii_case(name)))
        .filter_map(|pair| pair[1].as_str().map(str::to_string))
        .collect()
}
