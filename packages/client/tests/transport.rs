//! Executor tests against a local axum server

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use axum::Router;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use axum::routing::{get, post};
use cekmutasi_client::{
    DebugTrace, RequestBody, TransportConfig, TransportOption, encode_body, execute, parse_header_block,
};
use http::Method;

fn serve() -> String {
    env_logger::try_init().ok();

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    listener.set_nonblocking(true).expect("non-blocking listener");
    let addr = listener.local_addr().expect("local address");

    let app = Router::new()
        .route("/plain", get(|| async { "plain body" }))
        .route("/echo-body", post(|body: String| async move { body }))
        .route(
            "/cookies",
            get(|| async {
                (AppendHeaders([(SET_COOKIE, "a=1; Path=/"), (SET_COOKIE, "b=2; Path=/")]), "ok").into_response()
            }),
        );

    thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("test server runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            axum::serve(listener, app).await.expect("test server");
        });
    });

    format!("http://{addr}")
}

fn config(url: String) -> TransportConfig {
    let mut config = TransportConfig::default();
    config.apply(TransportOption::Url(url));
    config
}

#[test]
fn header_block_precedes_body() {
    let base = serve();
    let mut config = config(format!("{base}/cookies"));
    config.capture_headers = true;

    let raw = execute(&config, &mut DebugTrace::disabled()).expect("request runs");
    let (block, body) = raw.split_headers();
    let block = block.expect("captured header block");

    assert!(block.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(block.ends_with("\r\n\r\n"));
    assert_eq!(&body[..], b"ok");
    assert_eq!(
        parse_header_block(&block).get("set-cookie").map(|v| v.to_vec()),
        Some(vec!["a=1; Path=/".to_string(), "b=2; Path=/".to_string()])
    );
}

#[test]
fn body_only_without_capture() {
    let base = serve();

    let raw = execute(&config(format!("{base}/plain")), &mut DebugTrace::disabled()).expect("request runs");
    assert_eq!(raw.status, 200);
    assert_eq!(raw.header_size, 0);
    assert_eq!(&raw.data[..], b"plain body");
    assert_eq!(raw.content_type.as_deref(), Some("text/plain; charset=utf-8"));
}

#[test]
fn post_fields_are_sent() {
    let base = serve();
    let mut config = config(format!("{base}/echo-body"));
    let body = encode_body(&[("k", "v w")].into(), &[], false, false).expect("encodable");
    assert_eq!(body, RequestBody::Form("k=v+w".to_string()));
    config.apply(TransportOption::Method(Method::POST));
    config.apply(TransportOption::PostFields(body));

    let raw = execute(&config, &mut DebugTrace::disabled()).expect("request runs");
    assert_eq!(&raw.data[..], b"k=v+w");
}

#[test]
fn no_body_get_becomes_head() {
    let base = serve();
    let mut config = config(format!("{base}/plain"));
    config.apply(TransportOption::NoBody(true));
    assert_eq!(config.effective_method(), Method::HEAD);

    let raw = execute(&config, &mut DebugTrace::disabled()).expect("request runs");
    assert_eq!(raw.status, 200);
    assert!(raw.data.is_empty());
}

#[test]
fn verbose_trace_goes_to_file() {
    let base = serve();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("trace.txt");

    let mut trace = DebugTrace::open(Some(&path), true).expect("open trace");
    execute(&config(format!("{base}/plain")), &mut trace).expect("request runs");
    trace.finish();

    let contents = std::fs::read_to_string(&path).expect("read trace");
    assert!(contents.contains("> GET /plain HTTP/1.1"));
    assert!(contents.contains("< HTTP/1.1 200 OK"));
    assert!(contents.contains("* received 10 body bytes"));
}

/// Serves one response whose body stops short of its declared length
fn serve_truncated() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind truncating server");
    let addr = listener.local_addr().expect("local address");

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let response = "HTTP/1.1 200 OK\r\nSet-Cookie: session=abc; Path=/\r\nContent-Length: 100\r\n\r\nshort";
            stream.write_all(response.as_bytes()).ok();
        }
    });

    format!("http://{addr}/partial")
}

#[test]
fn cookie_jar_is_written_when_body_transfer_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let jar = dir.path().join("cookies.json");
    let mut config = config(serve_truncated());
    config.apply(TransportOption::CookieJar(jar.clone()));

    let raw = execute(&config, &mut DebugTrace::disabled()).expect("request runs");
    assert_eq!(raw.status, 200);
    assert!(raw.is_transport_error());

    let saved = std::fs::read_to_string(&jar).expect("jar written");
    assert!(saved.contains("session"));
    assert!(saved.contains("abc"));
}
