//! Tour of the request builder against httpbin.org.
//!
//! ```sh
//! cargo run --example fluent_builder
//! ```

use cekmutasi::{Content, RequestBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // GET with query data, decoded into a JSON value
    let content = RequestBuilder::new()
        .to("https://httpbin.org/get")
        .with_data([("page", 1), ("limit", 20)])
        .as_json_response(false)
        .get()?
        .into_content();
    if let Content::Json(value) = &content {
        println!("🔍 query echoed back: {}", value["args"]);
    }

    // JSON POST with a structured result and captured headers
    let result = RequestBuilder::new()
        .to("https://httpbin.org/post")
        .with_data(serde_json::json!({ "name": "Budi", "roles": ["admin"] }))
        .with_bearer("demo-token")
        .as_json(true)
        .with_response_headers()
        .return_response_object()
        .post()?
        .into_object();
    if let Some(result) = result {
        println!("📤 POST status {}", result.status);
        if let Some(headers) = &result.headers {
            println!("   server: {:?}", headers.get("server"));
        }
    }

    // Transport failures are data, not errors
    let unreachable = RequestBuilder::new()
        .to("http://127.0.0.1:9/")
        .with_connect_timeout(1.0)
        .return_response_object()
        .get()?
        .into_object();
    if let Some(result) = unreachable {
        println!("⚠️  status {} error {:?}", result.status, result.error);
    }

    // Download to a file with a verbose trace next to it
    RequestBuilder::new()
        .to("https://httpbin.org/bytes/1024")
        .enable_debug("fluent_builder.debug.txt")
        .download("fluent_builder.bin")?;
    println!("💾 saved fluent_builder.bin (trace in fluent_builder.debug.txt)");

    Ok(())
}
