//! Print the REST API's OpenAPI document as JSON.
//!
//! `cargo run -p server --bin gen-openapi --features server > openapi.json`

use server::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), serde_json::Error> {
    let doc = ApiDoc::openapi().to_pretty_json()?;
    println!("{doc}");
    Ok(())
}
