//! Export OpenAPI specification to static JSON file
//!
//! Usage: cargo run --bin export_openapi
//!
//! Generates docs/openapi.json for client generation and API linting.

use ongkir_proxy::docs::ProxyApiDoc;
use std::fs;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let spec = ProxyApiDoc::openapi();
    let json = spec.to_pretty_json()?;

    fs::create_dir_all("docs")?;
    fs::write("docs/openapi.json", json)?;

    println!("Exported OpenAPI spec to docs/openapi.json");
    Ok(())
}
