//! Print the gateway's OpenAPI document
//!
//! Usage:
//!   export_openapi                      # JSON on stdout
//!   export_openapi --output openapi.json

use anyhow::Context;
use tx_demo::gateway::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let output_path = match args.as_slice() {
        [_, flag, path, ..] if flag == "--output" => Some(path.as_str()),
        _ => None,
    };

    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("Failed to serialize OpenAPI document")?;

    match output_path {
        Some(path) => {
            std::fs::write(path, &json).with_context(|| format!("Failed to write {}", path))?;
            eprintln!("✅ OpenAPI document written to: {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
