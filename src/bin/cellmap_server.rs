//! Cellmap API server binary
//!
//! HTTP REST API for template field mapping.

use clap::Parser;
use cellmap::api::{run_api_server, server::ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "cellmap-server")]
#[command(version)]
#[command(about = "Cellmap API server - HTTP REST API for template field mapping")]
#[command(long_about = r#"
Cellmap API server

Endpoints:
  - GET    /api/health                                - Health check
  - GET    /api/templates                             - List templates
  - POST   /api/templates                             - Register template metadata
  - GET    /api/templates/{id}/fields                 - List a template's fields
  - POST   /api/templates/{id}/fields                 - Validate and store a field
  - DELETE /api/templates/{id}/fields/{field_id}      - Remove a field

Validation failures return 400 with a stable reason code; duplicate
references return 409. Error bodies are {"error": <code>, "detail": <text>}.

Features:
  - CORS enabled for cross-origin requests
  - Graceful shutdown on SIGINT/SIGTERM
  - Tracing and structured logging

Example usage:
  cellmap-server                           # Start on localhost:8080
  cellmap-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/templates \
    -H "Content-Type: application/json" \
    -d '{"name": "batch-record", "original_name": "batch.xlsx",
         "mime_type": "application/vnd.ms-excel", "size_bytes": 12345}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "CELLMAP_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "CELLMAP_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
    };

    run_api_server(config).await
}
