use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cellmap::cli;
use cellmap::error::CellmapResult;

#[derive(Parser)]
#[command(name = "cellmap")]
#[command(about = "Map spreadsheet template cells to extractable fields")]
#[command(long_about = "Cellmap - A1 reference validation and field mapping

Define extractable fields over spreadsheet templates: a field is either a
single cell (B5) or a one-dimensional range (C10:C29).

COMMANDS:
  check-cell  - Parse and explain a single A1 cell reference
  check-range - Parse a range reference and show its shape
  lint        - Validate a JSON file of field mapping requests
  serve       - Run the HTTP field-mapping API

EXAMPLES:
  cellmap check-cell B5
  cellmap check-range C10:C29
  cellmap lint fields.json
  cellmap serve --port 3000

Docs: https://github.com/mouvify/cellmap")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and explain a single A1 cell reference
    CheckCell {
        /// Cell reference (e.g. B5); trimmed and upper-cased before parsing
        reference: String,
    },

    /// Parse a range reference and show its shape
    CheckRange {
        /// Range reference (e.g. C10:C29); corner order does not matter
        reference: String,
    },

    #[command(long_about = "Validate a JSON file of field mapping requests.

The file holds an array of field requests in the same shape the HTTP API
accepts:

  [
    { \"kind\": \"single\", \"label\": \"Batch id\", \"field_type\": \"text\",
      \"cell_ref\": \"B5\" },
    { \"kind\": \"range\", \"label\": \"Tablet weights\", \"field_type\": \"number\",
      \"range_ref\": \"C10:C29\",
      \"validation\": { \"expected_count\": 20 } }
  ]

Requests are validated in order and each accepted field joins the
duplicate-check context, so a file that redefines a reference fails the
same way two API calls would. Exit code is non-zero if any request is
rejected.")]
    /// Validate a JSON file of field mapping requests
    Lint {
        /// Path to a JSON array of field requests
        file: PathBuf,
    },

    /// Run the HTTP field-mapping API
    Serve {
        /// Host address to bind to (use 0.0.0.0 for all interfaces)
        #[arg(short = 'H', long, default_value = "127.0.0.1", env = "CELLMAP_HOST")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080", env = "CELLMAP_PORT")]
        port: u16,
    },
}

fn main() -> CellmapResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckCell { reference } => cli::check_cell(reference),
        Commands::CheckRange { reference } => cli::check_range(reference),
        Commands::Lint { file } => cli::lint(file),
        Commands::Serve { host, port } => cli::serve(host, port),
    }
}
