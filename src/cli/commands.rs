//! CLI command implementations

use std::fs;
use std::path::PathBuf;

use colored::Colorize;

use crate::api::run_api_server;
use crate::api::server::ApiConfig;
use crate::core::reference::{normalize_ref, ReferenceParser};
use crate::core::FieldValidator;
use crate::error::{CellmapError, CellmapResult};
use crate::types::{ExistingField, FieldRequest};

/// Execute the check-cell command
pub fn check_cell(reference: String) -> CellmapResult<()> {
    let parser = ReferenceParser::new();
    let normalized = normalize_ref(&reference);

    match parser.parse_cell(&normalized) {
        Ok(cell) => {
            println!("{}", "✅ Valid cell reference".bold().green());
            println!("   Input:      {reference}");
            println!("   Normalized: {cell}");
            println!("   Column:     {} (#{})", cell.letters().cyan(), cell.col());
            println!("   Row:        {}", cell.row());
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "❌ Invalid cell reference:".bold().red(), e);
            Err(e.into())
        }
    }
}

/// Execute the check-range command
pub fn check_range(reference: String) -> CellmapResult<()> {
    let parser = ReferenceParser::new();
    let normalized = normalize_ref(&reference);

    match parser.parse_range(&normalized) {
        Ok(range) => {
            let shape = range.shape();
            println!("{}", "✅ Valid range reference".bold().green());
            println!("   Input:      {reference}");
            println!("   Normalized: {range}");
            println!("   Rows:       {}", shape.row_span);
            println!("   Columns:    {}", shape.col_span);
            println!("   Cells:      {}", shape.cell_count);
            if shape.is_one_dimensional() {
                println!("   {}", "Usable as a range field (1-D)".green());
            } else {
                println!(
                    "   {}",
                    "Not usable as a range field: spans both rows and columns".yellow()
                );
            }
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "❌ Invalid range reference:".bold().red(), e);
            Err(e.into())
        }
    }
}

/// Execute the lint command: run a JSON array of field requests through
/// the validator, each accepted field joining the duplicate context.
pub fn lint(file: PathBuf) -> CellmapResult<()> {
    println!("{}", "🔎 Cellmap - Linting field mappings".bold().green());
    println!("   File: {}", file.display());
    println!();

    let raw = fs::read_to_string(&file)?;
    let requests: Vec<FieldRequest> = serde_json::from_str(&raw)?;

    let validator = FieldValidator::new();
    let mut accepted: Vec<ExistingField> = Vec::new();
    let mut rejected = 0usize;

    for (index, request) in requests.iter().enumerate() {
        let display_label = if request.label.trim().is_empty() {
            format!("#{}", index + 1)
        } else {
            request.label.trim().to_string()
        };
        match validator.validate(request, &accepted) {
            Ok(definition) => {
                println!(
                    "   {} {} → {} ({})",
                    "✅".green(),
                    display_label,
                    definition.mapping.reference().cyan(),
                    definition.mapping.kind()
                );
                accepted.push(ExistingField::from(&definition));
            }
            Err(rejection) => {
                rejected += 1;
                println!(
                    "   {} {} → {}",
                    "❌".red(),
                    display_label,
                    rejection.to_string().red()
                );
            }
        }
    }

    println!();
    if rejected > 0 {
        println!(
            "{}",
            format!("❌ {rejected} of {} field requests rejected", requests.len())
                .bold()
                .red()
        );
        Err(CellmapError::Validation(format!(
            "{rejected} of {} field requests rejected",
            requests.len()
        )))
    } else {
        println!(
            "{}",
            format!("✅ All {} field requests valid", requests.len())
                .bold()
                .green()
        );
        Ok(())
    }
}

/// Execute the serve command
pub fn serve(host: String, port: u16) -> CellmapResult<()> {
    let config = ApiConfig { host, port };
    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(run_api_server(config))
        .map_err(|e| CellmapError::Server(e.to_string()))
}
