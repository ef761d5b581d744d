use anyhow::Result;
use comfy_table::Table;
use tracing::warn;

use hri_cli::pipeline;
use hri_cli::types::Session;
use hri_map::{default_catalog, save_mapping_config};
use hri_report::{write_analysis_json, write_csv_export, write_report};

use crate::cli::AnalyzeArgs;
use crate::summary::apply_table_style;

pub fn run_analyze(args: &AnalyzeArgs) -> Result<Session> {
    let saved = pipeline::load_saved_mapping(args.mapping_config.as_deref());
    let session = pipeline::run(&args.file, saved.as_ref())?;

    if let Some(path) = &args.report {
        write_report(&session.report, path)?;
        println!("Report written to {}", path.display());
    }
    if let Some(path) = &args.export_csv {
        write_csv_export(&session.table, path)?;
        println!("Table exported to {}", path.display());
    }
    if let Some(path) = &args.json {
        write_analysis_json(&session.analysis, path)?;
        println!("Analysis written to {}", path.display());
    }
    if let Some(path) = &args.save_config {
        // Saving preferences is never worth failing an otherwise good run.
        if let Err(error) = save_mapping_config(path, &session.mapping) {
            warn!(path = %path.display(), %error, "could not save mapping configuration");
        }
    }

    Ok(session)
}

pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Patterns", "Keywords"]);
    apply_table_style(&mut table);
    for field in default_catalog() {
        table.add_row(vec![
            field.key.clone(),
            field.patterns.join(", "),
            field.keywords.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}
