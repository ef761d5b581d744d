//! The analyze pipeline with explicit stages.
//!
//! 1. **Load**: read the file, resolve the encoding, coerce column types
//! 2. **Map**: detect the column mapping, overlay any saved configuration
//! 3. **Analyze**: KPIs, distributions, correlations, insights, warnings,
//!    chart specs
//! 4. **Render**: assemble the plain-text report
//!
//! Each stage takes the output of the previous stage and returns typed
//! results; re-running the pipeline recomputes everything downstream.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use hri_analyze::{Analyzer, build_charts};
use hri_ingest::{LoadedFile, build_column_profiles, load_file};
use hri_map::{MappingEngine, load_mapping_config};
use hri_model::{AnalysisResult, ChartSpec, ColumnMapping, MappingConfig, Table};

use crate::types::Session;

/// Stage 1: load and coerce one tabular file.
pub fn load(path: &Path) -> Result<LoadedFile> {
    let span = info_span!("load", file = %path.display());
    let _guard = span.enter();
    load_file(path).with_context(|| format!("load {}", path.display()))
}

/// Read a saved mapping configuration, treating every failure as soft.
pub fn load_saved_mapping(path: Option<&Path>) -> Option<MappingConfig> {
    let path = path?;
    match load_mapping_config(path) {
        Ok(Some(config)) => Some(config),
        Ok(None) => {
            info!(path = %path.display(), "no previous mapping configuration");
            None
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "ignoring unreadable mapping configuration");
            None
        }
    }
}

/// Stage 2: detect the mapping and overlay saved assignments, which win.
pub fn resolve_mapping(table: &Table, saved: Option<&MappingConfig>) -> ColumnMapping {
    let engine = MappingEngine::with_default_catalog();
    let mut mapping = engine.detect(table);
    if let Some(config) = saved {
        mapping.merge_over(&config.column_mapping);
    }
    info!(fields = mapping.len(), "column mapping resolved");
    mapping
}

/// Stage 3: run the analyzer and build the chart specs.
pub fn analyze(table: &mut Table, mapping: &ColumnMapping) -> (AnalysisResult, Vec<ChartSpec>) {
    let span = info_span!("analyze");
    let _guard = span.enter();
    let result = Analyzer::new(table, mapping).analyze_all();
    let charts = build_charts(table, mapping);
    (result, charts)
}

/// Run the whole pipeline for one file.
pub fn run(path: &Path, saved: Option<&MappingConfig>) -> Result<Session> {
    let LoadedFile { mut table, info } = load(path)?;
    let mapping = resolve_mapping(&table, saved);
    let profiles = build_column_profiles(&table);
    let (analysis, charts) = analyze(&mut table, &mapping);
    let report = hri_report::generate_report(&mut table, &mapping);
    Ok(Session {
        table,
        info,
        mapping,
        profiles,
        analysis,
        charts,
        report,
    })
}
