use std::collections::BTreeMap;

use hri_ingest::FileInfo;
use hri_model::{AnalysisResult, ChartSpec, ColumnMapping, ColumnProfile, Table};

/// Everything produced by one analyze pass.
///
/// The session is rebuilt from scratch for every file (and for every mapping
/// change); nothing here outlives the run or is shared between runs.
pub struct Session {
    pub table: Table,
    pub info: FileInfo,
    pub mapping: ColumnMapping,
    pub profiles: BTreeMap<String, ColumnProfile>,
    pub analysis: AnalysisResult,
    pub charts: Vec<ChartSpec>,
    pub report: String,
}
