//! Integration tests for the pipeline module.

use std::io::Write;

use tempfile::NamedTempFile;

use hri_cli::pipeline;
use hri_model::{ColumnMapping, MappingConfig};

fn temp_csv(contents: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp file");
    file.write_all(contents).expect("write temp file");
    file
}

#[test]
fn analyzes_a_conventional_employee_file() {
    let mut contents = String::from("Emp Name,Dept,Monthly Salary\n");
    let salaries = [
        3000, 3200, 3400, 3600, 3800, 4000, 4200, 4400, 4600, 4800, 5000, 50000,
    ];
    for (index, salary) in salaries.iter().enumerate() {
        let dept = if index % 2 == 0 { "Sales" } else { "Ops" };
        contents.push_str(&format!("Employee {index},{dept},{salary}\n"));
    }
    let file = temp_csv(contents.as_bytes());

    let session = pipeline::run(file.path(), None).expect("pipeline run");

    assert_eq!(session.mapping.column_for("employee_name"), Some("Emp Name"));
    assert_eq!(session.mapping.column_for("department"), Some("Dept"));
    assert_eq!(session.mapping.column_for("salary"), Some("Monthly Salary"));
    assert_eq!(
        session.analysis.kpi("total_employees").unwrap().value,
        "12"
    );
    assert!(
        session
            .analysis
            .warnings
            .iter()
            .any(|warning| warning.contains("salary outliers")),
        "expected an outlier warning: {:?}",
        session.analysis.warnings
    );
    assert!(session.report.contains("HR Analytics Report"));
}

#[test]
fn loads_arabic_codepage_files() {
    // "الاسم,الراتب" header in Windows-1256 followed by ASCII rows.
    let mut bytes: Vec<u8> = Vec::new();
    bytes.extend_from_slice(&[0xC7, 0xE1, 0xC7, 0xD3, 0xE3]);
    bytes.push(b',');
    bytes.extend_from_slice(&[0xC7, 0xE1, 0xD1, 0xC7, 0xCA, 0xC8]);
    bytes.extend_from_slice(b"\nAhmed,4200\nSara,3100\n");
    let file = temp_csv(&bytes);

    let session = pipeline::run(file.path(), None).expect("pipeline run");
    assert_eq!(session.table.row_count(), 2);
    // The Arabic headers map to the name and salary fields.
    assert!(session.mapping.is_mapped("employee_name"));
    assert!(session.mapping.is_mapped("salary"));
}

#[test]
fn unrecognizable_columns_degrade_to_total_only() {
    let file = temp_csv(b"x1,x2,x3\nfoo,bar,baz\nqux,quux,corge\n");
    let session = pipeline::run(file.path(), None).expect("pipeline run");

    assert!(session.mapping.is_empty());
    assert_eq!(session.analysis.kpis.len(), 1);
    assert_eq!(session.analysis.kpis[0].key, "total_employees");
    assert!(session.analysis.correlations.is_none());
    assert!(!session.report.is_empty());
}

#[test]
fn saved_mapping_overlays_detection() {
    let file = temp_csv(b"Emp Name,Extra\nAhmed,9\nSara,8\n");
    let mut saved_mapping = ColumnMapping::new();
    saved_mapping.assign("employee_name", "Extra");
    let saved = MappingConfig {
        column_mapping: saved_mapping,
        saved_at: "2024-06-01T10:00:00+00:00".to_string(),
    };

    let session = pipeline::run(file.path(), Some(&saved)).expect("pipeline run");
    assert_eq!(session.mapping.column_for("employee_name"), Some("Extra"));
}

#[test]
fn missing_config_path_is_soft() {
    assert!(
        pipeline::load_saved_mapping(Some(std::path::Path::new(
            "/nonexistent/config.json"
        )))
        .is_none()
    );
    assert!(pipeline::load_saved_mapping(None).is_none());
}
