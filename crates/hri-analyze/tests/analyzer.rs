use hri_analyze::Analyzer;
use hri_model::{Cell, Column, ColumnMapping, Table};

fn salary_table(values: &[f64]) -> (Table, ColumnMapping) {
    let cells: Vec<Cell> = values.iter().map(|value| Cell::Number(*value)).collect();
    let table = Table::from_columns(vec![Column::new("Monthly Salary", cells)]).unwrap();
    let mut mapping = ColumnMapping::new();
    mapping.assign("salary", "Monthly Salary");
    (table, mapping)
}

#[test]
fn twelve_rows_with_one_outlier() {
    let salaries = [
        3000.0, 3200.0, 3400.0, 3600.0, 3800.0, 4000.0, 4200.0, 4400.0, 4600.0, 4800.0, 5000.0,
        50000.0,
    ];
    let names: Vec<Cell> = (0..12).map(|i| Cell::Text(format!("emp-{i}"))).collect();
    let depts: Vec<Cell> = (0..12)
        .map(|i| Cell::Text(if i % 2 == 0 { "Sales" } else { "Ops" }.to_string()))
        .collect();
    let pay: Vec<Cell> = salaries.iter().map(|v| Cell::Number(*v)).collect();
    let mut table = Table::from_columns(vec![
        Column::new("Emp Name", names),
        Column::new("Dept", depts),
        Column::new("Monthly Salary", pay),
    ])
    .unwrap();
    let mut mapping = ColumnMapping::new();
    mapping.assign("employee_name", "Emp Name");
    mapping.assign("department", "Dept");
    mapping.assign("salary", "Monthly Salary");

    let mut analyzer = Analyzer::new(&mut table, &mapping);
    let result = analyzer.analyze_all();

    assert_eq!(result.kpi("total_employees").unwrap().value, "12");
    assert!(
        result
            .warnings
            .iter()
            .any(|warning| warning.contains("salary outliers")),
        "expected an outlier warning, got {:?}",
        result.warnings
    );
    assert_eq!(result.kpi("departments").unwrap().value, "2");
}

#[test]
fn empty_mapping_yields_only_total() {
    let mut table = Table::from_columns(vec![
        Column::new("x1", vec![Cell::Text("a".to_string())]),
        Column::new("x2", vec![Cell::Text("b".to_string())]),
        Column::new("x3", vec![Cell::Text("c".to_string())]),
    ])
    .unwrap();
    let mapping = ColumnMapping::new();
    let mut analyzer = Analyzer::new(&mut table, &mapping);
    let result = analyzer.analyze_all();

    assert_eq!(result.kpis.len(), 1);
    assert_eq!(result.kpis[0].key, "total_employees");
    assert!(result.correlations.is_none());
    assert!(result.insights.is_empty());
}

#[test]
fn correlation_matrix_is_symmetric_with_unit_diagonal() {
    let perf: Vec<Cell> = [3.0, 4.0, 5.0, 2.0, 4.5]
        .iter()
        .map(|v| Cell::Number(*v))
        .collect();
    let pay: Vec<Cell> = [3000.0, 4000.0, 5000.0, 2500.0, 4400.0]
        .iter()
        .map(|v| Cell::Number(*v))
        .collect();
    let mut table = Table::from_columns(vec![
        Column::new("Score", perf),
        Column::new("Pay", pay),
    ])
    .unwrap();
    let mut mapping = ColumnMapping::new();
    mapping.assign("performance_score", "Score");
    mapping.assign("salary", "Pay");

    let mut analyzer = Analyzer::new(&mut table, &mapping);
    let correlations = analyzer.correlations().expect("correlations");

    let n = correlations.fields.len();
    assert_eq!(n, 2);
    for i in 0..n {
        assert_eq!(correlations.matrix[i][i], Some(1.0));
        for j in 0..n {
            assert_eq!(correlations.matrix[i][j], correlations.matrix[j][i]);
        }
    }
    // Strongly correlated test data: exactly one strong pair, no
    // self-pairs, no duplicates.
    assert_eq!(correlations.strong.len(), 1);
    let pair = &correlations.strong[0];
    assert_ne!(pair.field_a, pair.field_b);
    assert!(pair.r > 0.5);
}

#[test]
fn correlation_with_single_pair_is_omitted() {
    // Columns overlap in only one row; r is undefined there.
    let mut table = Table::from_columns(vec![
        Column::new(
            "Score",
            vec![Cell::Number(3.0), Cell::Number(4.0), Cell::Missing],
        ),
        Column::new(
            "Pay",
            vec![Cell::Number(3000.0), Cell::Missing, Cell::Number(4000.0)],
        ),
    ])
    .unwrap();
    let mut mapping = ColumnMapping::new();
    mapping.assign("performance_score", "Score");
    mapping.assign("salary", "Pay");

    let mut analyzer = Analyzer::new(&mut table, &mapping);
    let correlations = analyzer.correlations().expect("correlations");
    assert_eq!(correlations.matrix[0][1], None);
    assert!(correlations.strong.is_empty());
}

#[test]
fn iqr_zero_produces_no_outlier_warning() {
    let (mut table, mapping) = salary_table(&[4000.0; 12]);
    let mut analyzer = Analyzer::new(&mut table, &mapping);
    let warnings = analyzer.warnings();
    assert!(
        !warnings.iter().any(|warning| warning.contains("outlier")),
        "identical salaries must not flag outliers: {warnings:?}"
    );
}

#[test]
fn performance_salary_insight_classifies() {
    let perf: Vec<Cell> = [1.0, 2.0, 3.0, 4.0, 5.0]
        .iter()
        .map(|v| Cell::Number(*v))
        .collect();
    let pay: Vec<Cell> = [1000.0, 2000.0, 3000.0, 4000.0, 5000.0]
        .iter()
        .map(|v| Cell::Number(*v))
        .collect();
    let mut table = Table::from_columns(vec![
        Column::new("Score", perf),
        Column::new("Pay", pay),
    ])
    .unwrap();
    let mut mapping = ColumnMapping::new();
    mapping.assign("performance_score", "Score");
    mapping.assign("salary", "Pay");

    let mut analyzer = Analyzer::new(&mut table, &mapping);
    let insights = analyzer.insights();
    assert!(
        insights
            .iter()
            .any(|insight| insight.ends_with("strong positive")),
        "expected a strong positive classification: {insights:?}"
    );
}

#[test]
fn gender_breakdown_stops_after_first_match() {
    let mut table = Table::from_columns(vec![
        Column::new(
            "Gender",
            vec![
                Cell::Text("F".to_string()),
                Cell::Text("M".to_string()),
                Cell::Text("F".to_string()),
                Cell::Text("F".to_string()),
            ],
        ),
        Column::new(
            "Gender Code",
            vec![
                Cell::Text("1".to_string()),
                Cell::Text("2".to_string()),
                Cell::Text("1".to_string()),
                Cell::Text("1".to_string()),
            ],
        ),
    ])
    .unwrap();
    let mapping = ColumnMapping::new();
    let mut analyzer = Analyzer::new(&mut table, &mapping);
    let insights = analyzer.insights();
    assert_eq!(
        insights,
        vec![
            "F: 75.0% of employees".to_string(),
            "M: 25.0% of employees".to_string(),
        ]
    );
}

#[test]
fn text_salary_column_is_coerced_during_analysis() {
    let cells = vec![
        Cell::Text("4,000".to_string()),
        Cell::Text("3 thousand".to_string()),
        Cell::Text("5000".to_string()),
    ];
    let mut table = Table::from_columns(vec![Column::new("Pay", cells)]).unwrap();
    let mut mapping = ColumnMapping::new();
    mapping.assign("salary", "Pay");

    let mut analyzer = Analyzer::new(&mut table, &mapping);
    let kpis = analyzer.kpis();
    assert!(kpis.iter().any(|kpi| kpi.key == "avg_salary"));
    // The unparseable cell degraded to missing in place.
    assert_eq!(table.column("Pay").unwrap().cells[1], Cell::Missing);
}

#[test]
fn few_records_caution_present() {
    let (mut table, mapping) = salary_table(&[4000.0, 4100.0]);
    let mut analyzer = Analyzer::new(&mut table, &mapping);
    let warnings = analyzer.warnings();
    assert!(warnings.iter().any(|warning| warning.contains("Fewer than 10")));
}
