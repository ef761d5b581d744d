//! Plain-text report assembly.
//!
//! The report is rebuilt from freshly recomputed analysis sub-results and
//! must always yield text: a failure during assembly is replaced by a
//! minimal diagnostic block naming the table shape and the mapping.

use std::panic::AssertUnwindSafe;

use chrono::NaiveDateTime;

use hri_analyze::{Analyzer, format_currency};
use hri_model::{ColumnMapping, Table};

const RULE_HEAVY: &str =
    "================================================================================";
const RULE_LIGHT: &str =
    "--------------------------------------------------------------------------------";

const DEPARTMENT_TOP: usize = 5;

const RECOMMENDATIONS: [&str; 5] = [
    "Review the salary structure for internal fairness",
    "Tie bonus and reward programs to performance",
    "Analyze talent distribution across departments",
    "Address missing values in the source data",
    "Revisit hiring policies based on the analysis",
];

/// Generate the full report with the current timestamp.
///
/// Never fails: an assembly panic is replaced by [`fallback_report`].
pub fn generate_report(table: &mut Table, mapping: &ColumnMapping) -> String {
    let row_count = table.row_count();
    let column_count = table.column_count();
    let generated_at = chrono::Local::now().naive_local();
    report_or_fallback(row_count, column_count, mapping, || {
        render_report_at(table, mapping, generated_at)
    })
}

/// Run a report renderer, substituting the diagnostic fallback when it
/// panics mid-assembly.
pub fn report_or_fallback<F>(
    row_count: usize,
    column_count: usize,
    mapping: &ColumnMapping,
    render: F,
) -> String
where
    F: FnOnce() -> String,
{
    match std::panic::catch_unwind(AssertUnwindSafe(render)) {
        Ok(text) => text,
        Err(_) => fallback_report(row_count, column_count, mapping),
    }
}

/// Render the report for a fixed generation timestamp.
pub fn render_report_at(
    table: &mut Table,
    mapping: &ColumnMapping,
    generated_at: NaiveDateTime,
) -> String {
    let row_count = table.row_count();
    let column_count = table.column_count();

    let mut analyzer = Analyzer::new(table, mapping);
    let kpis = analyzer.kpis();
    let insights = analyzer.insights();
    let warnings = analyzer.warnings();
    let department_counts = analyzer.category_counts("department");
    let salary_values = analyzer.numeric_values("salary");

    let mut lines: Vec<String> = Vec::new();
    lines.push(RULE_HEAVY.to_string());
    lines.push("HR Analytics Report".to_string());
    lines.push(RULE_HEAVY.to_string());
    lines.push(format!(
        "Generated: {}",
        generated_at.format("%Y-%m-%d %H:%M")
    ));
    lines.push(RULE_LIGHT.to_string());
    lines.push(String::new());

    lines.push("📋 General information:".to_string());
    lines.push(format!("   • Employees: {row_count}"));
    lines.push(format!("   • Columns: {column_count}"));
    if !mapping.is_empty() {
        lines.push(format!(
            "   • Columns in use: {} of {}",
            mapping.len(),
            column_count
        ));
    }
    lines.push(String::new());

    lines.push("📊 Key performance indicators:".to_string());
    for kpi in &kpis {
        lines.push(format!("   {} {}: {}", kpi.icon, kpi.label, kpi.value));
    }
    lines.push(String::new());

    if !insights.is_empty() {
        lines.push("💡 Insights:".to_string());
        for insight in &insights {
            lines.push(format!("   • {insight}"));
        }
        lines.push(String::new());
    }

    if !warnings.is_empty() {
        lines.push("⚠️ Data quality warnings:".to_string());
        for warning in &warnings {
            lines.push(format!("   • {warning}"));
        }
        lines.push(String::new());
    }

    if let Some(counts) = department_counts {
        lines.push("🏢 Employees by department:".to_string());
        for entry in counts.iter().take(DEPARTMENT_TOP) {
            let pct = if row_count == 0 {
                0.0
            } else {
                entry.count as f64 / row_count as f64 * 100.0
            };
            lines.push(format!(
                "   • {}: {} employees ({pct:.1}%)",
                entry.value, entry.count
            ));
        }
        lines.push(String::new());
    }

    if let Some(values) = salary_values {
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let std_dev = hri_analyze::stats::std_dev(&values).unwrap_or(0.0);
        lines.push("💰 Salary summary:".to_string());
        lines.push(format!("   • Highest: {}", format_currency(max)));
        lines.push(format!("   • Lowest: {}", format_currency(min)));
        lines.push(format!("   • Average: {}", format_currency(mean)));
        lines.push(format!("   • Std deviation: {}", format_currency(std_dev)));
        lines.push(String::new());
    }

    lines.push("✅ Recommendations:".to_string());
    for (index, recommendation) in RECOMMENDATIONS.iter().enumerate() {
        lines.push(format!("   {}. {recommendation}", index + 1));
    }
    lines.push(String::new());

    lines.push(RULE_HEAVY.to_string());
    lines.push("Notes:".to_string());
    lines.push(
        "   • This report was generated automatically by the HR insight dashboard".to_string(),
    );
    lines.push("   • Questions: HR data analysis team".to_string());
    lines.push(RULE_HEAVY.to_string());

    lines.join("\n")
}

/// Minimal diagnostic text emitted when report assembly fails.
pub fn fallback_report(row_count: usize, column_count: usize, mapping: &ColumnMapping) -> String {
    let mapped = if mapping.is_empty() {
        "none".to_string()
    } else {
        mapping
            .iter()
            .map(|(field, column)| format!("{field} -> {column}"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "{RULE_HEAVY}\n\
         Report generation failed\n\
         {RULE_HEAVY}\n\
         An internal error interrupted report assembly.\n\
         \n\
         Available data:\n\
         - Rows: {row_count}\n\
         - Columns: {column_count}\n\
         - Mapped fields: {mapped}\n\
         \n\
         Please check the data and try again.\n\
         {RULE_HEAVY}"
    )
}
