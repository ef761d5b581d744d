//! Declarative chart construction.
//!
//! Decides which charts the mapped data supports and packages their data;
//! rendering belongs entirely to the presentation layer.

use hri_model::{ChartData, ChartSpec, ColumnMapping, Table};

use crate::analyzer::Analyzer;
use crate::stats;

const HISTOGRAM_BINS: usize = 30;
const DEPARTMENT_CAP: usize = 15;
const LOCATION_CAP: usize = 10;
const POSITION_CAP: usize = 15;

/// Build every chart the current mapping supports.
pub fn build_charts(table: &mut Table, mapping: &ColumnMapping) -> Vec<ChartSpec> {
    let mut charts = Vec::new();

    if let Some(chart) = category_chart(
        table,
        mapping,
        "department",
        "Employees by department",
        DEPARTMENT_CAP,
    ) {
        charts.push(chart);
    }
    if let Some(chart) = salary_histogram(table, mapping) {
        charts.push(chart);
    }
    if let Some(chart) = performance_summary(table, mapping) {
        charts.push(chart);
    }
    if let Some(chart) = salary_performance_scatter(table, mapping) {
        charts.push(chart);
    }
    if let Some(chart) = category_chart(
        table,
        mapping,
        "location",
        "Employees by location",
        LOCATION_CAP,
    ) {
        charts.push(chart);
    }
    if let Some(chart) = category_chart(
        table,
        mapping,
        "position",
        "Employees by position",
        POSITION_CAP,
    ) {
        charts.push(chart);
    }

    charts
}

fn category_chart(
    table: &mut Table,
    mapping: &ColumnMapping,
    field: &str,
    title: &str,
    cap: usize,
) -> Option<ChartSpec> {
    let analyzer = Analyzer::new(table, mapping);
    let mut counts = analyzer.category_counts(field)?;
    counts.truncate(cap);
    Some(ChartSpec {
        title: title.to_string(),
        available: true,
        data: ChartData::CategoryCounts {
            field: field.to_string(),
            counts,
        },
    })
}

fn salary_histogram(table: &mut Table, mapping: &ColumnMapping) -> Option<ChartSpec> {
    let values = mapped_numbers(table, mapping, "salary")?;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let (edges, counts) = if max > min {
        let width = (max - min) / HISTOGRAM_BINS as f64;
        let mut counts = vec![0usize; HISTOGRAM_BINS];
        for value in &values {
            let index = (((value - min) / width) as usize).min(HISTOGRAM_BINS - 1);
            counts[index] += 1;
        }
        let edges = (0..=HISTOGRAM_BINS)
            .map(|i| min + width * i as f64)
            .collect();
        (edges, counts)
    } else {
        (vec![min, min + 1.0], vec![values.len()])
    };

    Some(ChartSpec {
        title: "Salary distribution".to_string(),
        available: true,
        data: ChartData::Histogram {
            field: "salary".to_string(),
            edges,
            counts,
            mean: stats::mean(&values),
        },
    })
}

fn performance_summary(table: &mut Table, mapping: &ColumnMapping) -> Option<ChartSpec> {
    let values = mapped_numbers(table, mapping, "performance_score")?;
    Some(ChartSpec {
        title: "Performance score distribution".to_string(),
        available: true,
        data: ChartData::Summary {
            field: "performance_score".to_string(),
            summary: stats::summarize(&values)?,
        },
    })
}

fn salary_performance_scatter(table: &mut Table, mapping: &ColumnMapping) -> Option<ChartSpec> {
    // Coerce both columns first so the paired walk sees numbers.
    mapped_numbers(table, mapping, "performance_score")?;
    mapped_numbers(table, mapping, "salary")?;
    let perf_column = mapping.column_for("performance_score")?;
    let salary_column = mapping.column_for("salary")?;
    let perf = &table.column(perf_column)?.cells;
    let salary = &table.column(salary_column)?.cells;

    let points: Vec<[f64; 2]> = perf
        .iter()
        .zip(salary)
        .filter_map(|(x, y)| Some([x.as_number()?, y.as_number()?]))
        .collect();
    if points.is_empty() {
        return None;
    }
    let x: Vec<f64> = points.iter().map(|point| point[0]).collect();
    let y: Vec<f64> = points.iter().map(|point| point[1]).collect();

    Some(ChartSpec {
        title: "Salary vs performance".to_string(),
        available: true,
        data: ChartData::Scatter {
            x_field: "performance_score".to_string(),
            y_field: "salary".to_string(),
            points,
            trend: stats::linear_fit(&x, &y),
            r: stats::pearson(&x, &y),
        },
    })
}

fn mapped_numbers(table: &mut Table, mapping: &ColumnMapping, field: &str) -> Option<Vec<f64>> {
    let mut analyzer = Analyzer::new(table, mapping);
    analyzer.numeric_values(field)
}
