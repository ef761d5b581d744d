//! The flexible analyzer.
//!
//! Every sub-computation is gated on its own inputs: when a field is
//! unmapped, its column is gone, or the values do not coerce, that
//! sub-result is absent and the rest of the analysis proceeds.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::debug;

use hri_ingest::{DATE_FORMATS, parse_numeric};
use hri_model::{
    AnalysisResult, CategoryCount, Cell, ColumnMapping, CorrelationData, Distributions, Kpi,
    StrongPair, Table,
};

use crate::stats;

/// Minimum paired observations for a correlation to be defined.
const MIN_CORRELATION_OBS: usize = 2;

/// Maximum column names quoted in the missing-values warning.
const MISSING_WARNING_NAMES: usize = 5;

/// Missing-value ratio above which a column is flagged.
const MISSING_WARNING_RATIO: f64 = 0.2;

/// Distinct-value cap for the gender breakdown insight.
const GENDER_MAX_DISTINCT: usize = 5;

const GENDER_KEYWORDS: [&str; 4] = ["gender", "sex", "جنس", "الجنس"];

/// Analyzer over one table and its resolved mapping.
///
/// Holds the table mutably: numeric and date coercion of mapped columns
/// happens in place while analyzing, and is idempotent.
pub struct Analyzer<'a> {
    table: &'a mut Table,
    mapping: &'a ColumnMapping,
}

impl<'a> Analyzer<'a> {
    pub fn new(table: &'a mut Table, mapping: &'a ColumnMapping) -> Self {
        Self { table, mapping }
    }

    /// Run every available analysis.
    pub fn analyze_all(&mut self) -> AnalysisResult {
        let kpis = self.kpis();
        let distributions = self.distributions();
        let correlations = self.correlations();
        let insights = self.insights();
        let warnings = self.warnings();
        debug!(
            kpis = kpis.len(),
            insights = insights.len(),
            warnings = warnings.len(),
            "analysis complete"
        );
        AnalysisResult {
            kpis,
            distributions,
            correlations,
            insights,
            warnings,
        }
    }

    /// Key performance indicators for the fields that are mapped and usable.
    pub fn kpis(&mut self) -> Vec<Kpi> {
        let mut kpis = Vec::new();
        kpis.push(Kpi::new(
            "total_employees",
            group_thousands(self.table.row_count() as u64),
            "Total employees",
            "👥",
        ));

        if let Some(values) = self.numeric_values("salary") {
            if let Some(mean) = stats::mean(&values) {
                kpis.push(Kpi::new(
                    "avg_salary",
                    format_currency(mean),
                    "Average salary",
                    "💰",
                ));
            }
            if let Some(median) = stats::median(&values) {
                kpis.push(Kpi::new(
                    "median_salary",
                    format_currency(median),
                    "Median salary",
                    "📊",
                ));
            }
        }

        if let Some(count) = self.distinct_count("department") {
            kpis.push(Kpi::new(
                "departments",
                count.to_string(),
                "Departments",
                "🏢",
            ));
        }

        if let Some(values) = self.numeric_values("performance_score")
            && let Some(mean) = stats::mean(&values)
        {
            kpis.push(Kpi::new(
                "avg_performance",
                format!("{mean:.1}/5"),
                "Average performance",
                "📈",
            ));
        }

        if let Some(dates) = self.force_dates("hire_date") {
            let today = chrono::Local::now().date_naive();
            let day_counts: Vec<f64> = dates
                .iter()
                .map(|date| (today - *date).num_days() as f64)
                .collect();
            if let Some(mean_days) = stats::mean(&day_counts) {
                kpis.push(Kpi::new(
                    "avg_tenure",
                    format!("{:.1} years", mean_days / 365.25),
                    "Average tenure",
                    "⏳",
                ));
            }
        }

        kpis
    }

    /// Value distributions for the categorical fields and salary.
    pub fn distributions(&mut self) -> Distributions {
        let mut categories = BTreeMap::new();
        for (field, cap) in [("department", None), ("location", None), ("position", Some(10))] {
            if let Some(mut counts) = self.category_counts(field) {
                if let Some(cap) = cap {
                    counts.truncate(cap);
                }
                categories.insert(field.to_string(), counts);
            }
        }
        let salary = self
            .numeric_values("salary")
            .and_then(|values| stats::summarize(&values));
        Distributions { categories, salary }
    }

    /// Pairwise Pearson correlations among numeric-coercible mapped fields.
    pub fn correlations(&mut self) -> Option<CorrelationData> {
        let mapped: Vec<(String, String)> = self
            .mapping
            .iter()
            .map(|(field, column)| (field.to_string(), column.to_string()))
            .collect();

        let mut pool: Vec<(String, Vec<Option<f64>>)> = Vec::new();
        for (field, column_name) in mapped {
            let Some(column) = self.table.column(&column_name) else {
                continue;
            };
            let parseable = column
                .cells
                .iter()
                .filter(|cell| match cell {
                    Cell::Number(_) => true,
                    Cell::Text(text) => parse_numeric(text).is_some(),
                    _ => false,
                })
                .count();
            if parseable < MIN_CORRELATION_OBS {
                continue;
            }
            self.force_numeric_column(&column_name);
            let column = self.table.column(&column_name)?;
            pool.push((
                field,
                column.cells.iter().map(Cell::as_number).collect(),
            ));
        }
        if pool.len() < 2 {
            return None;
        }

        let fields: Vec<String> = pool.iter().map(|(field, _)| field.clone()).collect();
        let mut matrix = vec![vec![None; pool.len()]; pool.len()];
        let mut strong = Vec::new();
        for i in 0..pool.len() {
            matrix[i][i] = Some(1.0);
            for j in (i + 1)..pool.len() {
                let (x, y): (Vec<f64>, Vec<f64>) = pool[i]
                    .1
                    .iter()
                    .zip(&pool[j].1)
                    .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                    .unzip();
                let r = if x.len() >= MIN_CORRELATION_OBS {
                    stats::pearson(&x, &y)
                } else {
                    None
                };
                matrix[i][j] = r;
                matrix[j][i] = r;
                if let Some(r) = r
                    && r.abs() > 0.5
                {
                    strong.push(StrongPair {
                        field_a: fields[i].clone(),
                        field_b: fields[j].clone(),
                        r,
                    });
                }
            }
        }

        Some(CorrelationData {
            fields,
            matrix,
            strong,
        })
    }

    /// Heuristic textual insights, each independently gated.
    pub fn insights(&mut self) -> Vec<String> {
        let mut insights = Vec::new();

        if let Some((highest, lowest)) = self.department_salary_extremes() {
            insights.push(format!("Highest average salary is in department: {highest}"));
            insights.push(format!("Lowest average salary is in department: {lowest}"));
        }

        if let Some(r) = self.performance_salary_correlation() {
            let classification = if r > 0.5 {
                "strong positive"
            } else if r > 0.3 {
                "positive"
            } else if r < -0.3 {
                "negative"
            } else {
                "no clear relationship"
            };
            insights.push(format!(
                "Relationship between performance and salary: {classification}"
            ));
        }

        insights.extend(self.gender_breakdown());
        insights
    }

    /// Data-quality warnings.
    pub fn warnings(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        let row_count = self.table.row_count();

        let mut high_missing: Vec<&str> = Vec::new();
        if row_count > 0 {
            for column in self.table.columns() {
                let ratio = column.missing_count() as f64 / row_count as f64;
                if ratio > MISSING_WARNING_RATIO {
                    high_missing.push(column.name.as_str());
                }
            }
        }
        if !high_missing.is_empty() {
            high_missing.truncate(MISSING_WARNING_NAMES);
            warnings.push(format!(
                "Columns with more than 20% missing values: {}",
                high_missing.join(", ")
            ));
        }

        let duplicates = self.duplicate_row_count();
        if duplicates > 0 {
            warnings.push(format!("{duplicates} duplicate rows detected"));
        }

        if let Some(count) = self.iqr_outlier_count("salary")
            && count > 0
        {
            warnings.push(format!("{count} salary outliers detected (IQR rule)"));
        }

        if let Some(dates) = self.force_dates("hire_date") {
            let today = chrono::Local::now().date_naive();
            let future = dates.iter().filter(|date| **date > today).count();
            if future > 0 {
                warnings.push(format!("{future} hire dates are in the future"));
            }
        }

        if row_count < 10 {
            warnings.push("Fewer than 10 records; results may not be reliable".to_string());
        }

        warnings
    }

    /// Count of salary values with |z| > 3, when the deviation is nonzero.
    pub fn z_score_outliers(&mut self) -> Option<usize> {
        let values = self.numeric_values("salary")?;
        let mean = stats::mean(&values)?;
        let std_dev = stats::std_dev(&values)?;
        if std_dev <= 0.0 {
            return None;
        }
        Some(
            values
                .iter()
                .filter(|value| ((*value - mean) / std_dev).abs() > 3.0)
                .count(),
        )
    }

    /// IQR-rule outlier count for a numeric field. None when the field is
    /// unusable or the IQR is zero.
    fn iqr_outlier_count(&mut self, field: &str) -> Option<usize> {
        let values = self.numeric_values(field)?;
        let q1 = stats::quantile(&values, 0.25)?;
        let q3 = stats::quantile(&values, 0.75)?;
        let iqr = q3 - q1;
        if iqr <= 0.0 {
            return None;
        }
        let lower = q1 - 1.5 * iqr;
        let upper = q3 + 1.5 * iqr;
        Some(
            values
                .iter()
                .filter(|value| **value < lower || **value > upper)
                .count(),
        )
    }

    fn department_salary_extremes(&mut self) -> Option<(String, String)> {
        let dept_column = self.mapping.column_for("department")?.to_string();
        let salary_column = self.mapping.column_for("salary")?.to_string();
        self.force_numeric_column(&salary_column);
        let departments = &self.table.column(&dept_column)?.cells;
        let salaries = &self.table.column(&salary_column)?.cells;

        let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for (dept, salary) in departments.iter().zip(salaries) {
            if dept.is_missing() {
                continue;
            }
            let Some(value) = salary.as_number() else {
                continue;
            };
            let entry = groups.entry(dept.render()).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
        if groups.is_empty() {
            return None;
        }

        let mut highest: Option<(&str, f64)> = None;
        let mut lowest: Option<(&str, f64)> = None;
        for (dept, (sum, count)) in &groups {
            let mean = sum / *count as f64;
            if highest.is_none_or(|(_, top)| mean > top) {
                highest = Some((dept, mean));
            }
            if lowest.is_none_or(|(_, bottom)| mean < bottom) {
                lowest = Some((dept, mean));
            }
        }
        Some((highest?.0.to_string(), lowest?.0.to_string()))
    }

    fn performance_salary_correlation(&mut self) -> Option<f64> {
        let perf_column = self.mapping.column_for("performance_score")?.to_string();
        let salary_column = self.mapping.column_for("salary")?.to_string();
        self.force_numeric_column(&perf_column);
        self.force_numeric_column(&salary_column);
        let perf = &self.table.column(&perf_column)?.cells;
        let salary = &self.table.column(&salary_column)?.cells;
        let (x, y): (Vec<f64>, Vec<f64>) = perf
            .iter()
            .zip(salary)
            .filter_map(|(a, b)| Some((a.as_number()?, b.as_number()?)))
            .unzip();
        if x.len() < MIN_CORRELATION_OBS {
            return None;
        }
        stats::pearson(&x, &y)
    }

    /// Scan raw column names for a gender-like column and break it down by
    /// value. Stops at the first matching column with few distinct values.
    fn gender_breakdown(&self) -> Vec<String> {
        let row_count = self.table.row_count();
        if row_count == 0 {
            return Vec::new();
        }
        for column in self.table.columns() {
            let lower = column.name.to_lowercase();
            if !GENDER_KEYWORDS
                .iter()
                .any(|keyword| lower.contains(keyword))
            {
                continue;
            }
            let counts = value_counts(&column.cells);
            if counts.len() > GENDER_MAX_DISTINCT {
                continue;
            }
            return counts
                .into_iter()
                .map(|entry| {
                    let pct = entry.count as f64 / row_count as f64 * 100.0;
                    format!("{}: {pct:.1}% of employees", entry.value)
                })
                .collect();
        }
        Vec::new()
    }

    fn duplicate_row_count(&self) -> usize {
        let mut seen: BTreeSet<Vec<String>> = BTreeSet::new();
        let mut duplicates = 0usize;
        for index in 0..self.table.row_count() {
            if !seen.insert(self.table.rendered_row(index)) {
                duplicates += 1;
            }
        }
        duplicates
    }

    pub fn category_counts(&self, field: &str) -> Option<Vec<CategoryCount>> {
        let column_name = self.mapping.column_for(field)?;
        let column = self.table.column(column_name)?;
        let counts = value_counts(&column.cells);
        if counts.is_empty() { None } else { Some(counts) }
    }

    fn distinct_count(&self, field: &str) -> Option<usize> {
        let column_name = self.mapping.column_for(field)?;
        let column = self.table.column(column_name)?;
        let distinct: BTreeSet<String> = column
            .cells
            .iter()
            .filter(|cell| !cell.is_missing())
            .map(Cell::render)
            .collect();
        Some(distinct.len())
    }

    /// Coerce the mapped column to numbers in place and return the values.
    /// None when the field is unmapped, the column is gone, or no cell
    /// yields a number.
    pub fn numeric_values(&mut self, field: &str) -> Option<Vec<f64>> {
        let column_name = self.mapping.column_for(field)?.to_string();
        self.force_numeric_column(&column_name);
        let values = self.table.column(&column_name)?.numbers();
        if values.is_empty() { None } else { Some(values) }
    }

    fn force_numeric_column(&mut self, column_name: &str) {
        let Some(column) = self.table.column_mut(column_name) else {
            return;
        };
        for cell in &mut column.cells {
            if let Cell::Text(text) = cell {
                *cell = match parse_numeric(text) {
                    Some(value) => Cell::Number(value),
                    None => Cell::Missing,
                };
            }
        }
    }

    /// Coerce the mapped column to dates in place and return the values.
    fn force_dates(&mut self, field: &str) -> Option<Vec<NaiveDate>> {
        let column_name = self.mapping.column_for(field)?.to_string();
        let column = self.table.column_mut(&column_name)?;
        for cell in &mut column.cells {
            if let Cell::Text(text) = cell {
                let parsed = DATE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDate::parse_from_str(text.trim(), format).ok());
                *cell = match parsed {
                    Some(date) => Cell::Date(date),
                    None => Cell::Missing,
                };
            }
        }
        let dates = self.table.column(&column_name)?.dates();
        if dates.is_empty() { None } else { Some(dates) }
    }
}

/// Non-missing value counts, descending by count with ties broken by value.
fn value_counts(cells: &[Cell]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for cell in cells {
        if cell.is_missing() {
            continue;
        }
        *counts.entry(cell.render()).or_insert(0) += 1;
    }
    let mut counts: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(value, count)| CategoryCount { value, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    counts
}

/// Format a count with thousands separators.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a value as whole-unit currency with thousands separators.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    if rounded < 0.0 {
        format!("-${}", group_thousands(rounded.abs() as u64))
    } else {
        format!("${}", group_thousands(rounded as u64))
    }
}
