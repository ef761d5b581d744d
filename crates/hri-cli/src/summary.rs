use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hri_cli::types::Session;
use hri_ingest::FileKind;

pub fn print_summary(session: &Session, show_charts: bool) {
    let kind = match session.info.kind {
        FileKind::Csv => "csv",
        FileKind::Workbook => "workbook",
    };
    let encoding = session
        .info
        .encoding
        .as_deref()
        .map(|name| format!(", {name}"))
        .unwrap_or_default();
    println!(
        "File: {} ({kind}{encoding}, {} bytes)",
        session.info.filename, session.info.size_bytes
    );
    let numeric_columns = session
        .profiles
        .values()
        .filter(|profile| profile.is_numeric)
        .count();
    println!(
        "Rows: {}   Columns: {}   Numeric columns: {}",
        session.table.row_count(),
        session.table.column_count(),
        numeric_columns
    );

    print_mapping_table(session);
    print_kpi_table(session);

    if !session.analysis.insights.is_empty() {
        println!();
        println!("Insights:");
        for insight in &session.analysis.insights {
            println!("- {insight}");
        }
    }

    if !session.analysis.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &session.analysis.warnings {
            println!("- {warning}");
        }
    }

    if let Some(correlations) = &session.analysis.correlations
        && !correlations.strong.is_empty()
    {
        println!();
        println!("Strong correlations:");
        for pair in &correlations.strong {
            println!("- {} / {}: r = {:.2}", pair.field_a, pair.field_b, pair.r);
        }
    }

    if show_charts {
        println!();
        println!("Charts:");
        for chart in &session.charts {
            let marker = if chart.available { "✓" } else { "-" };
            println!("{marker} {}", chart.title);
        }
    }
}

fn print_mapping_table(session: &Session) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Column")]);
    apply_summary_table_style(&mut table);
    if session.mapping.is_empty() {
        table.add_row(vec![dim_cell("none"), dim_cell("no columns recognized")]);
    } else {
        for (field, column) in session.mapping.iter() {
            table.add_row(vec![
                Cell::new(field)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                Cell::new(column),
            ]);
        }
    }
    println!("{table}");
}

fn print_kpi_table(session: &Session) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Indicator"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for kpi in &session.analysis.kpis {
        table.add_row(vec![
            Cell::new(format!("{} {}", kpi.icon, kpi.label)),
            Cell::new(&kpi.value).add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
