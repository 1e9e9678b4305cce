//! Terminal tables for QC results and reference data.

use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use qc_model::{Status, ValidationResult};
use qc_report::BatchSummary;
use qc_standards::{SizeChart, Standards};

/// Render one run as a header block, a verdict table and its errors.
pub fn render_result_table(result: &ValidationResult) -> String {
    let mut out = format!("Size: {}\n", result.size);
    if let Some(operator) = &result.operator_id {
        out.push_str(&format!("Operator: {operator}\n"));
    }
    if let Some(session) = &result.session_id {
        out.push_str(&format!("Session: {session}\n"));
    }
    out.push_str(&format!("Result: {}\n", result.overall_result));
    if !result.measurements.is_empty() {
        out.push_str(&format!("{}\n", verdict_table(result)));
        out.push_str(&format!(
            "Total: {}  Passed: {}  Failed: {}\n",
            result.summary.total_measurements,
            result.summary.passed_measurements,
            result.summary.failed_measurements
        ));
    }
    let messages = result.messages();
    if !messages.is_empty() {
        out.push_str("Errors:\n");
        for message in messages {
            out.push_str(&format!("- {message}\n"));
        }
    }
    out
}

pub fn verdict_table(result: &ValidationResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Measurement"),
        header_cell("Measured"),
        header_cell("Standard"),
        header_cell("Deviation"),
        header_cell("Tolerance"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 6, CellAlignment::Center);
    for verdict in &result.measurements {
        table.add_row(vec![
            code_cell(verdict.code.as_str()),
            Cell::new(&verdict.measurement_name),
            Cell::new(format!("{:.2}", verdict.measured_value)),
            Cell::new(format!("{:.2}", verdict.standard_value)),
            deviation_cell(verdict.deviation, verdict.status),
            Cell::new(format!("{:.2}", verdict.tolerance)),
            status_cell(verdict.status),
        ]);
    }
    table
}

/// One row per file of a batch run, followed by the per-size tallies.
pub fn print_batch(files: &[PathBuf], results: &[ValidationResult], summary: &BatchSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Result"),
        header_cell("Failed"),
        header_cell("Errors"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (path, result) in files.iter().zip(results) {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        table.add_row(vec![
            Cell::new(name),
            status_cell(result.overall_result),
            count_cell(result.summary.failed_measurements, Color::Red),
            count_cell(result.messages().len(), Color::Yellow),
        ]);
    }
    println!("{table}");
    println!("{}", tally_table(summary));
}

pub fn tally_table(summary: &BatchSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Size"),
        header_cell("Passed"),
        header_cell("Failed"),
        header_cell("Pass Rate"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for tally in &summary.sizes {
        table.add_row(vec![
            Cell::new(&tally.size).fg(Color::Blue),
            count_cell(tally.passed, Color::Green),
            count_cell(tally.failed, Color::Red),
            Cell::new(format!("{:.1}%", tally.pass_rate())),
        ]);
    }
    let total = &summary.total;
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total.passed).add_attribute(Attribute::Bold),
        Cell::new(total.failed).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}%", total.pass_rate())).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Standard values for one size with the tolerance applied to each code.
pub fn chart_table(chart: &SizeChart, standards: &Standards) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Measurement"),
        header_cell("Standard"),
        header_cell("Tolerance"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (code, standard) in chart.iter() {
        let tolerance = standards.tolerances().tolerance_for(code);
        let tolerance_cell = if standards.tolerances().overrides().contains_key(&code) {
            Cell::new(format!("{tolerance:.2}")).fg(Color::Yellow)
        } else {
            Cell::new(format!("{tolerance:.2}"))
        };
        table.add_row(vec![
            code_cell(code.as_str()),
            Cell::new(code.name()),
            Cell::new(format!("{standard:.2}")),
            tolerance_cell,
        ]);
    }
    table
}

pub fn sizes_table(standards: &Standards) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Size"), header_cell("Measurements")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for chart in standards.chart().iter() {
        table.add_row(vec![
            Cell::new(chart.size()).fg(Color::Blue),
            Cell::new(chart.len()),
        ]);
    }
    table
}

pub fn print_standards(standards: &Standards) {
    println!("Chart: {}", standards.chart_origin());
    println!("Tolerances: {}", standards.tolerance_origin());
    println!("Sizes: {}", standards.chart().valid_sizes_list());
    println!(
        "Default tolerance: {:.2}",
        standards.tolerances().default_tolerance()
    );
    let overrides = standards.tolerances().overrides();
    if !overrides.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Code"),
            header_cell("Measurement"),
            header_cell("Tolerance"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        for (code, tolerance) in overrides {
            table.add_row(vec![
                code_cell(code.as_str()),
                Cell::new(code.name()),
                Cell::new(format!("{tolerance:.2}")),
            ]);
        }
        println!("{table}");
    }
    println!("Fingerprint: {}", standards.fingerprint());
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
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: Status) -> Cell {
    match status {
        Status::Pass => Cell::new("PASS")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Status::Fail => Cell::new("FAIL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn deviation_cell(deviation: f64, status: Status) -> Cell {
    let cell = Cell::new(format!("{deviation:.2}"));
    match status {
        Status::Pass => cell,
        Status::Fail => cell.fg(Color::Red),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn code_cell(code: &str) -> Cell {
    Cell::new(code)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
