use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use qc_cli::export::{ReportFormat, render_result, write_result_file};
use qc_cli::run::{ensure_measurement_file, load_engine, run_identity};
use qc_cli::summary::{chart_table, print_batch, print_standards, sizes_table};
use qc_ingest::list_measurement_files;
use qc_model::ValidationResult;
use qc_report::{BatchSummary, write_batch_csv};
use qc_validate::ValidationEngine;

use crate::cli::{BatchArgs, ChartArgs, ReportFormatArg, StandardsArgs, ValidateArgs};

fn engine_for(args: &StandardsArgs) -> Result<ValidationEngine> {
    load_engine(args.chart.as_deref(), args.tolerances.as_deref())
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationResult> {
    ensure_measurement_file(&args.file)?;
    let engine = engine_for(&args.standards)?;
    let identity = run_identity(args.operator.as_deref(), args.session.as_deref());
    let span = info_span!(
        "validate",
        file = %args.file.display(),
        size = %args.size,
        session = identity.session_id.as_deref().unwrap_or_default()
    );
    let _guard = span.enter();

    let result = engine.validate_file(&args.file, &args.size, &identity);
    let format = report_format(args.format);
    match &args.output {
        Some(path) => {
            write_result_file(&result, format, path)?;
            info!(output = %path.display(), "wrote validation result");
            println!("{}: {}", args.file.display(), result.overall_result);
        }
        None => print!("{}", render_result(&result, format)?),
    }
    Ok(result)
}

pub fn run_batch(args: &BatchArgs) -> Result<BatchSummary> {
    let files = list_measurement_files(&args.dir)
        .with_context(|| format!("list measurement files in {}", args.dir.display()))?;
    if files.is_empty() {
        warn!(dir = %args.dir.display(), "no measurement files found");
    }
    let engine = engine_for(&args.standards)?;
    let identity = run_identity(args.operator.as_deref(), None);
    let span = info_span!(
        "batch",
        dir = %args.dir.display(),
        size = %args.size,
        session = identity.session_id.as_deref().unwrap_or_default()
    );
    let _guard = span.enter();

    let results: Vec<ValidationResult> = files
        .iter()
        .map(|path| {
            let result = engine.validate_file(path, &args.size, &identity);
            debug!(file = %path.display(), result = %result.overall_result, "validated file");
            result
        })
        .collect();
    let summary = BatchSummary::from_results(&results);
    print_batch(&files, &results, &summary);

    if let Some(path) = &args.csv {
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        write_batch_csv(&summary, BufWriter::new(file))?;
        info!(output = %path.display(), "wrote batch summary");
    }
    info!(
        files = summary.total.total(),
        passed = summary.total.passed,
        failed = summary.total.failed,
        "batch complete"
    );
    Ok(summary)
}

pub fn run_sizes(args: &StandardsArgs) -> Result<()> {
    let engine = engine_for(args)?;
    println!("{}", sizes_table(engine.standards()));
    Ok(())
}

/// Prints the chart for one size. Returns `false` when the size is unknown.
pub fn run_chart(args: &ChartArgs) -> Result<bool> {
    let engine = engine_for(&args.standards)?;
    let Some(chart) = engine.get_chart(&args.size) else {
        eprintln!(
            "error: Invalid size '{}'. Valid sizes: {}",
            args.size,
            engine.standards().chart().valid_sizes_list()
        );
        return Ok(false);
    };
    println!("Size: {}", chart.size());
    println!("{}", chart_table(chart, engine.standards()));
    Ok(true)
}

pub fn run_standards(args: &StandardsArgs) -> Result<()> {
    let engine = engine_for(args)?;
    print_standards(engine.standards());
    Ok(())
}

fn report_format(format: ReportFormatArg) -> ReportFormat {
    match format {
        ReportFormatArg::Table => ReportFormat::Table,
        ReportFormatArg::Json => ReportFormat::Json,
        ReportFormatArg::Csv => ReportFormat::Csv,
        ReportFormatArg::Text => ReportFormat::Text,
    }
}
