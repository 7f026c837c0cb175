//! Plain-text rendering of engine results

use samplesize_core::model::SampleSizeResult;
use samplesize_core::sensitivity::{ReferenceTable, SweepDimension, SweepSeries};

/// Width of the value columns in rendered tables
const COLUMN_WIDTH: usize = 12;

/// Tolerance for recognizing the current selection within a sweep
const SELECTION_TOLERANCE: f64 = 1e-9;

/// Format a count with thousands separators, e.g. `16,590`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Drop trailing zeros after the decimal point, and the point itself if
/// nothing follows it
fn trim_decimal(formatted: &str) -> &str {
    if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted
    }
}

/// Format a fraction as a percentage with at most two decimals, e.g. `0.005`
/// as `0.5%`
pub fn format_percentage(value: f64) -> String {
    format!("{}%", trim_decimal(&format!("{:.2}", value * 100.0)))
}

/// Format a sweep input in its dimension's natural unit
pub fn format_sweep_value(dimension: SweepDimension, value: f64) -> String {
    match dimension {
        SweepDimension::MarginOfError => format!("±{}", format_percentage(value)),
        SweepDimension::ConfidenceLevel => format!("{value}%"),
        SweepDimension::Proportion => trim_decimal(&format!("{value:.6}")).to_string(),
    }
}

/// Join rendered lines, each terminated by a newline
fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Headline result plus the inputs that produced it
pub fn render_result(result: &SampleSizeResult) -> String {
    let inputs = &result.inputs;
    let population = match inputs.population_size {
        Some(population) => format_count(population.get()),
        None => "unknown (no correction)".to_string(),
    };
    join_lines(vec![
        format!("Required Sample Size: {}", format_count(result.sample_size)),
        format!("  Confidence Level:  {}", inputs.confidence_level),
        format!(
            "  Margin of Error:   ±{}",
            format_percentage(inputs.margin_of_error.value())
        ),
        format!("  Proportion (p):    {}", inputs.proportion.value()),
        format!("  Population Size:   {population}"),
    ])
}

/// The formula with the actual values substituted
pub fn render_formula(result: &SampleSizeResult) -> String {
    let inputs = &result.inputs;
    let mut lines = vec![
        "Formula Used:".to_string(),
        "  n0 = z^2 * p * (1 - p) / e^2".to_string(),
    ];
    if result.is_corrected() {
        lines.push("  n  = n0 / (1 + (n0 - 1) / N)".to_string());
    }
    lines.push("Where:".to_string());
    lines.push(format!(
        "  z  = {} (z-score for {})",
        result.critical_value, inputs.confidence_level
    ));
    lines.push(format!("  p  = {}", inputs.proportion.value()));
    lines.push(format!(
        "  e  = {}",
        format_percentage(inputs.margin_of_error.value())
    ));
    if let Some(population) = inputs.population_size {
        lines.push(format!("  N  = {}", format_count(population.get())));
    }
    lines.push(format!("  n0 = {:.2}", result.unadjusted_size));
    if let Some(corrected) = result.corrected_size {
        lines.push(format!("  n  = {corrected:.2}"));
    }
    lines.push(format!("Rounded up: {}", format_count(result.sample_size)));
    join_lines(lines)
}

/// Short column header for a swept dimension
fn column_label(dimension: SweepDimension) -> &'static str {
    match dimension {
        SweepDimension::MarginOfError => "Margin",
        SweepDimension::ConfidenceLevel => "Confidence",
        SweepDimension::Proportion => "p",
    }
}

/// Value of the swept dimension that the fixed inputs select
fn current_selection(series: &SweepSeries) -> f64 {
    match series.dimension {
        SweepDimension::MarginOfError => series.fixed.margin_of_error,
        SweepDimension::ConfidenceLevel => series.fixed.confidence_level.percent(),
        SweepDimension::Proportion => series.fixed.proportion,
    }
}

/// Two-column table of a sweep; the row matching the current selection is
/// marked with `*`
pub fn render_series(series: &SweepSeries) -> String {
    let selected = current_selection(series);
    let mut lines = vec![
        format!("Sample Size vs. {}", series.dimension),
        format!(
            "  {:>COLUMN_WIDTH$}  {:>COLUMN_WIDTH$}",
            column_label(series.dimension),
            "Sample Size"
        ),
    ];
    lines.extend(series.iter().map(|point| {
        let marker = if (point.value - selected).abs() < SELECTION_TOLERANCE {
            "*"
        } else {
            " "
        };
        format!(
            "{marker} {:>COLUMN_WIDTH$}  {:>COLUMN_WIDTH$}",
            format_sweep_value(series.dimension, point.value),
            format_count(point.result.sample_size)
        )
    }));
    join_lines(lines)
}

/// Pivot of a reference table: one row per margin, one column per level
pub fn render_table(table: &ReferenceTable) -> String {
    let mut header = format!("{:<COLUMN_WIDTH$}", "Margin");
    for level in table.confidence_levels() {
        header.push_str(&format!("{:>COLUMN_WIDTH$}", level.to_string()));
    }

    let mut lines = vec![header];
    for (margin, cells) in table.rows() {
        let mut row = format!(
            "{:<COLUMN_WIDTH$}",
            format!("±{}", format_percentage(margin.value()))
        );
        for cell in cells {
            row.push_str(&format!("{:>COLUMN_WIDTH$}", format_count(cell.sample_size)));
        }
        lines.push(row);
    }
    join_lines(lines)
}
