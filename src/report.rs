//! Year-labeled comparison tables and the plain-text printable report.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::core::{
    CalcError, ContributionMode, ProjectionRequest, ProjectionResult, TargetSolveRequest,
    TargetSolveResult,
};

pub const DISCLAIMER: &str = "Projections are illustrative only. They assume a constant annual \
return and do not account for fees, taxes or inflation. Past performance is not a reliable \
indicator of future results, and the value of an investment can fall as well as rise.";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub year: u32,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
}

pub fn year_rows(primary: &ProjectionResult) -> Vec<ComparisonRow> {
    primary
        .year_end_values
        .iter()
        .enumerate()
        .map(|(index, value)| ComparisonRow {
            year: index as u32 + 1,
            value: *value,
            baseline: None,
            delta: None,
        })
        .collect()
}

/// Pairs each year of `primary` with the same year of `baseline`.
pub fn compare(
    primary: &ProjectionResult,
    baseline: &ProjectionResult,
) -> Result<Vec<ComparisonRow>, CalcError> {
    if primary.len() != baseline.len() {
        return Err(CalcError::invalid(format!(
            "baseline covers {} years but projection covers {}",
            baseline.len(),
            primary.len()
        )));
    }

    Ok(year_rows(primary)
        .into_iter()
        .zip(&baseline.year_end_values)
        .map(|(row, baseline)| ComparisonRow {
            baseline: Some(*baseline),
            delta: Some(round_cents(row.value - baseline)),
            ..row
        })
        .collect())
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats an amount with thousands separators and two decimals.
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn amount_cell(value: f64) -> Cell {
    Cell::new(format_amount(value)).set_alignment(CellAlignment::Right)
}

fn delta_cell(delta: f64) -> Cell {
    let color = if delta >= 0.0 { Color::Green } else { Color::Red };
    Cell::new(format_amount(delta))
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

pub fn projection_table(rows: &[ComparisonRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let with_baseline = rows.iter().any(|row| row.baseline.is_some());
    let mut header = vec![header_cell("Year"), header_cell("Value")];
    if with_baseline {
        header.push(header_cell("Baseline"));
        header.push(header_cell("Difference"));
    }
    table.set_header(header);

    for row in rows {
        let mut cells = vec![Cell::new(row.year), amount_cell(row.value)];
        if with_baseline {
            cells.push(row.baseline.map_or(Cell::new("N/A"), amount_cell));
            cells.push(row.delta.map_or(Cell::new("N/A"), delta_cell));
        }
        table.add_row(cells);
    }
    table
}

pub fn render_projection_table(rows: &[ComparisonRow]) -> String {
    projection_table(rows).to_string()
}

#[derive(Debug, Clone)]
pub struct ProjectionReport<'a> {
    pub request: &'a ProjectionRequest,
    pub fund: Option<&'a str>,
    pub baseline_rate: Option<f64>,
    pub rows: &'a [ComparisonRow],
}

#[derive(Debug, Clone)]
pub struct SolveReport<'a> {
    pub request: &'a TargetSolveRequest,
    pub fund: Option<&'a str>,
    pub result: &'a TargetSolveResult,
}

fn push_field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {label:<24}{value}\n"));
}

fn push_title(out: &mut String, title: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push_str("\n\n");
}

fn fund_label(fund: Option<&str>) -> &str {
    fund.unwrap_or("custom rate")
}

/// Printable text report: parameters, results table and disclaimer.
pub fn render_projection_report(report: &ProjectionReport<'_>) -> String {
    let request = report.request;
    let mut out = String::new();
    push_title(&mut out, "Investment projection");

    out.push_str("Parameters\n");
    push_field(&mut out, "Fund", fund_label(report.fund));
    push_field(&mut out, "Annual return", &format_rate(request.annual_rate));
    push_field(
        &mut out,
        "Initial capital",
        &format_amount(request.initial_capital),
    );
    push_field(
        &mut out,
        "Horizon",
        &format!("{} years", request.horizon_years),
    );
    if request.periodic_contribution > 0.0 && request.contribution_years > 0 {
        push_field(
            &mut out,
            "Periodic contribution",
            &format!(
                "{} ({})",
                format_amount(request.periodic_contribution),
                request.contribution_frequency
            ),
        );
        push_field(
            &mut out,
            "Contribution period",
            &format!("{} years", request.contribution_years),
        );
    }
    if let Some(rate) = report.baseline_rate {
        push_field(&mut out, "Baseline return", &format_rate(rate));
    }

    out.push_str("\nResults\n");
    let mut table = projection_table(report.rows);
    table.force_no_tty();
    out.push_str(&table.to_string());
    out.push('\n');

    if let Some(last) = report.rows.last() {
        out.push('\n');
        push_field(&mut out, "Final value", &format_amount(last.value));
        push_field(
            &mut out,
            "Total contributed",
            &format_amount(request.total_contributed()),
        );
        push_field(
            &mut out,
            "Growth",
            &format_amount(last.value - request.total_contributed()),
        );
    }

    out.push('\n');
    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

pub fn render_solve_report(report: &SolveReport<'_>) -> String {
    let request = report.request;
    let mut out = String::new();
    push_title(&mut out, "Savings plan");

    out.push_str("Parameters\n");
    push_field(&mut out, "Fund", fund_label(report.fund));
    push_field(&mut out, "Annual return", &format_rate(request.annual_rate));
    push_field(
        &mut out,
        "Target capital",
        &format_amount(report.result.target_capital),
    );
    push_field(
        &mut out,
        "Horizon",
        &format!("{} months", request.horizon_months),
    );
    push_field(
        &mut out,
        "Contribution",
        request.contribution_mode.label(),
    );

    out.push_str("\nResult\n");
    let label = match request.contribution_mode {
        ContributionMode::Lump => "Amount to invest now",
        _ => "Amount per period",
    };
    push_field(
        &mut out,
        label,
        &format!("{:.3}", report.result.periodic_amount),
    );

    out.push('\n');
    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}
