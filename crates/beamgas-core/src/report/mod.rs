//! Text and JSON renderings of an aggregated interaction-process table.

use crate::aggregate::{AggregateResult, ProcessTally};
use crate::config::BeamSettings;
use crate::cross_section::CrossSectionTable;
use crate::domain::{AnalysisError, AnalysisResult};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const REPORT_TITLE: &str = "# beamgas interaction process report";
pub const EMPTY_REPORT_MARKER: &str = "# no qualifying interaction records";
pub const FRACTION_PRECISION: usize = 6;

const HEADER_PROCESS: &str = "process";
const FRACTION_WIDTH: usize = 10;

/// Renders the tabular report: comment preamble, header row, one row per process.
pub fn render_report(result: &AggregateResult) -> String {
    let name_width = result
        .tallies()
        .iter()
        .map(|tally| tally.key.process_name.len())
        .chain(std::iter::once(HEADER_PROCESS.len()))
        .max()
        .unwrap_or(HEADER_PROCESS.len());

    let mut lines = vec![
        REPORT_TITLE.to_string(),
        format!("# qualifying records: {}", result.total()),
        format!("# processes: {}", result.len()),
        format!(
            "{:<name_width$} {:>6} {:>6} {:>10} {:>10}",
            HEADER_PROCESS,
            "PT",
            "PST",
            "count",
            "fraction",
            name_width = name_width
        ),
    ];

    if result.is_empty() {
        lines.push(EMPTY_REPORT_MARKER.to_string());
    }
    lines.extend(
        result
            .tallies()
            .iter()
            .map(|tally| render_row(tally, name_width)),
    );

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

fn render_row(tally: &ProcessTally, name_width: usize) -> String {
    format!(
        "{:<name_width$} {:>6} {:>6} {:>10} {:>fraction_width$.precision$}",
        tally.key.process_name,
        tally.key.process_type,
        tally.key.process_subtype,
        tally.count,
        tally.fraction,
        name_width = name_width,
        fraction_width = FRACTION_WIDTH,
        precision = FRACTION_PRECISION
    )
}

pub fn write_report(result: &AggregateResult, output_path: &Path) -> AnalysisResult<()> {
    write_report_text(&render_report(result), output_path)?;
    tracing::info!(
        path = %output_path.display(),
        processes = result.len(),
        "wrote interaction process report"
    );
    Ok(())
}

/// Creates or truncates `output_path`; parent directories must already exist.
pub(crate) fn write_report_text(rendered: &str, output_path: &Path) -> AnalysisResult<()> {
    fs::write(output_path, rendered).map_err(|source| {
        AnalysisError::output_write(
            "IO.REPORT_WRITE",
            format!(
                "failed to write report '{}': {}",
                output_path.display(),
                source
            ),
        )
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimariesSummary {
    pub n_primaries: Option<u64>,
    pub part_id: i32,
    pub p0c_ev: f64,
}

/// Machine-readable companion of the text report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary<'a> {
    pub primaries: PrimariesSummary,
    pub qualifying_records: u64,
    pub processes: &'a [ProcessTally],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_sections: Option<&'a CrossSectionTable>,
}

impl<'a> ReportSummary<'a> {
    pub fn new(
        result: &'a AggregateResult,
        beam: &BeamSettings,
        n_primaries: Option<u64>,
        cross_sections: Option<&'a CrossSectionTable>,
    ) -> Self {
        Self {
            primaries: PrimariesSummary {
                n_primaries,
                part_id: beam.particle_id,
                p0c_ev: beam.p0c_ev,
            },
            qualifying_records: result.total(),
            processes: result.tallies(),
            cross_sections,
        }
    }
}

pub fn render_summary_json(summary: &ReportSummary<'_>) -> AnalysisResult<String> {
    let mut json = serde_json::to_string_pretty(summary).map_err(|source| {
        AnalysisError::internal(
            "RUN.SUMMARY_SERIALIZE",
            format!("failed to serialize report summary: {}", source),
        )
    })?;
    json.push('\n');
    Ok(json)
}

pub fn write_summary_json(summary: &ReportSummary<'_>, path: &Path) -> AnalysisResult<()> {
    write_summary_text(&render_summary_json(summary)?, path)
}

pub(crate) fn write_summary_text(json: &str, path: &Path) -> AnalysisResult<()> {
    fs::write(path, json).map_err(|source| {
        AnalysisError::output_write(
            "IO.SUMMARY_WRITE",
            format!("failed to write summary '{}': {}", path.display(), source),
        )
    })?;
    tracing::info!(path = %path.display(), "wrote report summary");
    Ok(())
}
