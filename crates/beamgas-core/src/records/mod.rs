//! Loading of per-step interaction records exported from the simulation output.

mod parser;

use crate::domain::{AnalysisError, AnalysisResult, InteractionRecord, RecordFilter, RecordSet};
use parser::{parse_delimited_records, parse_json_records};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Delimited,
    Json,
}

impl RecordFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Delimited,
        }
    }
}

/// Reads every record in `path` without filtering.
pub fn load_record_set(path: &Path) -> AnalysisResult<RecordSet> {
    if !path.is_file() {
        return Err(AnalysisError::input_not_found(
            "IO.INPUT_MISSING",
            format!("input file '{}' does not exist", path.display()),
        ));
    }

    let content = fs::read_to_string(path).map_err(|source| {
        AnalysisError::input_not_found(
            "IO.INPUT_READ",
            format!("failed to read input file '{}': {}", path.display(), source),
        )
    })?;

    let label = path.display().to_string();
    let format = RecordFormat::for_path(path);
    let record_set = match format {
        RecordFormat::Delimited => parse_delimited_records(&label, &content)?,
        RecordFormat::Json => parse_json_records(&label, &content)?,
    };

    tracing::debug!(
        path = %path.display(),
        ?format,
        records = record_set.records.len(),
        n_primaries = ?record_set.n_primaries,
        "read interaction records"
    );
    Ok(record_set)
}

/// Reads `path` and keeps the records accepted by `filter`.
pub fn load_filtered(path: &Path, filter: &RecordFilter) -> AnalysisResult<RecordSet> {
    let RecordSet {
        records,
        n_primaries,
    } = load_record_set(path)?;
    let total = records.len();
    let records = apply_filter(records, filter);

    tracing::info!(
        path = %path.display(),
        total,
        qualifying = records.len(),
        species = ?filter.species.map(|species| species.pdg_code()),
        include_transport = filter.include_transport,
        "loaded interaction records"
    );
    Ok(RecordSet {
        records,
        n_primaries,
    })
}

pub fn load_records(path: &Path, filter: &RecordFilter) -> AnalysisResult<Vec<InteractionRecord>> {
    load_filtered(path, filter).map(|record_set| record_set.records)
}

pub fn apply_filter(
    records: Vec<InteractionRecord>,
    filter: &RecordFilter,
) -> Vec<InteractionRecord> {
    records
        .into_iter()
        .filter(|record| filter.accepts(record))
        .collect()
}
