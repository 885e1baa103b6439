use crate::aggregate::{AggregateResult, aggregate};
use crate::cross_section::CrossSectionTable;
use crate::domain::{AnalysisResult, InteractionRecord, RecordFilter, RecordSet, ReportRequest};
use crate::records::load_filtered;
use crate::registry::ProcessRegistry;
use crate::report::{
    ReportSummary, render_report, render_summary_json, write_report, write_report_text,
    write_summary_text,
};
use std::fs;
use std::path::Path;

/// Outcome of one [`ProcessReportBuilder::execute`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub result: AggregateResult,
    pub n_primaries: Option<u64>,
    pub cross_sections: Option<CrossSectionTable>,
}

/// Load, filter, group, and write pipeline bound to one process registry.
#[derive(Debug, Clone, Copy)]
pub struct ProcessReportBuilder<'r> {
    registry: &'r ProcessRegistry,
}

impl Default for ProcessReportBuilder<'static> {
    fn default() -> Self {
        Self::new(ProcessRegistry::builtin())
    }
}

impl<'r> ProcessReportBuilder<'r> {
    pub fn new(registry: &'r ProcessRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r ProcessRegistry {
        self.registry
    }

    pub fn load_records(
        &self,
        input_path: &Path,
        filter: &RecordFilter,
    ) -> AnalysisResult<Vec<InteractionRecord>> {
        crate::records::load_records(input_path, filter)
    }

    pub fn aggregate(&self, records: &[InteractionRecord]) -> AnalysisResult<AggregateResult> {
        aggregate(records, self.registry)
    }

    pub fn write_report(&self, result: &AggregateResult, output_path: &Path) -> AnalysisResult<()> {
        write_report(result, output_path)
    }

    /// Runs the whole pipeline. Nothing is written unless every earlier stage succeeded.
    pub fn execute(&self, request: &ReportRequest) -> AnalysisResult<ReportOutcome> {
        let RecordSet {
            records,
            n_primaries: recorded_primaries,
        } = load_filtered(&request.input_path, &request.filter)?;
        let result = self.aggregate(&records)?;

        let n_primaries = request.n_primaries.or(recorded_primaries);
        let cross_sections = match (&request.target, n_primaries) {
            (Some(target), Some(n_primaries)) => {
                Some(CrossSectionTable::estimate(&result, n_primaries, target)?)
            }
            (Some(target), None) => {
                tracing::warn!(
                    material = %target.name,
                    "number of primaries unknown; skipping cross-section estimate"
                );
                None
            }
            (None, _) => None,
        };

        // Both artifacts are rendered before either file is touched.
        let report = request
            .output_path
            .as_deref()
            .map(|path| (path, render_report(&result)));
        let summary = request
            .summary_path
            .as_deref()
            .map(|path| {
                let summary = ReportSummary::new(
                    &result,
                    &request.beam,
                    n_primaries,
                    cross_sections.as_ref(),
                );
                render_summary_json(&summary).map(|json| (path, json))
            })
            .transpose()?;

        if let Some((output_path, rendered)) = &report {
            write_report_text(rendered, output_path)?;
            tracing::info!(
                path = %output_path.display(),
                processes = result.len(),
                "wrote interaction process report"
            );
        }
        if let Some((summary_path, json)) = &summary {
            if let Err(error) = write_summary_text(json, summary_path) {
                if let Some((output_path, _)) = &report {
                    discard_report(output_path);
                }
                return Err(error);
            }
        }

        Ok(ReportOutcome {
            result,
            n_primaries,
            cross_sections,
        })
    }
}

fn discard_report(output_path: &Path) {
    if let Err(source) = fs::remove_file(output_path) {
        tracing::warn!(
            path = %output_path.display(),
            error = %source,
            "failed to remove report after summary write failure"
        );
    }
}
