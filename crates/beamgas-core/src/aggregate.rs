use crate::domain::{AnalysisResult, InteractionRecord, ProcessKey};
use crate::registry::ProcessRegistry;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessTally {
    #[serde(flatten)]
    pub key: ProcessKey,
    /// Canonical registry name for `(PT, PST)`.
    pub description: String,
    pub count: u64,
    pub fraction: f64,
}

/// Per-process counts and shares, ordered for reporting.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregateResult {
    total: u64,
    tallies: Vec<ProcessTally>,
}

impl AggregateResult {
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn tallies(&self) -> &[ProcessTally] {
        &self.tallies
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn get(&self, key: &ProcessKey) -> Option<&ProcessTally> {
        self.tallies.iter().find(|tally| &tally.key == key)
    }
}

/// Groups `records` by `(name, PT, PST)`.
///
/// Every `(PT, PST)` must be registered; the first unregistered pair aborts the
/// pass. Ordering is descending fraction, then ascending name, PT and PST, so
/// the result does not depend on input order.
pub fn aggregate(
    records: &[InteractionRecord],
    registry: &ProcessRegistry,
) -> AnalysisResult<AggregateResult> {
    let mut counts: BTreeMap<ProcessKey, u64> = BTreeMap::new();
    for record in records {
        registry.resolve(record.process_type, record.process_subtype)?;
        *counts.entry(record.key()).or_default() += 1;
    }

    let total = records.len() as u64;
    if total == 0 {
        return Ok(AggregateResult::default());
    }

    let mut tallies = counts
        .into_iter()
        .map(|(key, count)| -> AnalysisResult<ProcessTally> {
            let description = registry
                .resolve(key.process_type, key.process_subtype)?
                .name
                .clone();
            Ok(ProcessTally {
                key,
                description,
                count,
                fraction: count as f64 / total as f64,
            })
        })
        .collect::<AnalysisResult<Vec<_>>>()?;

    // Equal denominators make count order identical to fraction order.
    tallies.sort_by(|left, right| {
        right
            .count
            .cmp(&left.count)
            .then_with(|| left.key.cmp(&right.key))
    });

    tracing::debug!(
        total,
        processes = tallies.len(),
        "aggregated interaction processes"
    );
    Ok(AggregateResult { total, tallies })
}
