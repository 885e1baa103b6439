//! Interaction-process tabulation for BDSIM/Geant4 beam-gas simulation output.
//!
//! Records exported from the simulator are filtered by particle species,
//! grouped by `(process name, PT, PST)` against a process registry and written
//! as a fraction table. With a primary count and target description the same
//! counts also give per-process cross sections.

pub mod aggregate;
pub mod builder;
pub mod common;
pub mod config;
pub mod cross_section;
pub mod domain;
pub mod records;
pub mod registry;
pub mod report;

mod table;

pub use aggregate::{AggregateResult, ProcessTally, aggregate};
pub use builder::{ProcessReportBuilder, ReportOutcome};
pub use domain::{
    AnalysisError, AnalysisErrorCategory, AnalysisResult, InteractionRecord, ParticleSpecies,
    ProcessKey, RecordFilter, RecordSet, ReportRequest,
};
pub use records::load_records;
pub use registry::{ProcessRegistry, ProcessRegistryEntry};
pub use report::{render_report, write_report};
