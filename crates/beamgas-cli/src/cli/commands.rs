use super::CliError;
use anyhow::Context;
use beamgas_core::config::{AnalysisConfig, TargetConfig};
use beamgas_core::cross_section::{CrossSectionTable, TargetGas};
use beamgas_core::domain::{ParticleSpecies, RecordFilter, ReportRequest};
use beamgas_core::registry::ProcessRegistry;
use beamgas_core::report::render_report;
use beamgas_core::ProcessReportBuilder;
use std::io::Write;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct AnalyzeArgs {
    /// Interaction record export (.csv/.txt/.dat table or .json)
    #[arg(long, value_name = "PATH")]
    input: PathBuf,

    /// Keep only this particle species (PDG code or alias such as e+, e-, gamma)
    #[arg(long, value_name = "SPECIES", allow_hyphen_values = true)]
    species: Option<String>,

    /// Report output path; printed to stdout when omitted
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Process registry CSV (ProcessType,SubType,TypeName); built-in Geant4 table otherwise.
    /// Records using process codes outside the Geant4 catalogue need a registry file.
    #[arg(long, value_name = "PATH")]
    registry: Option<PathBuf>,

    /// Count transportation steps (PT = 1) as interactions
    #[arg(long)]
    include_transport: bool,

    /// Target gas preset for cross sections (H, CO, CO2)
    #[arg(long, value_name = "GAS")]
    gas: Option<String>,

    /// Number of simulated primaries; overrides the value recorded in the input
    #[arg(long, value_name = "N")]
    primaries: Option<u64>,

    /// JSON summary output path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// JSON analysis configuration
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also print the report to stdout when --output is given
    #[arg(long)]
    print: bool,
}

impl AnalyzeArgs {
    fn into_request(self, config: &AnalysisConfig) -> Result<ReportRequest, CliError> {
        let species = match &self.species {
            Some(token) => Some(token.parse::<ParticleSpecies>()?),
            None => config.species()?,
        };
        let filter = RecordFilter {
            species,
            include_transport: self.include_transport || config.include_transport,
        };

        let target_config = match &self.gas {
            Some(token) => Some(TargetConfig {
                gas: Some(token.parse::<TargetGas>()?),
                ..config.target.clone().unwrap_or_default()
            }),
            None => config.target.clone(),
        };
        let target = target_config
            .as_ref()
            .map(TargetConfig::resolve)
            .transpose()?;

        let mut request = ReportRequest::new(self.input, filter);
        request.output_path = self.output;
        request.summary_path = self.summary;
        request.n_primaries = self.primaries.or(config.n_primaries);
        request.target = target;
        request.beam = config.beam;
        Ok(request)
    }
}

pub(super) fn run_analyze_command(args: AnalyzeArgs) -> Result<i32, CliError> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    let registry_path = args.registry.clone().or_else(|| config.registry.clone());
    let loaded_registry = registry_path
        .as_deref()
        .map(ProcessRegistry::load)
        .transpose()?;
    let registry = loaded_registry
        .as_ref()
        .unwrap_or_else(|| ProcessRegistry::builtin());

    let print_report = args.print || args.output.is_none();
    let request = args.into_request(&config)?;
    tracing::info!(
        input = %request.input_path.display(),
        registry = %registry.source_label(),
        species = ?request.filter.species.map(|species| species.pdg_code()),
        "starting analysis"
    );

    let outcome = ProcessReportBuilder::new(registry).execute(&request)?;

    if print_report {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(render_report(&outcome.result).as_bytes())
            .context("failed to print report to stdout")?;
        if let Some(table) = &outcome.cross_sections {
            stdout
                .write_all(render_cross_sections(table).as_bytes())
                .context("failed to print cross sections to stdout")?;
        }
    }

    tracing::info!(
        qualifying = outcome.result.total(),
        processes = outcome.result.len(),
        "analysis complete"
    );
    Ok(0)
}

fn render_cross_sections(table: &CrossSectionTable) -> String {
    let mut lines = vec![
        format!(
            "# cross sections: target {} ({} primaries, N_s = {:.6e} cm^-2)",
            table.target.name, table.n_primaries, table.number_surface_density_cm2
        ),
        format!("# total {:.6e} cm^2 ({:.6e} barn)", table.total_cm2, table.total_barn),
    ];
    lines.extend(table.processes.iter().map(|process| {
        format!(
            "# {} {} {} {:.6e} cm^2 ({:.6e} barn)",
            process.key.process_name,
            process.key.process_type,
            process.key.process_subtype,
            process.cm2,
            process.barn
        )
    }));
    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}
