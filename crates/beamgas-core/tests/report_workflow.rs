use beamgas_core::cross_section::{TargetGas, TargetMaterial};
use beamgas_core::domain::AnalysisErrorCategory;
use beamgas_core::report::EMPTY_REPORT_MARKER;
use beamgas_core::{ParticleSpecies, ProcessRegistry, ProcessReportBuilder, RecordFilter, ReportRequest};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const G4_PROCESSES: &str = "ProcessType,SubType,TypeName\n12,1,ComptonScattering\n12,2,PhotoElectricEffect\n1,91,Transportation\n";

const POSITRON_STEPS: &str = "# n_primaries: 3\nparticleID,processName,PT,PST\n-11,compt,12,1\n-11,Transportation,1,91\n-11,compt,12,1\n-11,phot,12,2\n";

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("fixture should be written");
}

fn data_rows(report: &str) -> Vec<Vec<String>> {
    report
        .lines()
        .filter(|line| !line.starts_with('#'))
        .skip(1)
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect()
}

#[test]
fn positron_sample_produces_ordered_report() {
    let temp = TempDir::new().expect("tempdir should be created");
    let registry_path = temp.path().join("g4_processes.csv");
    let input_path = temp.path().join("steps.csv");
    let output_path = temp.path().join("report.txt");
    write_file(&registry_path, G4_PROCESSES);
    write_file(&input_path, POSITRON_STEPS);

    let registry = ProcessRegistry::load(&registry_path).expect("registry should load");
    let request = ReportRequest::new(&input_path, RecordFilter::default()).with_output(&output_path);
    let outcome = ProcessReportBuilder::new(&registry)
        .execute(&request)
        .expect("pipeline should succeed");
    assert_eq!(outcome.result.total(), 3);

    let report = fs::read_to_string(&output_path).expect("report should be readable");
    assert_eq!(
        data_rows(&report),
        vec![
            vec!["compt", "12", "1", "2", "0.666667"],
            vec!["phot", "12", "2", "1", "0.333333"],
        ]
    );
}

#[test]
fn electron_filter_on_positron_sample_writes_header_only() {
    let temp = TempDir::new().expect("tempdir should be created");
    let registry_path = temp.path().join("g4_processes.csv");
    let input_path = temp.path().join("steps.csv");
    let output_path = temp.path().join("report.txt");
    write_file(&registry_path, G4_PROCESSES);
    write_file(&input_path, POSITRON_STEPS);

    let registry = ProcessRegistry::load(&registry_path).expect("registry should load");
    let request = ReportRequest::new(&input_path, RecordFilter::for_species(ParticleSpecies::ELECTRON))
        .with_output(&output_path);
    let outcome = ProcessReportBuilder::new(&registry)
        .execute(&request)
        .expect("empty selection should succeed");

    assert!(outcome.result.is_empty());
    let report = fs::read_to_string(&output_path).expect("report should be readable");
    assert!(data_rows(&report).is_empty());
    assert!(report.contains(EMPTY_REPORT_MARKER));
    assert!(report.lines().any(|line| line.starts_with("process")));
}

#[test]
fn transport_steps_are_counted_on_request() {
    let temp = TempDir::new().expect("tempdir should be created");
    let registry_path = temp.path().join("g4_processes.csv");
    let input_path = temp.path().join("steps.csv");
    write_file(&registry_path, G4_PROCESSES);
    write_file(&input_path, POSITRON_STEPS);

    let registry = ProcessRegistry::load(&registry_path).expect("registry should load");
    let filter = RecordFilter {
        species: None,
        include_transport: true,
    };
    let outcome = ProcessReportBuilder::new(&registry)
        .execute(&ReportRequest::new(&input_path, filter))
        .expect("pipeline should succeed");

    assert_eq!(outcome.result.total(), 4);
    assert!(
        outcome
            .result
            .tallies()
            .iter()
            .any(|tally| tally.description == "Transportation")
    );
}

#[test]
fn summary_json_carries_cross_sections() {
    let temp = TempDir::new().expect("tempdir should be created");
    let input_path = temp.path().join("steps.json");
    let summary_path = temp.path().join("summary.json");
    write_file(
        &input_path,
        r#"{
          "n_primaries": 1000,
          "records": [
            {"partID": -11, "processName": "eBrem", "postPT": 2, "postPST": 3},
            {"partID": -11, "processName": "eBrem", "postPT": 2, "postPST": 3},
            {"partID": -11, "processName": "CoulombScat", "postPT": 2, "postPST": 1}
          ]
        }"#,
    );

    let mut request = ReportRequest::new(&input_path, RecordFilter::for_species(ParticleSpecies::POSITRON))
        .with_summary(&summary_path);
    let target = TargetMaterial::for_gas(TargetGas::CarbonDioxide);
    request.target = Some(target.clone());
    ProcessReportBuilder::default()
        .execute(&request)
        .expect("pipeline should succeed");

    let summary: Value = serde_json::from_str(
        &fs::read_to_string(&summary_path).expect("summary should be readable"),
    )
    .expect("summary should be JSON");
    assert_eq!(summary["primaries"]["n_primaries"], 1000);
    assert_eq!(summary["qualifying_records"], 3);

    let cross_sections = &summary["cross_sections"];
    assert_eq!(cross_sections["target"]["name"], "CO2");
    let total = cross_sections["total_cm2"].as_f64().expect("total cross section");
    let expected = 3.0 / (1000.0 * target.number_surface_density());
    assert!((total - expected).abs() / expected < 1.0e-12);

    let per_process: f64 = cross_sections["processes"]
        .as_array()
        .expect("process cross sections")
        .iter()
        .map(|entry| entry["cm2"].as_f64().expect("cm2"))
        .sum();
    assert!((per_process - total).abs() / total < 1.0e-12);
}

#[test]
fn missing_input_is_reported_without_output() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output_path = temp.path().join("report.txt");
    let request = ReportRequest::new(temp.path().join("absent.csv"), RecordFilter::default())
        .with_output(&output_path);

    let error = ProcessReportBuilder::default()
        .execute(&request)
        .expect_err("missing input should fail");
    assert_eq!(error.category(), AnalysisErrorCategory::InputNotFoundError);
    assert!(!output_path.exists());
}
