pub mod errors;

pub use errors::{AnalysisError, AnalysisErrorCategory, AnalysisResult, ExitPlaceholder};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

/// Geant4 `fTransportation` process type.
pub const TRANSPORTATION_PROCESS_TYPE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRecord {
    pub process_name: String,
    pub process_type: i32,
    pub process_subtype: i32,
    pub particle_id: i32,
}

impl InteractionRecord {
    pub fn new(
        process_name: impl Into<String>,
        process_type: i32,
        process_subtype: i32,
        particle_id: i32,
    ) -> Self {
        Self {
            process_name: process_name.into(),
            process_type,
            process_subtype,
            particle_id,
        }
    }

    pub fn key(&self) -> ProcessKey {
        ProcessKey::new(
            self.process_name.clone(),
            self.process_type,
            self.process_subtype,
        )
    }

    pub fn is_transportation(&self) -> bool {
        self.process_type.abs() == TRANSPORTATION_PROCESS_TYPE
    }
}

/// `(name, PT, PST)` identity of an aggregated process.
///
/// Field order doubles as the final tie-break order in reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProcessKey {
    pub process_name: String,
    pub process_type: i32,
    pub process_subtype: i32,
}

impl ProcessKey {
    pub fn new(process_name: impl Into<String>, process_type: i32, process_subtype: i32) -> Self {
        Self {
            process_name: process_name.into(),
            process_type,
            process_subtype,
        }
    }
}

impl Display for ProcessKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (PT={}, PST={})",
            self.process_name, self.process_type, self.process_subtype
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordFilter {
    pub species: Option<ParticleSpecies>,
    pub include_transport: bool,
}

impl RecordFilter {
    pub fn for_species(species: ParticleSpecies) -> Self {
        Self {
            species: Some(species),
            include_transport: false,
        }
    }

    pub fn accepts(&self, record: &InteractionRecord) -> bool {
        if !self.include_transport && record.is_transportation() {
            return false;
        }
        self.species
            .is_none_or(|species| species.pdg_code() == record.particle_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordSet {
    pub records: Vec<InteractionRecord>,
    pub n_primaries: Option<u64>,
}

/// Particle species identified by its PDG Monte Carlo code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleSpecies(i32);

const SPECIES_ALIASES: [(&str, i32); 14] = [
    ("e+", -11),
    ("positron", -11),
    ("e-", 11),
    ("electron", 11),
    ("gamma", 22),
    ("photon", 22),
    ("p", 2212),
    ("proton", 2212),
    ("n", 2112),
    ("neutron", 2112),
    ("mu-", 13),
    ("muon", 13),
    ("mu+", -13),
    ("antimuon", -13),
];

impl ParticleSpecies {
    pub const POSITRON: Self = Self(-11);
    pub const ELECTRON: Self = Self(11);

    pub const fn from_pdg(code: i32) -> Self {
        Self(code)
    }

    pub const fn pdg_code(self) -> i32 {
        self.0
    }

    pub fn alias(self) -> Option<&'static str> {
        SPECIES_ALIASES
            .iter()
            .find(|(_, code)| *code == self.0)
            .map(|(alias, _)| *alias)
    }
}

impl FromStr for ParticleSpecies {
    type Err = AnalysisError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let normalized = token.trim();
        if let Ok(code) = normalized.parse::<i32>() {
            return Ok(Self(code));
        }

        SPECIES_ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(normalized))
            .map(|(_, code)| Self(*code))
            .ok_or_else(|| {
                AnalysisError::input_validation(
                    "INPUT.SPECIES",
                    format!(
                        "unknown particle species '{}'; expected a PDG code or one of: {}",
                        token,
                        SPECIES_ALIASES
                            .iter()
                            .map(|(alias, _)| *alias)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )
            })
    }
}

impl Display for ParticleSpecies {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.alias() {
            Some(alias) => write!(f, "{} ({})", self.0, alias),
            None => write!(f, "{}", self.0),
        }
    }
}

/// One invocation of the report pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
    pub filter: RecordFilter,
    pub n_primaries: Option<u64>,
    pub target: Option<crate::cross_section::TargetMaterial>,
    pub beam: crate::config::BeamSettings,
}

impl ReportRequest {
    pub fn new(input_path: impl Into<PathBuf>, filter: RecordFilter) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: None,
            summary_path: None,
            filter,
            n_primaries: None,
            target: None,
            beam: crate::config::BeamSettings::default(),
        }
    }

    pub fn with_output(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(output_path.into());
        self
    }

    pub fn with_summary(mut self, summary_path: impl Into<PathBuf>) -> Self {
        self.summary_path = Some(summary_path.into());
        self
    }
}
