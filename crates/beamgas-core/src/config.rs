//! JSON run configuration for the `analyze` command.
//!
//! Every field is optional; command-line flags take precedence.

use crate::common::constants::{FCC_EE_Z_P0C_EV, SOLID_TARGET_DENSITY, TARGET_THICKNESS_CM};
use crate::cross_section::{TargetGas, TargetMaterial};
use crate::domain::{AnalysisError, AnalysisResult, ParticleSpecies};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeamSettings {
    #[serde(default = "default_beam_particle")]
    pub particle_id: i32,
    #[serde(default = "default_p0c")]
    pub p0c_ev: f64,
}

impl Default for BeamSettings {
    fn default() -> Self {
        Self {
            particle_id: default_beam_particle(),
            p0c_ev: default_p0c(),
        }
    }
}

fn default_beam_particle() -> i32 {
    ParticleSpecies::POSITRON.pdg_code()
}

fn default_p0c() -> f64 {
    FCC_EE_Z_P0C_EV
}

/// Either a gas preset or explicit material properties; explicit values
/// override the preset's.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub gas: Option<TargetGas>,
    pub name: Option<String>,
    pub molar_mass_g_mol: Option<f64>,
    pub density_g_cm3: Option<f64>,
    pub thickness_cm: Option<f64>,
}

impl TargetConfig {
    pub fn resolve(&self) -> AnalysisResult<TargetMaterial> {
        let base = match self.gas {
            Some(gas) => TargetMaterial::for_gas(gas),
            None => {
                let molar_mass = self.molar_mass_g_mol.ok_or_else(|| {
                    AnalysisError::input_validation(
                        "INPUT.TARGET",
                        "target needs either a 'gas' preset or 'molar_mass_g_mol'",
                    )
                })?;
                TargetMaterial {
                    name: "custom".to_string(),
                    molar_mass_g_mol: molar_mass,
                    density_g_cm3: SOLID_TARGET_DENSITY,
                    thickness_cm: TARGET_THICKNESS_CM,
                }
            }
        };

        let material = TargetMaterial {
            name: self.name.clone().unwrap_or(base.name),
            molar_mass_g_mol: self.molar_mass_g_mol.unwrap_or(base.molar_mass_g_mol),
            density_g_cm3: self.density_g_cm3.unwrap_or(base.density_g_cm3),
            thickness_cm: self.thickness_cm.unwrap_or(base.thickness_cm),
        };
        material.validate()?;
        Ok(material)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    pub registry: Option<PathBuf>,
    pub species: Option<String>,
    #[serde(default)]
    pub include_transport: bool,
    pub n_primaries: Option<u64>,
    #[serde(default)]
    pub beam: BeamSettings,
    pub target: Option<TargetConfig>,
}

impl AnalysisConfig {
    /// Relative `registry` paths are resolved against the config file's directory.
    pub fn load(path: &Path) -> AnalysisResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| {
            AnalysisError::input_not_found(
                "IO.CONFIG_READ",
                format!("failed to read config '{}': {}", path.display(), source),
            )
        })?;
        let mut config: Self = serde_json::from_str(&content).map_err(|source| {
            AnalysisError::input_validation(
                "INPUT.CONFIG_PARSE",
                format!("failed to parse config '{}': {}", path.display(), source),
            )
        })?;

        if let (Some(registry), Some(parent)) = (&config.registry, path.parent()) {
            if registry.is_relative() {
                config.registry = Some(parent.join(registry));
            }
        }
        Ok(config)
    }

    pub fn species(&self) -> AnalysisResult<Option<ParticleSpecies>> {
        self.species
            .as_deref()
            .map(str::parse::<ParticleSpecies>)
            .transpose()
    }
}
