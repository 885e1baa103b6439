//! Per-process cross sections estimated from interaction counts in a thin target.
//!
//! `sigma = count / (n_primaries * N_s)` with the surface number density
//! `N_s = L * N_A * rho / M` of the target.

use crate::aggregate::AggregateResult;
use crate::common::constants::{
    AVOGADRO, CM2_PER_BARN, MOLAR_MASS_CO, MOLAR_MASS_CO2, MOLAR_MASS_H, SOLID_TARGET_DENSITY,
    TARGET_THICKNESS_CM,
};
use crate::domain::{AnalysisError, AnalysisResult, ProcessKey};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetGas {
    #[serde(rename = "H")]
    Hydrogen,
    #[serde(rename = "CO")]
    CarbonMonoxide,
    #[serde(rename = "CO2")]
    CarbonDioxide,
}

impl TargetGas {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hydrogen => "H",
            Self::CarbonMonoxide => "CO",
            Self::CarbonDioxide => "CO2",
        }
    }

    pub const fn molar_mass(self) -> f64 {
        match self {
            Self::Hydrogen => MOLAR_MASS_H,
            Self::CarbonMonoxide => MOLAR_MASS_CO,
            Self::CarbonDioxide => MOLAR_MASS_CO2,
        }
    }
}

impl Display for TargetGas {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for TargetGas {
    type Err = AnalysisError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_uppercase().as_str() {
            "H" | "H2" => Ok(Self::Hydrogen),
            "CO" => Ok(Self::CarbonMonoxide),
            "CO2" => Ok(Self::CarbonDioxide),
            _ => Err(AnalysisError::input_validation(
                "INPUT.GAS",
                format!("gas '{}' not recognized; expected H, CO or CO2", token),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetMaterial {
    pub name: String,
    pub molar_mass_g_mol: f64,
    pub density_g_cm3: f64,
    pub thickness_cm: f64,
}

impl TargetMaterial {
    pub fn for_gas(gas: TargetGas) -> Self {
        Self {
            name: gas.as_str().to_string(),
            molar_mass_g_mol: gas.molar_mass(),
            density_g_cm3: SOLID_TARGET_DENSITY,
            thickness_cm: TARGET_THICKNESS_CM,
        }
    }

    /// Molecules per unit target area [cm^-2].
    pub fn number_surface_density(&self) -> f64 {
        self.thickness_cm * AVOGADRO * self.density_g_cm3 / self.molar_mass_g_mol
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        for (field, value) in [
            ("molar_mass_g_mol", self.molar_mass_g_mol),
            ("density_g_cm3", self.density_g_cm3),
            ("thickness_cm", self.thickness_cm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnalysisError::input_validation(
                    "INPUT.TARGET",
                    format!(
                        "target '{}' needs a positive {} but got {}",
                        self.name, field, value
                    ),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessCrossSection {
    #[serde(flatten)]
    pub key: ProcessKey,
    pub cm2: f64,
    pub barn: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossSectionTable {
    pub target: TargetMaterial,
    pub n_primaries: u64,
    pub number_surface_density_cm2: f64,
    pub total_cm2: f64,
    pub total_barn: f64,
    pub processes: Vec<ProcessCrossSection>,
}

impl CrossSectionTable {
    /// Follows the order of `result`. Needs at least one primary.
    pub fn estimate(
        result: &AggregateResult,
        n_primaries: u64,
        target: &TargetMaterial,
    ) -> AnalysisResult<Self> {
        target.validate()?;
        if n_primaries == 0 {
            return Err(AnalysisError::input_validation(
                "INPUT.PRIMARIES",
                "cross sections need a positive number of primaries",
            ));
        }

        let number_surface_density = target.number_surface_density();
        let luminosity = n_primaries as f64 * number_surface_density;
        let processes: Vec<ProcessCrossSection> = result
            .tallies()
            .iter()
            .map(|tally| {
                let cm2 = tally.count as f64 / luminosity;
                ProcessCrossSection {
                    key: tally.key.clone(),
                    cm2,
                    barn: cm2 / CM2_PER_BARN,
                }
            })
            .collect();
        let total_cm2: f64 = processes.iter().map(|process| process.cm2).sum();

        Ok(Self {
            target: target.clone(),
            n_primaries,
            number_surface_density_cm2: number_surface_density,
            total_cm2,
            total_barn: total_cm2 / CM2_PER_BARN,
            processes,
        })
    }
}
