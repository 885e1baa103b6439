//! Physical constants and FCC-ee run defaults shared by the cross-section estimate.

/// Avogadro constant [mol^-1], CODATA 2018 exact value.
pub const AVOGADRO: f64 = 6.022_140_76e23;

/// Reference momentum of the FCC-ee Z operation mode [eV].
pub const FCC_EE_Z_P0C_EV: f64 = 45.6e9;

pub const MOLAR_MASS_H: f64 = 1.007_84;
pub const MOLAR_MASS_CO: f64 = 28.01;
pub const MOLAR_MASS_CO2: f64 = 44.01;

/// Density of the solid stand-in target used in the simulations [g/cm^3].
pub const SOLID_TARGET_DENSITY: f64 = 8.96;

/// Thickness of the simulated target [cm].
pub const TARGET_THICKNESS_CM: f64 = 0.1;

pub const CM2_PER_BARN: f64 = 1.0e-24;
