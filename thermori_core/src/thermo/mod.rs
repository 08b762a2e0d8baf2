//! Module for converting free-energy estimates into equilibrium constants
//! and reversibility indices

pub mod equilibrium;
pub mod estimator;
pub mod reversibility;
pub mod uncertain;

/// Gas constant in kJ mol⁻¹ K⁻¹, matching the kJ/mol units of the
/// free-energy estimates
pub const R: f64 = 8.31e-3;
