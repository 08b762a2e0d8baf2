//! Global configuration for the estimation pipeline
use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

/// Pipeline-wide defaults: the physiological conditions at which free
/// energies are estimated, and the concentration assumed for metabolites
/// without a measurement
pub struct Configuration {
    /// pH at which transformed free energies are estimated
    pub ph: f64,
    /// Ionic strength, molar
    pub ionic_strength: f64,
    /// Temperature, Kelvin
    pub temperature: f64,
    /// Fall-back metabolite concentration, molar
    pub fixed_concentration: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            ph: 7.5,
            ionic_strength: 0.2,
            temperature: 298.15,
            fixed_concentration: 0.1,
        }
    }
}
