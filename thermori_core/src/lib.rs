//! Core rust implementation of thermori, a crate for estimating the
//! thermodynamic reversibility of biochemical reactions from standard
//! transformed Gibbs free energy estimates.

pub mod batch;
pub mod io;
pub mod model;
pub mod thermo;
mod configuration;

pub use configuration::{Configuration, CONFIGURATION};
