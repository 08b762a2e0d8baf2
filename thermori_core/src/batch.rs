//! Batch driver: load a reaction list (and optionally a concentration
//! table), estimate free energies, convert them to equilibrium constants,
//! compute reversibility indices, and write a name→RI CSV.

use std::path::PathBuf;

use derive_builder::Builder;
use indexmap::IndexMap;
use log::info;
use thiserror::Error;

use crate::io::concentration_table::{self, ConcentrationTableError};
use crate::io::formula::FormulaParseError;
use crate::io::output::{self, OutputError};
use crate::io::reaction_table::{self, ParseError};
use crate::model::reaction::Reaction;
use crate::thermo::equilibrium::{keq_from_dg0, EquilibriumError};
use crate::thermo::estimator::{EstimationConditions, EstimationError, GibbsEstimator};
use crate::thermo::reversibility::{self, ReversibilityError};
use crate::thermo::uncertain::Uncertain;
use crate::CONFIGURATION;

/// Configuration for one batch run
#[derive(Builder, Debug, Clone)]
pub struct BatchConfig {
    /// Path to the reaction list, one `name  formula` pair per line
    pub reactions: PathBuf,
    /// Path the name,RI table is written to
    pub output: PathBuf,
    /// Optional concentration table; when present (together with
    /// `condition`) the concentration-aware RI variant is used
    #[builder(default = "None")]
    pub concentrations: Option<PathBuf>,
    /// Experimental condition column to select from the concentration
    /// table
    #[builder(default = "None")]
    pub condition: Option<String>,
    /// Concentration assumed for unmeasured metabolites, molar
    #[builder(default = "CONFIGURATION.read().unwrap().fixed_concentration")]
    pub fixed_concentration: f64,
    /// Conditions passed to the free-energy estimator
    #[builder(default)]
    pub conditions: EstimationConditions,
}

/// Run one batch: load → estimate → convert → compute → write.
///
/// Returns the name→RI map in reaction list order; the same pairs (nominal
/// values) are written to `config.output`. Every failure aborts the whole
/// batch, there are no partial results.
pub fn run_batch(
    config: &BatchConfig,
    estimator: &dyn GibbsEstimator,
) -> Result<IndexMap<String, Uncertain>, BatchError> {
    // The reaction list is parsed fully before the estimator is invoked,
    // so a malformed line fails fast
    let entries = reaction_table::read_reaction_list(&config.reactions)?;
    info!(
        "loaded {} reactions from {}",
        entries.len(),
        config.reactions.display()
    );

    let concentrations = match (&config.concentrations, &config.condition) {
        (Some(path), Some(condition)) => {
            let table = concentration_table::read_condition(path, condition)?;
            info!(
                "loaded {} measured concentrations for condition {}",
                table.len(),
                condition
            );
            Some(table)
        }
        (None, None) => None,
        _ => return Err(BatchError::IncompleteConcentrationConfig),
    };

    let mut reactions = Vec::with_capacity(entries.len());
    for entry in &entries {
        let reaction =
            Reaction::parse(&entry.name, &entry.formula).map_err(|source| BatchError::Formula {
                name: entry.name.clone(),
                source,
            })?;
        reactions.push(reaction);
    }

    let formulas: Vec<String> = reactions
        .iter()
        .map(|reaction| reaction.formula.clone())
        .collect();
    let estimates = estimator.estimate(&formulas, &config.conditions)?;
    let keq = keq_from_dg0(&estimates, config.conditions.temperature)?;

    let ri = match &concentrations {
        Some(measured) => {
            reversibility::with_concentrations(
                &reactions,
                &keq,
                measured,
                config.fixed_concentration,
            )?
            .ri
        }
        None => reversibility::uniform(&reactions, &keq, config.fixed_concentration)?,
    };

    let mut results: IndexMap<String, Uncertain> = IndexMap::new();
    for (reaction, index) in reactions.iter().zip(ri) {
        results.insert(reaction.name.clone(), index);
    }

    let nominal: IndexMap<String, f64> = results
        .iter()
        .map(|(name, index)| (name.clone(), index.value))
        .collect();
    output::write_reversibility(&config.output, &nominal)?;
    info!(
        "wrote {} reversibility indices to {}",
        nominal.len(),
        config.output.display()
    );
    Ok(results)
}

/// Enum representing possible batch errors
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to read the reaction list")]
    ReactionList(#[from] ParseError),
    #[error("failed to read the concentration table")]
    Concentrations(#[from] ConcentrationTableError),
    #[error("a concentration table and a condition name must be configured together")]
    IncompleteConcentrationConfig,
    #[error("unable to parse the formula of reaction {name}")]
    Formula {
        name: String,
        source: FormulaParseError,
    },
    #[error("free energy estimation failed")]
    Estimation(#[from] EstimationError),
    #[error("equilibrium conversion failed")]
    Equilibrium(#[from] EquilibriumError),
    #[error("reversibility calculation failed")]
    Reversibility(#[from] ReversibilityError),
    #[error("failed to write results")]
    Output(#[from] OutputError),
}
