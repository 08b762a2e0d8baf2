//! Reversibility index calculations.
//!
//! The reversibility index (RI) represents the fold change in metabolite
//! concentrations required to reverse the direction of a reaction: the
//! higher the RI, the more irreversible the reaction. A convenient
//! threshold for practical irreversibility is RI >= 1000.
//!
//! Two variants exist and are deliberately kept separate:
//! [`with_concentrations`] scales by the number of metabolites whose
//! concentration was not measured, while [`uniform`] scales by the total
//! stoichiometric weight of the reaction. The two are not algebraically
//! equivalent; see DESIGN.md.

use indexmap::IndexMap;
use thiserror::Error;

use crate::model::reaction::{Reaction, Stoichiometry};
use crate::thermo::uncertain::Uncertain;

/// Reversibility indices computed from measured concentrations, with
/// per-reaction diagnostics
#[derive(Debug, Clone)]
pub struct ConcentrationRi {
    /// One reversibility index per reaction, input order
    pub ri: Vec<Uncertain>,
    /// Sparse stoichiometry of each reaction
    pub stoichiometries: Vec<Stoichiometry>,
    /// Reaction quotient Q of each reaction
    pub quotients: Vec<f64>,
    /// Number of metabolites in each reaction without a measured
    /// concentration
    pub unknown_counts: Vec<usize>,
}

/// Compute reversibility indices using measured metabolite
/// concentrations, with `fixed_concentration` standing in for metabolites
/// absent from `concentrations`.
///
/// Per reaction, with U the number of unmeasured metabolites and
/// Q the reaction quotient over the assembled concentration vector:
/// - U > 0: RI = (Keq/Q)^(2/U)
/// - U = 0: the exponent is undefined, so the raw thermodynamic driving
///   force RI = Keq/Q is reported instead
pub fn with_concentrations(
    reactions: &[Reaction],
    keq: &[Uncertain],
    concentrations: &IndexMap<String, f64>,
    fixed_concentration: f64,
) -> Result<ConcentrationRi, ReversibilityError> {
    if reactions.len() != keq.len() {
        return Err(ReversibilityError::LengthMismatch {
            reactions: reactions.len(),
            keq: keq.len(),
        });
    }

    let mut ri = Vec::with_capacity(reactions.len());
    let mut stoichiometries = Vec::with_capacity(reactions.len());
    let mut quotients = Vec::with_capacity(reactions.len());
    let mut unknown_counts = Vec::with_capacity(reactions.len());
    for (reaction, keq) in reactions.iter().zip(keq) {
        let unknown = reaction.unknown_count(concentrations);
        let quotient = reaction.quotient(concentrations, fixed_concentration);
        let index = if unknown == 0 {
            *keq / quotient
        } else {
            (*keq / quotient).powf(2.0 / unknown as f64)
        };
        ri.push(index);
        stoichiometries.push(reaction.stoichiometry.clone());
        quotients.push(quotient);
        unknown_counts.push(unknown);
    }
    Ok(ConcentrationRi {
        ri,
        stoichiometries,
        quotients,
        unknown_counts,
    })
}

/// Compute reversibility indices assuming every metabolite sits at one
/// uniform fixed concentration.
///
/// Per reaction, with N_P the sum of product coefficients, N_S the sum of
/// absolute substrate coefficients, and N = N_P + N_S:
/// RI = (Keq · c^(N_P − N_S))^(2/N)
pub fn uniform(
    reactions: &[Reaction],
    keq: &[Uncertain],
    fixed_concentration: f64,
) -> Result<Vec<Uncertain>, ReversibilityError> {
    if reactions.len() != keq.len() {
        return Err(ReversibilityError::LengthMismatch {
            reactions: reactions.len(),
            keq: keq.len(),
        });
    }

    let mut ri = Vec::with_capacity(reactions.len());
    for (reaction, keq) in reactions.iter().zip(keq) {
        let n_products = reaction.product_weight();
        let n_substrates = reaction.substrate_weight();
        let total = n_products + n_substrates;
        // Fully cancelled reactions (e.g. "A <=> A") have no stoichiometry
        // left to scale by
        if total == 0.0 {
            return Err(ReversibilityError::EmptyStoichiometry {
                name: reaction.name.clone(),
            });
        }
        let q2 = fixed_concentration.powf(n_products - n_substrates);
        ri.push((*keq * q2).powf(2.0 / total));
    }
    Ok(ri)
}

/// Enum representing possible reversibility calculation errors
#[derive(Debug, Error)]
pub enum ReversibilityError {
    #[error("{reactions} reactions but {keq} equilibrium constants")]
    LengthMismatch { reactions: usize, keq: usize },
    #[error("reaction {name} has an empty stoichiometry")]
    EmptyStoichiometry { name: String },
}
