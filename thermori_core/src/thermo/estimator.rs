//! Estimation of standard transformed Gibbs free energies for batches of
//! reactions.
//!
//! The estimator is a capability interface: the pipeline only needs
//! "formulas in, ΔG0′ values plus covariance out". The provided
//! [`FormationEnergyEstimator`] backs that interface with a table of
//! per-compound transformed formation energies loaded from JSON.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::io::formula::{parse_formula, FormulaParseError};
use crate::thermo::uncertain::Uncertain;
use crate::CONFIGURATION;

/// Physiological conditions at which free energies are estimated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationConditions {
    /// pH of the aqueous phase
    pub ph: f64,
    /// Ionic strength, molar
    pub ionic_strength: f64,
    /// Temperature, Kelvin
    pub temperature: f64,
}

/// Tolerance used when checking a table's conditions against a request
const CONDITION_TOLERANCE: f64 = 1e-6;

impl EstimationConditions {
    /// Component-wise comparison within [`CONDITION_TOLERANCE`], so tables
    /// written with rounded values still match the configured defaults
    pub fn approx_eq(&self, other: &EstimationConditions) -> bool {
        (self.ph - other.ph).abs() <= CONDITION_TOLERANCE
            && (self.ionic_strength - other.ionic_strength).abs() <= CONDITION_TOLERANCE
            && (self.temperature - other.temperature).abs() <= CONDITION_TOLERANCE
    }
}

impl Default for EstimationConditions {
    fn default() -> Self {
        let configuration = CONFIGURATION.read().unwrap();
        EstimationConditions {
            ph: configuration.ph,
            ionic_strength: configuration.ionic_strength,
            temperature: configuration.temperature,
        }
    }
}

/// Free energy estimates for a batch of reactions
#[derive(Debug, Clone)]
pub struct FreeEnergyEstimates {
    /// ΔG0′ in kJ/mol, one entry per reaction in input order
    pub values: DVector<f64>,
    /// Covariance of the estimates; the diagonal holds the per-reaction
    /// variance
    pub covariance: DMatrix<f64>,
}

impl FreeEnergyEstimates {
    /// Per-reaction standard deviation, the square root of the covariance
    /// diagonal
    pub fn std_devs(&self) -> DVector<f64> {
        self.covariance.diagonal().map(|variance| variance.sqrt())
    }

    /// Pair each estimate with its standard deviation
    pub fn to_uncertain(&self) -> Vec<Uncertain> {
        let std_devs = self.std_devs();
        self.values
            .iter()
            .zip(std_devs.iter())
            .map(|(value, std_dev)| Uncertain::new(*value, *std_dev))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.len() == 0
    }
}

/// Capability interface for free-energy estimation
pub trait GibbsEstimator {
    /// Estimate ΔG0′ for each reaction formula, in input order
    fn estimate(
        &self,
        formulas: &[String],
        conditions: &EstimationConditions,
    ) -> Result<FreeEnergyEstimates, EstimationError>;
}

/// Transformed formation energy of one compound
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompoundEnergy {
    /// ΔGf′ in kJ/mol
    pub dgf_prime: f64,
    /// Variance of the formation energy estimate
    pub variance: f64,
}

/// Represents a JSON serialized formation energy table, used for reading
/// the table from a file
#[derive(Serialize, Deserialize)]
struct JsonEnergyTable {
    conditions: EstimationConditions,
    compounds: IndexMap<String, CompoundEnergy>,
}

/// Estimator backed by a table of per-compound transformed formation
/// energies, valid at one fixed set of conditions.
///
/// For a batch it builds the stoichiometric matrix S (compounds ×
/// reactions) and returns values Sᵀ·g and covariance Sᵀ·Σ·S, where g is
/// the formation energy vector and Σ the diagonal matrix of per-compound
/// variances.
pub struct FormationEnergyEstimator {
    conditions: EstimationConditions,
    compounds: IndexMap<String, CompoundEnergy>,
}

impl FormationEnergyEstimator {
    pub fn new(
        conditions: EstimationConditions,
        compounds: IndexMap<String, CompoundEnergy>,
    ) -> Self {
        FormationEnergyEstimator {
            conditions,
            compounds,
        }
    }

    /// Read a formation energy table from a JSON file of the form
    /// `{"conditions": {...}, "compounds": {"C00031": {"dgf_prime": ...,
    /// "variance": ...}, ...}}`
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self, EstimationError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(EstimationError::UnableToRead(format!("{:?}", err))),
        };
        let table = match serde_json::from_str::<JsonEnergyTable>(&data) {
            Ok(table) => table,
            Err(err) => return Err(EstimationError::UnableToParse(format!("{:?}", err))),
        };
        Ok(FormationEnergyEstimator::new(
            table.conditions,
            table.compounds,
        ))
    }
}

impl GibbsEstimator for FormationEnergyEstimator {
    fn estimate(
        &self,
        formulas: &[String],
        conditions: &EstimationConditions,
    ) -> Result<FreeEnergyEstimates, EstimationError> {
        if formulas.is_empty() {
            return Err(EstimationError::EmptyBatch);
        }
        // The tabulated energies are only valid at the conditions the
        // table was computed for
        if !conditions.approx_eq(&self.conditions) {
            return Err(EstimationError::UnsupportedConditions {
                table: self.conditions,
                requested: *conditions,
            });
        }

        let mut stoichiometries = Vec::with_capacity(formulas.len());
        for formula in formulas {
            let stoichiometry =
                parse_formula(formula).map_err(|source| EstimationError::Formula {
                    formula: formula.clone(),
                    source,
                })?;
            stoichiometries.push(stoichiometry);
        }

        // Assign every metabolite of the batch a stable row index
        let mut compound_index: IndexMap<String, usize> = IndexMap::new();
        for (formula, stoichiometry) in formulas.iter().zip(&stoichiometries) {
            for metabolite in stoichiometry.keys() {
                if !self.compounds.contains_key(metabolite) {
                    return Err(EstimationError::UnknownMetabolite {
                        formula: formula.clone(),
                        metabolite: metabolite.clone(),
                    });
                }
                let next = compound_index.len();
                compound_index.entry(metabolite.clone()).or_insert(next);
            }
        }

        let n_compounds = compound_index.len();
        let n_reactions = stoichiometries.len();
        let mut s_matrix: DMatrix<f64> = DMatrix::zeros(n_compounds, n_reactions);
        for (reaction, stoichiometry) in stoichiometries.iter().enumerate() {
            for (metabolite, coefficient) in stoichiometry {
                s_matrix[(compound_index[metabolite], reaction)] = *coefficient;
            }
        }

        let formation = DVector::from_iterator(
            n_compounds,
            compound_index
                .keys()
                .map(|metabolite| self.compounds[metabolite].dgf_prime),
        );
        let variances = DVector::from_iterator(
            n_compounds,
            compound_index
                .keys()
                .map(|metabolite| self.compounds[metabolite].variance),
        );
        let sigma = DMatrix::from_diagonal(&variances);

        let values = s_matrix.transpose() * &formation;
        let covariance = s_matrix.transpose() * &sigma * &s_matrix;
        if values.iter().any(|value| !value.is_finite()) {
            return Err(EstimationError::NonFiniteEstimate);
        }

        Ok(FreeEnergyEstimates { values, covariance })
    }
}

/// Enum representing possible estimation errors
#[derive(Debug, Error)]
pub enum EstimationError {
    #[error("cannot estimate free energies for an empty reaction batch")]
    EmptyBatch,
    #[error("unable to read formation energy table due to {0}")]
    UnableToRead(String),
    #[error("unable to parse formation energy table due to {0}")]
    UnableToParse(String),
    #[error("unable to parse reaction formula {formula:?}")]
    Formula {
        formula: String,
        source: FormulaParseError,
    },
    #[error("no formation energy available for metabolite {metabolite} in reaction {formula:?}")]
    UnknownMetabolite { formula: String, metabolite: String },
    #[error("formation energy table was computed at {table:?}, but {requested:?} was requested")]
    UnsupportedConditions {
        table: EstimationConditions,
        requested: EstimationConditions,
    },
    #[error("free energy estimate is not finite")]
    NonFiniteEstimate,
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use crate::thermo::estimator::{
        CompoundEnergy, EstimationConditions, EstimationError, FormationEnergyEstimator,
        GibbsEstimator,
    };

    fn estimator() -> FormationEnergyEstimator {
        let mut compounds = IndexMap::new();
        compounds.insert(
            "A".to_string(),
            CompoundEnergy {
                dgf_prime: -10.0,
                variance: 1.0,
            },
        );
        compounds.insert(
            "B".to_string(),
            CompoundEnergy {
                dgf_prime: -20.0,
                variance: 4.0,
            },
        );
        compounds.insert(
            "C".to_string(),
            CompoundEnergy {
                dgf_prime: -35.0,
                variance: 9.0,
            },
        );
        FormationEnergyEstimator::new(EstimationConditions::default(), compounds)
    }

    #[test]
    fn test_single_reaction_estimate() {
        let estimates = estimator()
            .estimate(
                &["A + B <=> C".to_string()],
                &EstimationConditions::default(),
            )
            .unwrap();
        // dG0 = -35 - (-10 - 20) = -5
        assert!((estimates.values[0] - (-5.0)).abs() < 1e-12);
        // variance = 1 + 4 + 9 = 14
        assert!((estimates.covariance[(0, 0)] - 14.0).abs() < 1e-12);
        assert!((estimates.std_devs()[0] - 14.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_covariance_couples_shared_compounds() {
        let estimates = estimator()
            .estimate(
                &["A + B <=> C".to_string(), "C <=> A".to_string()],
                &EstimationConditions::default(),
            )
            .unwrap();
        // cov(r1, r2) = sum_k s1_k * s2_k * var_k
        //             = (-1)(1)(1) + (1)(-1)(9) = -10
        assert!((estimates.covariance[(0, 1)] - (-10.0)).abs() < 1e-12);
        assert!((estimates.covariance[(1, 0)] - (-10.0)).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_metabolite() {
        match estimator().estimate(
            &["A <=> D".to_string()],
            &EstimationConditions::default(),
        ) {
            Err(EstimationError::UnknownMetabolite { formula, metabolite }) => {
                assert_eq!(formula, "A <=> D");
                assert_eq!(metabolite, "D");
            }
            other => panic!("Expected UnknownMetabolite, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_empty_batch() {
        match estimator().estimate(&[], &EstimationConditions::default()) {
            Err(EstimationError::EmptyBatch) => {}
            other => panic!("Expected EmptyBatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_condition_within_tolerance() {
        let requested = EstimationConditions {
            temperature: EstimationConditions::default().temperature + 1e-9,
            ..EstimationConditions::default()
        };
        assert!(estimator()
            .estimate(&["A <=> B".to_string()], &requested)
            .is_ok());
    }

    #[test]
    fn test_condition_mismatch() {
        let requested = EstimationConditions {
            temperature: 310.15,
            ..EstimationConditions::default()
        };
        match estimator().estimate(&["A <=> B".to_string()], &requested) {
            Err(EstimationError::UnsupportedConditions { .. }) => {}
            other => panic!("Expected UnsupportedConditions, got {:?}", other.map(|_| ())),
        }
    }
}
