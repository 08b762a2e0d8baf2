//! Conversion of free-energy estimates into equilibrium constants

use thiserror::Error;

use crate::thermo::estimator::FreeEnergyEstimates;
use crate::thermo::uncertain::Uncertain;
use crate::thermo::R;

/// Convert ΔG0′ estimates into equilibrium constants via
/// Keq = exp(−ΔG0′ / (R·T)), propagating each estimate's uncertainty
/// through the exponential (σ_Keq = Keq·σ_ΔG0′/(R·T)).
///
/// Order preserving and element-wise; no cross-reaction coupling beyond
/// what the covariance diagonal already carries.
pub fn keq_from_dg0(
    estimates: &FreeEnergyEstimates,
    temperature: f64,
) -> Result<Vec<Uncertain>, EquilibriumError> {
    if estimates.is_empty() {
        return Err(EquilibriumError::EmptyBatch);
    }
    let rt = R * temperature;
    let mut keq = Vec::with_capacity(estimates.len());
    for dg0 in estimates.to_uncertain() {
        if !dg0.is_finite() {
            return Err(EquilibriumError::NonFiniteInput { value: dg0.value });
        }
        keq.push((-dg0 / rt).exp());
    }
    Ok(keq)
}

/// Enum representing possible equilibrium conversion errors
#[derive(Debug, Error)]
pub enum EquilibriumError {
    #[error("cannot convert an empty batch of free energies")]
    EmptyBatch,
    #[error("free energy input is not finite: {value}")]
    NonFiniteInput { value: f64 },
}

#[cfg(test)]
mod tests {
    use nalgebra::{DMatrix, DVector};

    use crate::thermo::equilibrium::{keq_from_dg0, EquilibriumError};
    use crate::thermo::estimator::FreeEnergyEstimates;
    use crate::thermo::R;

    fn estimates(values: Vec<f64>, variances: Vec<f64>) -> FreeEnergyEstimates {
        FreeEnergyEstimates {
            values: DVector::from_vec(values),
            covariance: DMatrix::from_diagonal(&DVector::from_vec(variances)),
        }
    }

    #[test]
    fn test_keq_matches_reference() {
        let temperature = 298.15;
        let batch = estimates(vec![-5.7, 12.3], vec![1.0, 4.0]);
        let keq = keq_from_dg0(&batch, temperature).unwrap();
        for (i, dg0) in [-5.7f64, 12.3].iter().enumerate() {
            let reference = (-dg0 / (R * temperature)).exp();
            assert!((keq[i].value - reference).abs() < 1e-9 * reference.abs());
        }
    }

    #[test]
    fn test_uncertainty_propagation() {
        let temperature = 298.15;
        let rt = R * temperature;
        let batch = estimates(vec![-5.7], vec![4.0]);
        let keq = keq_from_dg0(&batch, temperature).unwrap();
        // sigma_Keq = Keq * sigma_dG0 / (R*T)
        let expected = keq[0].value * 2.0 / rt;
        assert!((keq[0].std_dev - expected).abs() < 1e-9 * expected);
    }

    #[test]
    fn test_empty_batch() {
        let batch = estimates(vec![], vec![]);
        match keq_from_dg0(&batch, 298.15) {
            Err(EquilibriumError::EmptyBatch) => {}
            other => panic!("Expected EmptyBatch, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_input() {
        let batch = estimates(vec![f64::NAN], vec![1.0]);
        match keq_from_dg0(&batch, 298.15) {
            Err(EquilibriumError::NonFiniteInput { .. }) => {}
            other => panic!("Expected NonFiniteInput, got {:?}", other),
        }
    }
}
