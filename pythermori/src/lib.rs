use std::path::PathBuf;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use thermori_core::batch::{run_batch, BatchConfigBuilder};
use thermori_core::thermo::estimator::FormationEnergyEstimator;

/// Run the uniform-concentration reversibility pipeline and return the
/// (name, RI) pairs in input order.
#[pyfunction]
fn reversibility_index(
    compound_table: PathBuf,
    reactions: PathBuf,
    output: PathBuf,
) -> PyResult<Vec<(String, f64)>> {
    let estimator = FormationEnergyEstimator::read_json(&compound_table).map_err(to_py_err)?;
    let config = BatchConfigBuilder::default()
        .reactions(reactions)
        .output(output)
        .build()
        .map_err(to_py_err)?;
    let results = run_batch(&config, &estimator).map_err(to_py_err)?;
    Ok(results
        .into_iter()
        .map(|(name, ri)| (name, ri.value))
        .collect())
}

/// Run the concentration-aware reversibility pipeline against one
/// experimental condition of a metabolomics table.
#[pyfunction]
fn reversibility_index_with_concentrations(
    compound_table: PathBuf,
    reactions: PathBuf,
    concentrations: PathBuf,
    condition: String,
    output: PathBuf,
) -> PyResult<Vec<(String, f64)>> {
    let estimator = FormationEnergyEstimator::read_json(&compound_table).map_err(to_py_err)?;
    let config = BatchConfigBuilder::default()
        .reactions(reactions)
        .output(output)
        .concentrations(Some(concentrations))
        .condition(Some(condition))
        .build()
        .map_err(to_py_err)?;
    let results = run_batch(&config, &estimator).map_err(to_py_err)?;
    Ok(results
        .into_iter()
        .map(|(name, ri)| (name, ri.value))
        .collect())
}

fn to_py_err<E: std::fmt::Display>(err: E) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(reversibility_index, m)?)?;
    m.add_function(wrap_pyfunction!(reversibility_index_with_concentrations, m)?)?;
    Ok(())
}
