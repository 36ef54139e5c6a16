//! Python Bindings for the estimator and planner (PyO3)
//!
//! Values cross the boundary as JSON strings in the same shape the Rust
//! types serialize to.

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
use crate::{assess, plan_deployment, CalculationInputs};

#[cfg(feature = "python")]
fn value_error(e: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(e.to_string())
}

/// Takes `CalculationInputs` as JSON, returns the `Assessment` as JSON.
#[cfg(feature = "python")]
#[pyfunction]
pub fn estimate_json(inputs_json: &str) -> PyResult<String> {
    let inputs: CalculationInputs = serde_json::from_str(inputs_json).map_err(value_error)?;
    let assessment = assess(&inputs).map_err(value_error)?;
    serde_json::to_string(&assessment)
        .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))
}

/// Returns the `DeploymentResult` as JSON, or `None` for an unknown GPU.
#[cfg(feature = "python")]
#[pyfunction]
pub fn plan_deployment_json(
    total_memory: f64,
    gpu_name: &str,
    gpus_per_node: u32,
) -> PyResult<Option<String>> {
    let plan = plan_deployment(total_memory, gpu_name, gpus_per_node).map_err(value_error)?;
    plan.map(|p| {
        serde_json::to_string(&p)
            .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))
    })
    .transpose()
}
