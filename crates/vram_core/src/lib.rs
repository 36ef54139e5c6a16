//! VRAM Core
//!
//! Closed-form GPU memory estimation for transformer inference, plus a
//! rule-based hardware deployment planner.
//! Provides both native Rust bindings and optional Python bindings via PyO3.

#![allow(non_local_definitions)]

pub mod catalog;
pub mod deployment;
pub mod error;
pub mod estimator;
pub mod inputs;
pub mod precision;
pub mod python;

pub use catalog::{find_gpu, find_preset, GpuModel, ModelPreset, Vendor, GPU_CATALOG, MODEL_PRESETS};
pub use deployment::{
    apply_tp_rules, assess, assess_with, plan_deployment, Assessment, DeploymentResult,
    GenericTier, NodeAllocation, PlanReason, Recommendation, TpRule, TP_RULES,
};
pub use error::EstimateError;
pub use estimator::{
    estimate, estimate_with, round2, BreakdownItem, CalculationResult, EstimatorTuning,
    MemoryCategory,
};
pub use inputs::{AttentionMode, CalculationInputs};
pub use precision::Precision;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn vram_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(python::estimate_json, m)?)?;
    m.add_function(wrap_pyfunction!(python::plan_deployment_json, m)?)?;
    Ok(())
}
