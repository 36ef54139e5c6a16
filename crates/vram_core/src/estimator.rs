//! Estimator - closed-form VRAM estimate for transformer inference
//!
//! All magnitudes are in GB (bytes / 1e9). Parameter counts are given in
//! billions, so `params * bytes_per_element` is already in GB.

use crate::error::{check_non_negative, Result};
use crate::inputs::CalculationInputs;
use serde::{Deserialize, Serialize};

/// Non-scaling runtime/framework cost
pub const BASE_SYSTEM_OVERHEAD_GB: f64 = 0.5;
/// Share of the naive full activation footprint assumed live at once (1/N)
pub const ACTIVATION_DIVISOR: f64 = 100.0;
/// Safety buffer on top of weights + KV cache
pub const BUFFER_FRACTION: f64 = 0.05;
pub const BYTES_PER_GB: f64 = 1e9;

/// Empirical coefficients of the overhead heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorTuning {
    pub base_overhead_gb: f64,
    pub activation_divisor: f64,
    pub buffer_fraction: f64,
}

impl Default for EstimatorTuning {
    fn default() -> Self {
        Self {
            base_overhead_gb: BASE_SYSTEM_OVERHEAD_GB,
            activation_divisor: ACTIVATION_DIVISOR,
            buffer_fraction: BUFFER_FRACTION,
        }
    }
}

impl EstimatorTuning {
    fn validate(&self) -> Result<()> {
        check_non_negative("base_overhead_gb", self.base_overhead_gb)?;
        check_non_negative("buffer_fraction", self.buffer_fraction)?;
        check_non_negative("activation_divisor", self.activation_divisor)?;
        if self.activation_divisor == 0.0 {
            return Err(crate::EstimateError::MustBePositive {
                field: "activation_divisor",
            });
        }
        Ok(())
    }
}

/// Stable identifier of a breakdown slice, used for relabelling in any language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryCategory {
    Weights,
    KvCache,
    Overhead,
}

impl MemoryCategory {
    pub fn color(&self) -> &'static str {
        match self {
            MemoryCategory::Weights => "#3b82f6",
            MemoryCategory::KvCache => "#8b5cf6",
            MemoryCategory::Overhead => "#94a3b8",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MemoryCategory::Weights => "Model Weights",
            MemoryCategory::KvCache => "KV Cache",
            MemoryCategory::Overhead => "Overhead & Buffer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub category: MemoryCategory,
    /// GB, rounded to 2 decimals
    pub value: f64,
    pub color: String,
}

impl BreakdownItem {
    fn new(category: MemoryCategory, value: f64) -> Self {
        Self {
            category,
            value,
            color: category.color().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub weight_memory: f64,
    pub kv_cache_memory: f64,
    pub activation_memory: f64,
    pub total_memory: f64,
    pub breakdown: [BreakdownItem; 3],
}

/// Round half away from zero to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimate with the default coefficients.
pub fn estimate(inputs: &CalculationInputs) -> Result<CalculationResult> {
    estimate_with(inputs, &EstimatorTuning::default())
}

pub fn estimate_with(inputs: &CalculationInputs, tuning: &EstimatorTuning) -> Result<CalculationResult> {
    inputs.validate()?;
    tuning.validate()?;

    let bytes_per_weight = inputs.precision.bytes_per_element();
    let bytes_per_kv = inputs.kv_precision.bytes_per_element();

    let layers = f64::from(inputs.layers);
    let hidden = f64::from(inputs.hidden_size);
    let seq = f64::from(inputs.seq_length);
    let batch = f64::from(inputs.batch_size);

    // 1. Weights
    let weight_memory = inputs.param_count * bytes_per_weight;

    // 2. KV cache: K and V tensors per layer
    let kv_factor = inputs.attention.kv_factor();
    let total_kv_bytes = 2.0 * layers * hidden * seq * batch * bytes_per_kv * kv_factor;
    let kv_cache_memory = total_kv_bytes / BYTES_PER_GB;

    // 3. Overhead = base + activations + buffer
    let activation_estimate =
        (batch * seq * hidden * layers * bytes_per_weight) / tuning.activation_divisor / BYTES_PER_GB;
    let buffer_memory = (weight_memory + kv_cache_memory) * tuning.buffer_fraction;
    let activation_memory = tuning.base_overhead_gb + activation_estimate + buffer_memory;

    let total_memory = weight_memory + kv_cache_memory + activation_memory;
    // Finite inputs can still overflow to infinity.
    check_non_negative("total_memory", total_memory)?;

    tracing::debug!(
        weight_memory,
        kv_cache_memory,
        activation_memory,
        total_memory,
        kv_factor,
        "VRAM estimate computed"
    );

    let weight_memory = round2(weight_memory);
    let kv_cache_memory = round2(kv_cache_memory);
    let activation_memory = round2(activation_memory);

    Ok(CalculationResult {
        weight_memory,
        kv_cache_memory,
        activation_memory,
        total_memory: round2(total_memory),
        breakdown: [
            BreakdownItem::new(MemoryCategory::Weights, weight_memory),
            BreakdownItem::new(MemoryCategory::KvCache, kv_cache_memory),
            BreakdownItem::new(MemoryCategory::Overhead, activation_memory),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::Precision;

    fn llama_8b() -> CalculationInputs {
        CalculationInputs {
            param_count: 8.0,
            layers: 32,
            hidden_size: 4096,
            seq_length: 8192,
            batch_size: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(4.294967296), 4.29);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(16.0), 16.0);
    }

    #[test]
    fn test_overhead_components() -> anyhow::Result<()> {
        let r = estimate(&llama_8b())?;
        // base 0.5 + activations (1*8192*4096*32*2/100/1e9) + 5% of (16 + 4.294967296)
        let expected = 0.5 + 0.021474836480 + 0.05 * (16.0 + 4.294967296);
        assert_eq!(r.activation_memory, round2(expected));
        assert_eq!(r.activation_memory, 1.54);
        assert_eq!(r.total_memory, 21.83);
        Ok(())
    }

    #[test]
    fn test_custom_tuning() -> anyhow::Result<()> {
        let tuning = EstimatorTuning {
            base_overhead_gb: 0.0,
            activation_divisor: 1e12,
            buffer_fraction: 0.0,
        };
        let r = estimate_with(&llama_8b(), &tuning)?;
        assert_eq!(r.activation_memory, 0.0);
        assert_eq!(r.total_memory, round2(16.0 + 4.294967296));
        Ok(())
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let inputs = CalculationInputs {
            param_count: 1e308,
            ..llama_8b()
        };
        assert!(matches!(
            estimate(&inputs),
            Err(crate::EstimateError::NonFinite { field: "total_memory", .. })
        ));
    }

    #[test]
    fn test_invalid_tuning() {
        let tuning = EstimatorTuning {
            activation_divisor: 0.0,
            ..Default::default()
        };
        assert!(estimate_with(&llama_8b(), &tuning).is_err());
    }

    #[test]
    fn test_breakdown_shape() -> anyhow::Result<()> {
        let inputs = CalculationInputs {
            kv_precision: Precision::Int8,
            ..llama_8b()
        };
        let r = estimate(&inputs)?;
        let categories: Vec<_> = r.breakdown.iter().map(|b| b.category).collect();
        assert_eq!(
            categories,
            vec![MemoryCategory::Weights, MemoryCategory::KvCache, MemoryCategory::Overhead]
        );
        assert_eq!(r.breakdown[0].value, r.weight_memory);
        assert_eq!(r.breakdown[1].value, r.kv_cache_memory);
        assert_eq!(r.breakdown[2].value, r.activation_memory);
        assert_eq!(r.breakdown[1].color, "#8b5cf6");
        Ok(())
    }
}
