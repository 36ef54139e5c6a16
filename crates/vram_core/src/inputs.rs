//! CalculationInputs - the request value for estimation and planning

use crate::catalog::MODEL_PRESETS;
use crate::error::{check_non_negative, check_positive, EstimateError, Result};
use crate::precision::Precision;
use serde::{Deserialize, Serialize};

/// Attention layout, which decides how much of the full KV cache is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AttentionMode {
    /// Full multi-head attention, one KV head per query head
    #[default]
    Standard,
    /// Grouped-query attention: `attention_heads` query heads share `kv_heads` KV heads
    GroupedQuery { kv_heads: u32, attention_heads: u32 },
}

impl AttentionMode {
    /// Fraction of the full multi-head KV cache actually stored.
    /// Falls back to 1 when either head count is zero.
    pub fn kv_factor(&self) -> f64 {
        match *self {
            AttentionMode::GroupedQuery {
                kv_heads,
                attention_heads,
            } if kv_heads > 0 && attention_heads > 0 => {
                f64::from(kv_heads) / f64::from(attention_heads)
            }
            _ => 1.0,
        }
    }

    pub fn is_grouped(&self) -> bool {
        matches!(self, AttentionMode::GroupedQuery { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationInputs {
    /// Parameter count, in billions
    pub param_count: f64,
    pub precision: Precision,
    pub kv_precision: Precision,
    /// Context length in tokens
    pub seq_length: u32,
    pub batch_size: u32,
    pub layers: u32,
    pub hidden_size: u32,
    pub attention: AttentionMode,
    /// Catalog name of the target GPU. `None` means no deployment plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_gpu: Option<String>,
    pub gpus_per_node: u32,
}

impl Default for CalculationInputs {
    fn default() -> Self {
        let preset = &MODEL_PRESETS[0];
        Self {
            param_count: preset.params_billions,
            precision: Precision::Fp16,
            kv_precision: Precision::Fp16,
            seq_length: 8192,
            batch_size: 1,
            layers: preset.layers,
            hidden_size: preset.hidden_size,
            attention: AttentionMode::Standard,
            selected_gpu: None,
            gpus_per_node: 8,
        }
    }
}

impl CalculationInputs {
    /// Fail fast on values that would produce negative or NaN memory figures.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("param_count", self.param_count)?;
        check_positive("seq_length", self.seq_length.into())?;
        check_positive("batch_size", self.batch_size.into())?;
        check_positive("layers", self.layers.into())?;
        check_positive("hidden_size", self.hidden_size.into())?;
        check_positive("gpus_per_node", self.gpus_per_node.into())?;

        if let AttentionMode::GroupedQuery {
            kv_heads,
            attention_heads,
        } = self.attention
        {
            if kv_heads > attention_heads {
                return Err(EstimateError::InvalidGrouping {
                    kv_heads,
                    attention_heads,
                });
            }
        }
        Ok(())
    }

    /// Selected GPU name, treating an empty string as "none selected".
    pub fn gpu_name(&self) -> Option<&str> {
        self.selected_gpu
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kv_factor() {
        assert_eq!(AttentionMode::Standard.kv_factor(), 1.0);
        let gqa = AttentionMode::GroupedQuery {
            kv_heads: 8,
            attention_heads: 64,
        };
        assert_eq!(gqa.kv_factor(), 0.125);
        let degenerate = AttentionMode::GroupedQuery {
            kv_heads: 8,
            attention_heads: 0,
        };
        assert_eq!(degenerate.kv_factor(), 1.0);
        let no_kv = AttentionMode::GroupedQuery {
            kv_heads: 0,
            attention_heads: 32,
        };
        assert_eq!(no_kv.kv_factor(), 1.0);
    }

    #[test]
    fn test_default_is_valid() {
        let inputs = CalculationInputs::default();
        assert!(inputs.validate().is_ok());
        assert_eq!(inputs.seq_length, 8192);
        assert_eq!(inputs.gpus_per_node, 8);
        assert!(inputs.gpu_name().is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let inputs = CalculationInputs {
            param_count: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            inputs.validate(),
            Err(EstimateError::Negative { field: "param_count", .. })
        ));

        let inputs = CalculationInputs {
            param_count: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(inputs.validate(), Err(EstimateError::NonFinite { .. })));

        let inputs = CalculationInputs {
            batch_size: 0,
            ..Default::default()
        };
        assert_eq!(
            inputs.validate(),
            Err(EstimateError::MustBePositive { field: "batch_size" })
        );

        let inputs = CalculationInputs {
            gpus_per_node: 0,
            ..Default::default()
        };
        assert_eq!(
            inputs.validate(),
            Err(EstimateError::MustBePositive { field: "gpus_per_node" })
        );

        let inputs = CalculationInputs {
            attention: AttentionMode::GroupedQuery {
                kv_heads: 16,
                attention_heads: 8,
            },
            ..Default::default()
        };
        assert!(matches!(
            inputs.validate(),
            Err(EstimateError::InvalidGrouping { .. })
        ));
    }

    #[test]
    fn test_empty_gpu_name_is_none() {
        let mut inputs = CalculationInputs {
            selected_gpu: Some("  ".into()),
            ..Default::default()
        };
        assert!(inputs.gpu_name().is_none());
        inputs.selected_gpu = Some("NVIDIA H100".into());
        assert_eq!(inputs.gpu_name(), Some("NVIDIA H100"));
    }

    #[test]
    fn test_deserialize_partial_json() -> anyhow::Result<()> {
        let json = r#"{
            "param_count": 8.0,
            "layers": 32,
            "hidden_size": 4096,
            "attention": { "mode": "grouped_query", "kv_heads": 8, "attention_heads": 32 }
        }"#;
        let inputs: CalculationInputs = serde_json::from_str(json)?;
        assert_eq!(inputs.param_count, 8.0);
        assert_eq!(inputs.seq_length, 8192);
        assert_eq!(inputs.attention.kv_factor(), 0.25);
        assert_eq!(inputs.precision, Precision::Fp16);
        Ok(())
    }
}
