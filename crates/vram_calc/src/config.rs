//! Estimate Configuration
//!
//! Handles saved estimate configurations and their serialization.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use vram_core::{CalculationInputs, EstimatorTuning};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EstimateConfig {
    pub name: String,
    pub created_at: String,
    // Model and workload
    pub inputs: CalculationInputs,
    // Heuristic coefficients
    pub tuning: EstimatorTuning,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            name: "New Estimate".to_string(),
            created_at: chrono::Local::now().to_rfc3339(),
            inputs: CalculationInputs::default(),
            tuning: EstimatorTuning::default(),
        }
    }
}

impl EstimateConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {:?}", path))?;
        let config: EstimateConfig = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config JSON in {:?}", path))?;
        tracing::debug!(name = %config.name, "Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write config to {:?}", path))?;
        tracing::info!("✅ Configuration saved to {:?}", path);
        Ok(())
    }
}
