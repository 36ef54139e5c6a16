//! Catalog - static reference tables for GPUs and model architectures
//!
//! Both tables are read-only and process-wide. Entry names are stable and
//! double as lookup keys for callers populating selection lists.

use crate::inputs::CalculationInputs;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Hardware vendor of a catalogued accelerator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Vendor {
    #[serde(rename = "NVIDIA")]
    Nvidia,
    Ascend,
    Hygon,
    MetaX,
    Tianshu,
}

impl Vendor {
    pub fn label(&self) -> &'static str {
        match self {
            Vendor::Nvidia => "NVIDIA",
            Vendor::Ascend => "Ascend",
            Vendor::Hygon => "Hygon",
            Vendor::MetaX => "MetaX",
            Vendor::Tianshu => "Tianshu",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named accelerator and its on-board memory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpuModel {
    pub name: &'static str,
    pub memory_gb: f64,
    pub vendor: Vendor,
}

const fn gpu(name: &'static str, memory_gb: f64, vendor: Vendor) -> GpuModel {
    GpuModel {
        name,
        memory_gb,
        vendor,
    }
}

pub static GPU_CATALOG: &[GpuModel] = &[
    // Data centre
    gpu("NVIDIA B300", 288.0, Vendor::Nvidia),
    gpu("NVIDIA B200", 192.0, Vendor::Nvidia),
    gpu("NVIDIA H200", 141.0, Vendor::Nvidia),
    gpu("NVIDIA H100", 80.0, Vendor::Nvidia),
    gpu("NVIDIA H800", 80.0, Vendor::Nvidia),
    gpu("NVIDIA A100", 80.0, Vendor::Nvidia),
    gpu("NVIDIA A800-80GB", 80.0, Vendor::Nvidia),
    gpu("NVIDIA A800-40GB", 40.0, Vendor::Nvidia),
    gpu("NVIDIA A30", 24.0, Vendor::Nvidia),
    // China-market and L-series
    gpu("NVIDIA H20-141GB", 141.0, Vendor::Nvidia),
    gpu("NVIDIA H20-96GB", 96.0, Vendor::Nvidia),
    gpu("NVIDIA L40S", 48.0, Vendor::Nvidia),
    gpu("NVIDIA L40", 48.0, Vendor::Nvidia),
    gpu("NVIDIA L20", 48.0, Vendor::Nvidia),
    // Workstation / consumer
    gpu("NVIDIA A6000", 48.0, Vendor::Nvidia),
    gpu("RTX 4090 D", 24.0, Vendor::Nvidia),
    gpu("RTX 4090", 24.0, Vendor::Nvidia),
    gpu("Ascend 910B3-64GB", 64.0, Vendor::Ascend),
    gpu("Ascend 910B4-64GB", 64.0, Vendor::Ascend),
    gpu("Ascend 910B4-32GB", 32.0, Vendor::Ascend),
    gpu("Hygon K100-AI", 64.0, Vendor::Hygon),
    gpu("MetaX C550", 64.0, Vendor::MetaX),
    gpu("MetaX C500", 64.0, Vendor::MetaX),
    gpu("MetaX N260", 64.0, Vendor::MetaX),
    gpu("Tianshu MR-V100", 32.0, Vendor::Tianshu),
];

static GPU_INDEX: Lazy<HashMap<&'static str, &'static GpuModel>> =
    Lazy::new(|| GPU_CATALOG.iter().map(|g| (g.name, g)).collect());

/// Looks up a GPU by its exact catalog name.
pub fn find_gpu(name: &str) -> Option<&'static GpuModel> {
    GPU_INDEX.get(name).copied()
}

/// Named reference architecture used to pre-populate inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelPreset {
    pub name: &'static str,
    /// Total parameters, in billions
    pub params_billions: f64,
    pub layers: u32,
    pub hidden_size: u32,
    pub description: &'static str,
}

impl ModelPreset {
    /// Apply preset architecture to inputs. Workload and precision fields are untouched.
    pub fn apply(&self, inputs: &mut CalculationInputs) {
        inputs.param_count = self.params_billions;
        inputs.layers = self.layers;
        inputs.hidden_size = self.hidden_size;
    }
}

// Layer counts and hidden sizes for several entries are estimates.
pub static MODEL_PRESETS: &[ModelPreset] = &[
    ModelPreset {
        name: "DeepSeek-V3.2 (671B MoE)",
        params_billions: 671.0,
        layers: 61,
        hidden_size: 7168,
        description: "DeepSeek V3 (MoE). Uses total params for weights. Activations lower due to sparse active params.",
    },
    ModelPreset {
        name: "Qwen3-235B",
        params_billions: 235.0,
        layers: 104,
        hidden_size: 12288,
        description: "Qwen 3 235B Model (Estimated Specs)",
    },
    ModelPreset {
        name: "GPT-oss-120B",
        params_billions: 120.0,
        layers: 96,
        hidden_size: 10240,
        description: "Open Source GPT 120B Variant",
    },
    ModelPreset {
        name: "Qwen3-80B",
        params_billions: 80.0,
        layers: 80,
        hidden_size: 8192,
        description: "Qwen 3 80B Model (Estimated Specs)",
    },
    ModelPreset {
        name: "Kimi-k2-Thinking",
        params_billions: 1024.0,
        layers: 96,
        hidden_size: 16384,
        description: "Moonshot AI Kimi k2 (Thinking). Total Params: 1024B.",
    },
    ModelPreset {
        name: "Minimax-M2",
        params_billions: 100.0,
        layers: 88,
        hidden_size: 9126,
        description: "Minimax M2 (Estimated 100B)",
    },
    ModelPreset {
        name: "MImo-309B",
        params_billions: 309.0,
        layers: 120,
        hidden_size: 14336,
        description: "MImo 309B (Estimated)",
    },
    ModelPreset {
        name: "Qwen3-32B",
        params_billions: 32.0,
        layers: 64,
        hidden_size: 5120,
        description: "Qwen 3 32B Model (Estimated)",
    },
    ModelPreset {
        name: "GLM-4.6",
        params_billions: 358.0,
        layers: 80,
        hidden_size: 12288,
        description: "GLM-4.6. Total Params: 358B.",
    },
];

pub fn find_preset(name: &str) -> Option<&'static ModelPreset> {
    MODEL_PRESETS.iter().find(|p| p.name == name)
}
