//! `estimate` command - builds inputs from config, preset and flags

use crate::config::EstimateConfig;
use crate::i18n::Language;
use crate::render::render_assessment;
use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use vram_core::{
    assess_with, find_preset, AttentionMode, CalculationInputs, EstimatorTuning, Precision,
    MODEL_PRESETS,
};

/// Later sources win: defaults < --config < --preset < explicit flags.
#[derive(Args, Debug, Clone, Default)]
pub struct EstimateArgs {
    /// JSON config written by `init`
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Model preset name (see `presets`)
    #[arg(long)]
    pub preset: Option<String>,

    /// Parameter count in billions
    #[arg(long)]
    pub params: Option<f64>,

    #[arg(long)]
    pub precision: Option<Precision>,

    #[arg(long)]
    pub kv_precision: Option<Precision>,

    #[arg(long)]
    pub seq_len: Option<u32>,

    #[arg(long)]
    pub batch_size: Option<u32>,

    #[arg(long)]
    pub layers: Option<u32>,

    #[arg(long)]
    pub hidden_size: Option<u32>,

    /// Enables grouped-query attention together with --attention-heads
    #[arg(long, requires = "attention_heads")]
    pub kv_heads: Option<u32>,

    #[arg(long, requires = "kv_heads")]
    pub attention_heads: Option<u32>,

    /// Force standard multi-head attention, overriding the config file
    #[arg(long, action, conflicts_with = "kv_heads")]
    pub no_gqa: bool,

    /// Target GPU name (see `gpus`)
    #[arg(long)]
    pub gpu: Option<String>,

    #[arg(long)]
    pub gpus_per_node: Option<u32>,

    /// Print the assessment as JSON
    #[arg(long, action)]
    pub json: bool,

    #[arg(long, value_enum, default_value_t = Language::English)]
    pub lang: Language,
}

impl EstimateArgs {
    pub fn resolve(&self) -> Result<(CalculationInputs, EstimatorTuning)> {
        let (mut inputs, tuning) = match &self.config {
            Some(path) => {
                let config = EstimateConfig::load(path)?;
                (config.inputs, config.tuning)
            }
            None => (CalculationInputs::default(), EstimatorTuning::default()),
        };

        if let Some(name) = &self.preset {
            let preset = find_preset(name).with_context(|| {
                let known: Vec<_> = MODEL_PRESETS.iter().map(|p| p.name).collect();
                format!("Unknown preset '{}'. Available: {}", name, known.join(", "))
            })?;
            preset.apply(&mut inputs);
        }

        if let Some(v) = self.params {
            inputs.param_count = v;
        }
        if let Some(v) = self.precision {
            inputs.precision = v;
        }
        if let Some(v) = self.kv_precision {
            inputs.kv_precision = v;
        }
        if let Some(v) = self.seq_len {
            inputs.seq_length = v;
        }
        if let Some(v) = self.batch_size {
            inputs.batch_size = v;
        }
        if let Some(v) = self.layers {
            inputs.layers = v;
        }
        if let Some(v) = self.hidden_size {
            inputs.hidden_size = v;
        }
        if let (Some(kv_heads), Some(attention_heads)) = (self.kv_heads, self.attention_heads) {
            inputs.attention = AttentionMode::GroupedQuery {
                kv_heads,
                attention_heads,
            };
        }
        if self.no_gqa {
            inputs.attention = AttentionMode::Standard;
        }
        if let Some(v) = &self.gpu {
            inputs.selected_gpu = Some(v.clone());
        }
        if let Some(v) = self.gpus_per_node {
            inputs.gpus_per_node = v;
        }

        Ok((inputs, tuning))
    }
}

pub fn run(args: EstimateArgs) -> Result<()> {
    run_to(args, &mut std::io::stdout().lock())
}

pub fn run_to(args: EstimateArgs, out: &mut impl Write) -> Result<()> {
    let (inputs, tuning) = args.resolve()?;
    info!(
        params = inputs.param_count,
        precision = %inputs.precision,
        seq_len = inputs.seq_length,
        batch = inputs.batch_size,
        "Estimating VRAM"
    );

    let assessment = assess_with(&inputs, &tuning).context("Invalid estimation inputs")?;
    info!("Total: {:.2} GB", assessment.result.total_memory);

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&assessment)?)?;
    } else {
        write!(out, "{}", render_assessment(&inputs, &assessment, args.lang))?;
    }
    Ok(())
}
