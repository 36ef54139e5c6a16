//! Read-only catalog listings

use anyhow::Result;
use clap::Args;
use vram_core::{GPU_CATALOG, MODEL_PRESETS};

#[derive(Args, Debug, Clone, Default)]
pub struct GpusArgs {
    /// Only show one vendor (case-insensitive)
    #[arg(long)]
    pub vendor: Option<String>,

    #[arg(long, action)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PresetsArgs {
    #[arg(long, action)]
    pub json: bool,
}

pub fn run_gpus(args: GpusArgs) -> Result<()> {
    let gpus: Vec<_> = GPU_CATALOG
        .iter()
        .filter(|g| {
            args.vendor
                .as_deref()
                .map_or(true, |v| g.vendor.label().eq_ignore_ascii_case(v))
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&gpus)?);
        return Ok(());
    }

    println!("{:<22} {:>8}  {}", "GPU", "Memory", "Vendor");
    for g in gpus {
        println!("{:<22} {:>5} GB  {}", g.name, g.memory_gb, g.vendor);
    }
    Ok(())
}

pub fn run_presets(args: PresetsArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(MODEL_PRESETS)?);
        return Ok(());
    }

    println!("{:<26} {:>8} {:>7} {:>7}", "Preset", "Params", "Layers", "Hidden");
    for p in MODEL_PRESETS {
        println!(
            "{:<26} {:>7}B {:>7} {:>7}",
            p.name, p.params_billions, p.layers, p.hidden_size
        );
        println!("    {}", p.description);
    }
    Ok(())
}
