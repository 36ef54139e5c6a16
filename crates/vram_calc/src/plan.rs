use crate::i18n::{t, tier_label, Language};
use crate::render::render_plan;
use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use tracing::{info, warn};
use vram_core::{plan_deployment, GenericTier};

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Required memory in GB
    #[arg(long)]
    pub memory: f64,

    #[arg(long)]
    pub gpu: String,

    #[arg(long, default_value_t = 8)]
    pub gpus_per_node: u32,

    #[arg(long, action)]
    pub json: bool,

    #[arg(long, value_enum, default_value_t = Language::English)]
    pub lang: Language,
}

pub fn run(args: PlanArgs) -> Result<()> {
    run_to(args, &mut std::io::stdout().lock())
}

pub fn run_to(args: PlanArgs, out: &mut impl Write) -> Result<()> {
    info!("Planning {} GB on '{}' ({} per node)", args.memory, args.gpu, args.gpus_per_node);

    let plan = plan_deployment(args.memory, &args.gpu, args.gpus_per_node)
        .context("Invalid planning inputs")?;

    match plan {
        Some(plan) if args.json => writeln!(out, "{}", serde_json::to_string_pretty(&plan)?)?,
        Some(plan) => write!(out, "{}", render_plan(&plan, args.lang))?,
        None => {
            warn!("GPU '{}' is not in the catalog (see `gpus`)", args.gpu);
            let tier = GenericTier::for_memory(args.memory);
            if args.json {
                writeln!(out, "{}", serde_json::json!({ "kind": "generic", "tier": tier }))?;
            } else {
                writeln!(out, "{}", t(args.lang, "generic_rec"))?;
                writeln!(out, "  • {}", tier_label(args.lang, tier))?;
            }
        }
    }
    Ok(())
}
