use crate::catalog::{GpusArgs, PresetsArgs};
use crate::estimate::EstimateArgs;
use crate::init::InitArgs;
use crate::plan::PlanArgs;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "LLM inference VRAM estimator and deployment planner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate VRAM for a model and workload
    Estimate(EstimateArgs),

    /// Plan GPUs and nodes for a known memory requirement
    Plan(PlanArgs),

    /// List catalogued GPUs
    Gpus(GpusArgs),

    /// List model architecture presets
    Presets(PresetsArgs),

    /// Write a default estimate config file
    Init(InitArgs),
}
