use crate::config::EstimateConfig;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(short, long, default_value = "estimate.json")]
    pub output: PathBuf,

    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite an existing file
    #[arg(long, action)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "Config already exists at {:?} (use --force to overwrite)",
            args.output
        );
    }

    let mut config = EstimateConfig::default();
    if let Some(name) = args.name {
        config.name = name;
    }
    config.save(&args.output)?;
    println!("📁 Created {}", args.output.display());
    Ok(())
}
