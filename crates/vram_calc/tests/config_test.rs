use std::fs;
use vram_calc::config::EstimateConfig;
use vram_calc::estimate::EstimateArgs;
use vram_calc::init::{self, InitArgs};
use vram_core::{AttentionMode, CalculationInputs, EstimatorTuning, Precision};

#[test]
fn test_config_save_and_load() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("estimate.json");

    let config = EstimateConfig {
        name: "qwen-long-context".into(),
        inputs: CalculationInputs {
            param_count: 32.0,
            kv_precision: Precision::Int8,
            seq_length: 32768,
            attention: AttentionMode::GroupedQuery {
                kv_heads: 8,
                attention_heads: 64,
            },
            selected_gpu: Some("NVIDIA L40S".into()),
            ..Default::default()
        },
        tuning: EstimatorTuning {
            buffer_fraction: 0.1,
            ..Default::default()
        },
        ..Default::default()
    };
    config.save(&path)?;

    let loaded = EstimateConfig::load(&path)?;
    assert_eq!(loaded, config);
    Ok(())
}

#[test]
fn test_partial_config_uses_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("partial.json");
    fs::write(&path, r#"{ "name": "tiny", "inputs": { "param_count": 1.5, "precision": "BF16" } }"#)?;

    let loaded = EstimateConfig::load(&path)?;
    assert_eq!(loaded.name, "tiny");
    assert_eq!(loaded.inputs.param_count, 1.5);
    assert_eq!(loaded.inputs.precision, Precision::Bf16);
    assert_eq!(loaded.inputs.seq_length, 8192);
    assert_eq!(loaded.tuning, EstimatorTuning::default());
    Ok(())
}

#[test]
fn test_invalid_config_reports_path() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{ "inputs": { "precision": "FP8" } }"#)?;

    let err = EstimateConfig::load(&path).expect_err("invalid precision");
    assert!(format!("{:#}", err).contains("broken.json"));
    Ok(())
}

#[test]
fn test_flags_override_config_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("estimate.json");
    let mut config = EstimateConfig::default();
    config.inputs.attention = AttentionMode::GroupedQuery {
        kv_heads: 4,
        attention_heads: 32,
    };
    config.inputs.batch_size = 16;
    config.tuning.base_overhead_gb = 2.0;
    config.save(&path)?;

    let args = EstimateArgs {
        config: Some(path),
        batch_size: Some(2),
        no_gqa: true,
        ..Default::default()
    };
    let (inputs, tuning) = args.resolve()?;
    assert_eq!(inputs.batch_size, 2);
    assert_eq!(inputs.attention, AttentionMode::Standard);
    assert_eq!(tuning.base_overhead_gb, 2.0);
    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("estimate.json");

    init::run(InitArgs {
        output: output.clone(),
        name: Some("first".into()),
        force: false,
    })?;
    assert_eq!(EstimateConfig::load(&output)?.name, "first");

    assert!(init::run(InitArgs {
        output: output.clone(),
        name: None,
        force: false,
    })
    .is_err());

    init::run(InitArgs {
        output: output.clone(),
        name: Some("second".into()),
        force: true,
    })?;
    assert_eq!(EstimateConfig::load(&output)?.name, "second");
    Ok(())
}
