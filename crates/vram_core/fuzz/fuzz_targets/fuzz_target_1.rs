#![no_main]
use libfuzzer_sys::fuzz_target;
use vram_core::{assess, plan_deployment, AttentionMode, CalculationInputs, Precision, GPU_CATALOG};

fn u32_at(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }

    // 1. Parse Parameters
    let param_count = f64::from_le_bytes(data[0..8].try_into().unwrap_or([0; 8]));
    let precision = Precision::ALL[data[8] as usize % Precision::ALL.len()];
    let kv_precision = Precision::ALL[data[9] as usize % Precision::ALL.len()];
    let attention = if data[10] & 1 == 1 {
        AttentionMode::GroupedQuery {
            kv_heads: u32::from(data[11]),
            attention_heads: u32::from(data[12]),
        }
    } else {
        AttentionMode::Standard
    };
    let gpu = GPU_CATALOG[data[13] as usize % GPU_CATALOG.len()];

    let inputs = CalculationInputs {
        param_count,
        precision,
        kv_precision,
        seq_length: u32_at(data, 14),
        batch_size: u32::from(data[18]),
        layers: u32::from(u16::from_le_bytes([data[19], data[20]])),
        hidden_size: u32_at(data, 21),
        attention,
        selected_gpu: Some(gpu.name.to_string()),
        gpus_per_node: u32::from(data[25]),
    };

    // 2. Valid inputs must never yield NaN or negative figures
    if let Ok(assessment) = assess(&inputs) {
        let r = &assessment.result;
        for v in [r.weight_memory, r.kv_cache_memory, r.activation_memory] {
            assert!(!v.is_nan() && v >= 0.0);
        }
    }

    // 3. Planner on raw memory values
    let memory = f64::from_le_bytes(data[24..32].try_into().unwrap_or([0; 8]));
    if let Ok(Some(plan)) = plan_deployment(memory, gpu.name, u32::from(data[26])) {
        assert!(plan.total_cards >= 1);
        assert!(plan.total_vram_gb >= plan.active_vram_gb());
    }
});
