//! Example script to verify VRAM estimation math without the CLI
//! Run with: cargo run --example check_vram_math

use vram_core::{
    assess, plan_deployment, AttentionMode, CalculationInputs, Precision, Recommendation,
};

fn main() -> anyhow::Result<()> {
    println!("=== VRAM Estimation Verification ===\n");

    // Case 1: Llama-3-8B class, FP16, 8K context
    let mut inputs = CalculationInputs {
        param_count: 8.0,
        layers: 32,
        hidden_size: 4096,
        seq_length: 8192,
        ..Default::default()
    };
    print_metrics("8B FP16 (L=32, Dim=4096, Seq=8192)", &inputs)?;

    // Case 2: Same model, INT4 weights
    inputs.precision = Precision::Int4;
    print_metrics("8B INT4 weights", &inputs)?;

    // Case 3: 70B class with GQA on H100 nodes
    inputs = CalculationInputs {
        param_count: 70.0,
        layers: 80,
        hidden_size: 8192,
        seq_length: 32768,
        batch_size: 4,
        attention: AttentionMode::GroupedQuery {
            kv_heads: 8,
            attention_heads: 64,
        },
        selected_gpu: Some("NVIDIA H100".to_string()),
        ..Default::default()
    };
    print_metrics("70B FP16 GQA=8/64, Seq=32K, Batch=4 on H100", &inputs)?;

    // Case 4: Raw planner, 3 cards -> TP=4
    if let Some(plan) = plan_deployment(230.0, "NVIDIA A100", 8)? {
        println!("Planner: 230 GB on A100 x8/node");
        println!(
            "  - Cards: {}  Nodes: {}  Capacity: {} GB  ({})",
            plan.total_cards, plan.num_nodes, plan.total_vram_gb, plan.reason
        );
    }
    Ok(())
}

fn print_metrics(label: &str, inputs: &CalculationInputs) -> anyhow::Result<()> {
    let assessment = assess(inputs)?;
    let r = &assessment.result;

    println!("Scenario: [{}]", label);
    println!("  - Weights   : {:.2} GB", r.weight_memory);
    println!("  - KV Cache  : {:.2} GB", r.kv_cache_memory);
    println!("  - Overhead  : {:.2} GB", r.activation_memory);
    println!("  - TOTAL     : {:.2} GB", r.total_memory);
    match &assessment.recommendation {
        Recommendation::Deployment(plan) => println!(
            "  - Plan      : {} node(s), {} x {} ({})",
            plan.num_nodes, plan.total_cards, plan.gpu.name, plan.reason
        ),
        Recommendation::Generic { tier } => println!("  - Tier      : {:?}", tier),
    }
    println!("--------------------------------------------------");
    Ok(())
}
