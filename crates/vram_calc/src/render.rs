//! Text rendering of estimates and deployment plans

use crate::i18n::{category_label, reason_label, t, tier_label, Language};
use std::fmt::Write;
use vram_core::{Assessment, CalculationInputs, DeploymentResult, NodeAllocation, Recommendation};

const BAR_WIDTH: usize = 40;

/// Proportional bar for one breakdown slice.
fn bar(value: f64, total: f64) -> String {
    if total <= 0.0 {
        return String::new();
    }
    let filled = ((value / total) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.min(BAR_WIDTH))
}

pub fn render_inputs(inputs: &CalculationInputs, lang: Language) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {:<32} {}", t(lang, "params"), inputs.param_count);
    let _ = writeln!(out, "  {:<32} {}", t(lang, "precision"), inputs.precision);
    let _ = writeln!(out, "  {:<32} {}", t(lang, "kv_precision"), inputs.kv_precision);
    let _ = writeln!(out, "  {:<32} {}", t(lang, "layers"), inputs.layers);
    let _ = writeln!(out, "  {:<32} {}", t(lang, "hidden_size"), inputs.hidden_size);
    let _ = writeln!(out, "  {:<32} {}", t(lang, "context_window"), inputs.seq_length);
    let _ = writeln!(out, "  {:<32} {}", t(lang, "batch_size"), inputs.batch_size);
    if let vram_core::AttentionMode::GroupedQuery {
        kv_heads,
        attention_heads,
    } = inputs.attention
    {
        let _ = writeln!(out, "  {:<32} {}/{}", t(lang, "gqa"), kv_heads, attention_heads);
    }
    out
}

/// Racks beyond this many nodes collapse the full nodes into one line.
const RACK_DISPLAY_LIMIT: u64 = 16;
/// Nodes wider than this show slot counts instead of one glyph per slot.
const SLOT_DISPLAY_LIMIT: u32 = 64;

fn slots(node: &NodeAllocation) -> String {
    let width = node.active_cards + node.empty_slots;
    if width > SLOT_DISPLAY_LIMIT {
        return format!("{}/{}", node.active_cards, width);
    }
    format!(
        "{}{}",
        "■".repeat(node.active_cards as usize),
        "□".repeat(node.empty_slots as usize)
    )
}

/// Rack view: one line per node, `■` active GPU, `□` empty slot.
pub fn render_rack(plan: &DeploymentResult, lang: Language) -> String {
    let mut out = String::new();
    if plan.num_nodes <= RACK_DISPLAY_LIMIT {
        for node in plan.node_layout() {
            let _ = writeln!(
                out,
                "  {} {:>2} ({}x {}) {}",
                t(lang, "node"),
                node.index + 1,
                plan.cards_per_node,
                plan.gpu.name,
                slots(&node),
            );
        }
        return out;
    }

    let full = plan.full_nodes();
    if full > 0 {
        let _ = writeln!(
            out,
            "  {} 1-{} ({}x {}) {} ×{}",
            t(lang, "node"),
            full,
            plan.cards_per_node,
            plan.gpu.name,
            slots(&plan.node_at(0)),
            full,
        );
    }
    let last = plan.last_node();
    if last.empty_slots > 0 {
        let _ = writeln!(
            out,
            "  {} {} ({}x {}) {}",
            t(lang, "node"),
            last.index + 1,
            plan.cards_per_node,
            plan.gpu.name,
            slots(&last),
        );
    }
    out
}

pub fn render_plan(plan: &DeploymentResult, lang: Language) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", t(lang, "deployment_plan"));
    let _ = writeln!(
        out,
        "  {}x {} ({}: {})  {}: {} GB",
        plan.num_nodes,
        t(lang, "nodes"),
        t(lang, "gpus"),
        plan.total_cards,
        t(lang, "capacity"),
        plan.total_vram_gb
    );
    let marker = if plan.reason.is_optimized() { "⚠" } else { "•" };
    let _ = writeln!(out, "  {} {}", marker, reason_label(lang, plan.reason));
    out.push_str(&render_rack(plan, lang));
    out
}

pub fn render_assessment(inputs: &CalculationInputs, assessment: &Assessment, lang: Language) -> String {
    let result = &assessment.result;
    let mut out = String::new();

    let _ = writeln!(out, "=== {} ===", t(lang, "title"));
    out.push_str(&render_inputs(inputs, lang));
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", t(lang, "result_title"));
    let _ = writeln!(out, "  {}: {:.2} GB", t(lang, "total_usage"), result.total_memory);
    for item in &result.breakdown {
        let _ = writeln!(
            out,
            "  {:<20} {:>10.2} GB  {}",
            category_label(lang, item.category),
            item.value,
            bar(item.value, result.total_memory)
        );
    }
    let _ = writeln!(out);

    match &assessment.recommendation {
        Recommendation::Deployment(plan) => out.push_str(&render_plan(plan, lang)),
        Recommendation::Generic { tier } => {
            let _ = writeln!(out, "{}", t(lang, "generic_rec"));
            let marker = if tier.is_warning() { "⚠" } else { "•" };
            let _ = writeln!(out, "  {} {}", marker, tier_label(lang, *tier));
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", t(lang, "disclaimer"));
    out
}
