//! Internationalization (i18n) - Language support for reports
//!
//! Provides EN/ZH translations for all report text.

use clap::ValueEnum;
use vram_core::{GenericTier, MemoryCategory, PlanReason};

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Default, ValueEnum)]
pub enum Language {
    #[default]
    #[value(name = "en")]
    English,
    #[value(name = "zh")]
    Chinese,
}

/// Translate a key to the current language.
/// Unknown keys yield an empty string.
pub fn t(lang: Language, key: &str) -> &'static str {
    match (lang, key) {
        // === Titles ===
        (Language::Chinese, "title") => "大模型显存计算器",
        (Language::English, "title") => "LLM VRAM Estimator",
        (Language::Chinese, "result_title") => "估算结果",
        (Language::English, "result_title") => "Estimation Result",
        (Language::Chinese, "total_usage") => "预计显存总占用",
        (Language::English, "total_usage") => "Total estimated VRAM usage",

        // === Inputs ===
        (Language::Chinese, "params") => "参数量 (十亿/B)",
        (Language::English, "params") => "Parameters (Billions)",
        (Language::Chinese, "precision") => "权重精度",
        (Language::English, "precision") => "Weight Precision",
        (Language::Chinese, "kv_precision") => "KV Cache 精度",
        (Language::English, "kv_precision") => "KV Cache Precision",
        (Language::Chinese, "layers") => "层数 (Layers)",
        (Language::English, "layers") => "Layers",
        (Language::Chinese, "hidden_size") => "隐藏层大小 (Hidden Size)",
        (Language::English, "hidden_size") => "Hidden Size",
        (Language::Chinese, "context_window") => "上下文长度 (Seq Len)",
        (Language::English, "context_window") => "Context Window (Seq Len)",
        (Language::Chinese, "batch_size") => "批处理大小 (Batch Size)",
        (Language::English, "batch_size") => "Batch Size (Concurrent Users)",
        (Language::Chinese, "gqa") => "分组查询注意力 (GQA)",
        (Language::English, "gqa") => "Grouped-Query Attention",

        // === Breakdown ===
        (Language::Chinese, "weights") => "模型权重",
        (Language::English, "weights") => "Model Weights",
        (Language::Chinese, "kv_cache") => "KV 缓存",
        (Language::English, "kv_cache") => "KV Cache",
        (Language::Chinese, "overhead") => "系统开销与缓冲",
        (Language::English, "overhead") => "Overhead & Buffer",

        // === Deployment ===
        (Language::Chinese, "deployment_plan") => "具体部署方案",
        (Language::English, "deployment_plan") => "Specific Deployment Plan",
        (Language::Chinese, "generic_rec") => "通用推荐",
        (Language::English, "generic_rec") => "Generic Recommendation",
        (Language::Chinese, "nodes") => "台服务器",
        (Language::English, "nodes") => "Nodes",
        (Language::Chinese, "gpus") => "张显卡",
        (Language::English, "gpus") => "GPUs",
        (Language::Chinese, "capacity") => "总容量",
        (Language::English, "capacity") => "Capacity",
        (Language::Chinese, "node") => "节点",
        (Language::English, "node") => "Node",

        (Language::Chinese, "reason_fits") => "总显存可容纳",
        (Language::English, "reason_fits") => "Fits within total VRAM",
        (Language::Chinese, "reason_tp4") => "按 TP=4 优化 (避免 3 张卡)",
        (Language::English, "reason_tp4") => "Optimized for TP=4 (avoiding 3 cards)",
        (Language::Chinese, "reason_tp8") => "按 TP=8 优化 (避免不规则切分)",
        (Language::English, "reason_tp8") => "Optimized for TP=8 (avoiding irregular splits)",

        (Language::Chinese, "tier_consumer") => "单张高端消费级显卡 (24GB)",
        (Language::English, "tier_consumer") => "Single High-End Consumer GPU (24GB)",
        (Language::Chinese, "tier_workstation") => "工作站/专业卡 (48GB)",
        (Language::English, "tier_workstation") => "Prosumer/Workstation Card (48GB)",
        (Language::Chinese, "tier_datacenter") => "数据中心 A100/H100 (80GB)",
        (Language::English, "tier_datacenter") => "Data Center A100/H100 (80GB)",
        (Language::Chinese, "tier_dual") => "2张数据中心卡 (160GB+)",
        (Language::English, "tier_dual") => "2x Data Center Cards (160GB+)",
        (Language::Chinese, "tier_cluster") => "需要多卡集群",
        (Language::English, "tier_cluster") => "Multi-GPU Cluster Required",

        // === Footer ===
        (Language::Chinese, "disclaimer") => {
            "估算仅供参考。实际使用情况因推理引擎 (vLLM, Ollama, TGI) 和量化方法的不同而异。"
        }
        (Language::English, "disclaimer") => {
            "Estimations are theoretical. Actual usage varies by inference engine (vLLM, Ollama, TGI) and quantization method details."
        }

        // === Fallback ===
        _ => "",
    }
}

pub fn category_label(lang: Language, category: MemoryCategory) -> &'static str {
    let key = match category {
        MemoryCategory::Weights => "weights",
        MemoryCategory::KvCache => "kv_cache",
        MemoryCategory::Overhead => "overhead",
    };
    t(lang, key)
}

pub fn reason_label(lang: Language, reason: PlanReason) -> &'static str {
    let key = match reason {
        PlanReason::FitsWithinVram => "reason_fits",
        PlanReason::OptimizedTp4 => "reason_tp4",
        PlanReason::OptimizedTp8 => "reason_tp8",
    };
    t(lang, key)
}

pub fn tier_label(lang: Language, tier: GenericTier) -> &'static str {
    let key = match tier {
        GenericTier::ConsumerCard => "tier_consumer",
        GenericTier::WorkstationCard => "tier_workstation",
        GenericTier::DataCenterCard => "tier_datacenter",
        GenericTier::DualDataCenter => "tier_dual",
        GenericTier::MultiGpuCluster => "tier_cluster",
    };
    t(lang, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_is_translated() {
        for lang in [Language::English, Language::Chinese] {
            for c in [MemoryCategory::Weights, MemoryCategory::KvCache, MemoryCategory::Overhead] {
                assert!(!category_label(lang, c).is_empty());
            }
            for r in [PlanReason::FitsWithinVram, PlanReason::OptimizedTp4, PlanReason::OptimizedTp8] {
                assert!(!reason_label(lang, r).is_empty());
            }
            for tier in [
                GenericTier::ConsumerCard,
                GenericTier::WorkstationCard,
                GenericTier::DataCenterCard,
                GenericTier::DualDataCenter,
                GenericTier::MultiGpuCluster,
            ] {
                assert!(!tier_label(lang, tier).is_empty());
            }
        }
    }

    #[test]
    fn test_fallback() {
        assert_eq!(t(Language::English, "no_such_key"), "");
        assert_eq!(t(Language::Chinese, "title"), "大模型显存计算器");
    }
}
