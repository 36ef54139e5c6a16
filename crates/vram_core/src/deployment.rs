//! Deployment Planner - fits an estimated requirement onto catalogued hardware
//!
//! The card count is first derived purely from capacity, then adjusted by an
//! ordered list of tensor-parallelism rules so that the recommendation lands on
//! a split the common inference engines handle well.

use crate::catalog::{find_gpu, GpuModel};
use crate::error::{check_non_negative, check_positive, EstimateError, Result};
use crate::estimator::{estimate_with, CalculationResult, EstimatorTuning};
use crate::inputs::CalculationInputs;
use serde::Serialize;
use std::fmt;

/// Why a particular card count was recommended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanReason {
    FitsWithinVram,
    OptimizedTp4,
    OptimizedTp8,
}

impl PlanReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanReason::FitsWithinVram => "fits within total VRAM",
            PlanReason::OptimizedTp4 => "optimized for TP=4 (avoiding 3 cards)",
            PlanReason::OptimizedTp8 => "optimized for TP=8 (avoiding irregular splits)",
        }
    }

    /// True when a rule rounded the card count up past the capacity minimum.
    pub fn is_optimized(&self) -> bool {
        !matches!(self, PlanReason::FitsWithinVram)
    }
}

impl fmt::Display for PlanReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tensor-parallel rounding rule: `(min_cards, gpus_per_node) -> target_cards`.
pub struct TpRule {
    pub applies: fn(min_cards: u64, gpus_per_node: u32) -> bool,
    pub target_cards: u64,
    pub reason: PlanReason,
}

fn avoids_three_way(min_cards: u64, gpus_per_node: u32) -> bool {
    min_cards == 3 && gpus_per_node >= 4
}

fn avoids_irregular_split(min_cards: u64, gpus_per_node: u32) -> bool {
    min_cards > 4 && min_cards < 8 && gpus_per_node >= 8
}

/// Evaluated in order; the first match wins.
pub static TP_RULES: &[TpRule] = &[
    TpRule {
        applies: avoids_three_way,
        target_cards: 4,
        reason: PlanReason::OptimizedTp4,
    },
    TpRule {
        applies: avoids_irregular_split,
        target_cards: 8,
        reason: PlanReason::OptimizedTp8,
    },
];

/// Applies [`TP_RULES`] to a capacity-derived card count.
pub fn apply_tp_rules(min_cards: u64, gpus_per_node: u32) -> (u64, PlanReason) {
    TP_RULES
        .iter()
        .find(|rule| (rule.applies)(min_cards, gpus_per_node))
        .map(|rule| (rule.target_cards, rule.reason))
        .unwrap_or((min_cards, PlanReason::FitsWithinVram))
}

/// Active and empty GPU slots of one provisioned node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeAllocation {
    /// Zero-based node position
    pub index: u64,
    pub active_cards: u32,
    pub empty_slots: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentResult {
    pub gpu: GpuModel,
    /// Active GPUs needed
    pub total_cards: u64,
    /// Servers to provision
    pub num_nodes: u64,
    pub cards_per_node: u32,
    /// Capacity of the whole nodes purchased, in GB
    #[serde(rename = "total_vram")]
    pub total_vram_gb: f64,
    pub reason: PlanReason,
}

impl DeploymentResult {
    /// Allocation of the node at `index`. Nodes are filled in order, so only
    /// the last one may be partially populated.
    pub fn node_at(&self, index: u64) -> NodeAllocation {
        let per_node = u64::from(self.cards_per_node);
        let remaining = self.total_cards.saturating_sub(index.saturating_mul(per_node));
        let active = remaining.min(per_node) as u32;
        NodeAllocation {
            index,
            active_cards: active,
            empty_slots: self.cards_per_node - active,
        }
    }

    /// Lazy per-node layout; `num_nodes` can be far too large to collect.
    pub fn node_layout(&self) -> impl DoubleEndedIterator<Item = NodeAllocation> + '_ {
        (0..self.num_nodes).map(move |index| self.node_at(index))
    }

    pub fn last_node(&self) -> NodeAllocation {
        self.node_at(self.num_nodes.saturating_sub(1))
    }

    /// Nodes with every slot active.
    pub fn full_nodes(&self) -> u64 {
        self.total_cards / u64::from(self.cards_per_node)
    }

    /// Capacity of the active cards only.
    pub fn active_vram_gb(&self) -> f64 {
        self.total_cards as f64 * self.gpu.memory_gb
    }
}

/// Card counts at or beyond this cannot be represented as `u64`.
const MAX_CARDS: f64 = u64::MAX as f64;

/// Recommends cards and nodes of `gpu_name` for `total_memory` GB.
///
/// Returns `Ok(None)` when the GPU is not in the catalog; callers fall back
/// to [`GenericTier`].
pub fn plan_deployment(
    total_memory: f64,
    gpu_name: &str,
    gpus_per_node: u32,
) -> Result<Option<DeploymentResult>> {
    check_non_negative("total_memory", total_memory)?;
    check_positive("gpus_per_node", gpus_per_node.into())?;

    let Some(gpu) = find_gpu(gpu_name) else {
        tracing::debug!(gpu_name, "GPU not in catalog, no deployment plan");
        return Ok(None);
    };

    // Whole cards only; even an empty requirement occupies one card.
    let cards = (total_memory / gpu.memory_gb).ceil();
    if cards >= MAX_CARDS {
        return Err(EstimateError::TooLarge {
            field: "total_memory",
            value: total_memory,
        });
    }
    let min_cards_by_vram = (cards as u64).max(1);
    let (total_cards, reason) = apply_tp_rules(min_cards_by_vram, gpus_per_node);

    let num_nodes = total_cards.div_ceil(u64::from(gpus_per_node));
    let total_vram_gb = num_nodes as f64 * f64::from(gpus_per_node) * gpu.memory_gb;

    tracing::debug!(
        gpu = gpu.name,
        min_cards_by_vram,
        total_cards,
        num_nodes,
        %reason,
        "Deployment planned"
    );

    Ok(Some(DeploymentResult {
        gpu: *gpu,
        total_cards,
        num_nodes,
        cards_per_node: gpus_per_node,
        total_vram_gb,
        reason,
    }))
}

/// Coarse hardware class offered when no specific GPU plan is available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericTier {
    /// <= 24 GB
    ConsumerCard,
    /// <= 48 GB
    WorkstationCard,
    /// <= 80 GB
    DataCenterCard,
    /// <= 160 GB
    DualDataCenter,
    MultiGpuCluster,
}

impl GenericTier {
    pub fn for_memory(total_memory: f64) -> Self {
        if total_memory <= 24.0 {
            GenericTier::ConsumerCard
        } else if total_memory <= 48.0 {
            GenericTier::WorkstationCard
        } else if total_memory <= 80.0 {
            GenericTier::DataCenterCard
        } else if total_memory <= 160.0 {
            GenericTier::DualDataCenter
        } else {
            GenericTier::MultiGpuCluster
        }
    }

    /// A requirement beyond a single data-centre card with no concrete plan.
    pub fn is_warning(&self) -> bool {
        matches!(self, GenericTier::DualDataCenter | GenericTier::MultiGpuCluster)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    Deployment(DeploymentResult),
    Generic { tier: GenericTier },
}

/// Estimate plus hardware recommendation for one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub result: CalculationResult,
    pub recommendation: Recommendation,
}

/// Estimate, then plan against the selected GPU (if any and known).
pub fn assess(inputs: &CalculationInputs) -> Result<Assessment> {
    assess_with(inputs, &EstimatorTuning::default())
}

pub fn assess_with(inputs: &CalculationInputs, tuning: &EstimatorTuning) -> Result<Assessment> {
    let result = estimate_with(inputs, tuning)?;

    let plan = match inputs.gpu_name() {
        Some(name) => plan_deployment(result.total_memory, name, inputs.gpus_per_node)?,
        None => None,
    };

    let recommendation = match plan {
        Some(deployment) => Recommendation::Deployment(deployment),
        None => Recommendation::Generic {
            tier: GenericTier::for_memory(result.total_memory),
        },
    };

    Ok(Assessment {
        result,
        recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tp_rules_order() {
        assert_eq!(apply_tp_rules(1, 8), (1, PlanReason::FitsWithinVram));
        assert_eq!(apply_tp_rules(2, 8), (2, PlanReason::FitsWithinVram));
        assert_eq!(apply_tp_rules(3, 4), (4, PlanReason::OptimizedTp4));
        assert_eq!(apply_tp_rules(3, 3), (3, PlanReason::FitsWithinVram));
        assert_eq!(apply_tp_rules(4, 8), (4, PlanReason::FitsWithinVram));
        for n in 5..8 {
            assert_eq!(apply_tp_rules(n, 8), (8, PlanReason::OptimizedTp8));
            assert_eq!(apply_tp_rules(n, 4), (n, PlanReason::FitsWithinVram));
        }
        assert_eq!(apply_tp_rules(8, 8), (8, PlanReason::FitsWithinVram));
        assert_eq!(apply_tp_rules(9, 8), (9, PlanReason::FitsWithinVram));
    }

    #[test]
    fn test_node_layout_partial_last_node() -> anyhow::Result<()> {
        // 700 GB on 80 GB cards -> 9 cards, 8 per node
        let plan = plan_deployment(700.0, "NVIDIA H100", 8)?.expect("plan");
        assert_eq!(plan.total_cards, 9);
        assert_eq!(plan.num_nodes, 2);
        let layout: Vec<_> = plan.node_layout().collect();
        assert_eq!(
            layout,
            vec![
                NodeAllocation { index: 0, active_cards: 8, empty_slots: 0 },
                NodeAllocation { index: 1, active_cards: 1, empty_slots: 7 },
            ]
        );
        assert_eq!(plan.last_node(), layout[1]);
        assert_eq!(plan.full_nodes(), 1);
        assert_eq!(plan.active_vram_gb(), 720.0);
        assert_eq!(plan.total_vram_gb, 1280.0);
        Ok(())
    }

    #[test]
    fn test_huge_layout_stays_lazy() -> anyhow::Result<()> {
        // 1e8 GB on 24 GB cards, one per node: over four million nodes
        let plan = plan_deployment(1e8, "RTX 4090", 1)?.expect("plan");
        assert_eq!(plan.num_nodes, 4_166_667);
        assert_eq!(plan.full_nodes(), 4_166_667);
        assert_eq!(plan.last_node().index, 4_166_666);
        assert_eq!(plan.node_layout().next_back(), Some(plan.last_node()));
        assert_eq!(plan.node_layout().take(3).count(), 3);
        Ok(())
    }

    #[test]
    fn test_unrepresentable_card_count() {
        assert!(matches!(
            plan_deployment(1e30, "RTX 4090", 8),
            Err(EstimateError::TooLarge { field: "total_memory", .. })
        ));
        // An unknown GPU has no card count to overflow
        assert!(plan_deployment(1e30, "NotAGPU", 8).is_ok());
    }

    #[test]
    fn test_zero_requirement_uses_one_card() -> anyhow::Result<()> {
        let plan = plan_deployment(0.0, "RTX 4090", 1)?.expect("plan");
        assert_eq!(plan.total_cards, 1);
        assert_eq!(plan.num_nodes, 1);
        assert_eq!(plan.total_vram_gb, 24.0);
        Ok(())
    }

    #[test]
    fn test_plan_rejects_bad_inputs() {
        assert!(plan_deployment(-1.0, "NVIDIA A100", 8).is_err());
        assert!(plan_deployment(f64::NAN, "NVIDIA A100", 8).is_err());
        assert!(plan_deployment(10.0, "NVIDIA A100", 0).is_err());
    }

    #[test]
    fn test_generic_tiers() {
        assert_eq!(GenericTier::for_memory(24.0), GenericTier::ConsumerCard);
        assert_eq!(GenericTier::for_memory(24.01), GenericTier::WorkstationCard);
        assert_eq!(GenericTier::for_memory(80.0), GenericTier::DataCenterCard);
        assert_eq!(GenericTier::for_memory(150.0), GenericTier::DualDataCenter);
        assert_eq!(GenericTier::for_memory(1500.0), GenericTier::MultiGpuCluster);
        assert!(!GenericTier::DataCenterCard.is_warning());
        assert!(GenericTier::MultiGpuCluster.is_warning());
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(PlanReason::FitsWithinVram.to_string(), "fits within total VRAM");
        assert!(PlanReason::OptimizedTp4.as_str().contains("TP=4"));
        assert!(PlanReason::OptimizedTp8.is_optimized());
        assert!(!PlanReason::FitsWithinVram.is_optimized());
    }
}
