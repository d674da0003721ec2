//! Per-tier progress derived from the registry

use std::fmt;

use serde::{Deserialize, Serialize};

use super::registry::CollectibleRegistry;
use super::state::TierId;
use crate::tuning::TierSpec;

/// Progress of a single tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierScore {
    pub tier: TierId,
    pub name: String,
    pub collected: u32,
    pub total: u32,
    pub completed: bool,
}

impl TierScore {
    pub fn for_tier(registry: &CollectibleRegistry, tier: TierId, name: &str) -> Self {
        let total = registry.total(tier);
        let active = registry.active_count(tier);
        Self {
            tier,
            name: name.to_string(),
            collected: total - active,
            total,
            completed: active == 0,
        }
    }
}

impl fmt::Display for TierScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.completed {
            write!(f, "{}: Completed", self.name)
        } else {
            write!(f, "{}: {}/{}", self.name, self.collected, self.total)
        }
    }
}

/// Read-only view over every tier
pub struct ScoreBoard;

impl ScoreBoard {
    /// Scores for every tier, lowest first
    pub fn scores(registry: &CollectibleRegistry, tiers: &[TierSpec]) -> Vec<TierScore> {
        registry
            .tier_ids()
            .map(|tier| Self::score(registry, tiers, tier))
            .collect()
    }

    /// Score of one tier; tiers without a spec get a numbered name
    pub fn score(registry: &CollectibleRegistry, tiers: &[TierSpec], tier: TierId) -> TierScore {
        match tiers.get(tier.index()) {
            Some(spec) => TierScore::for_tier(registry, tier, &spec.name),
            None => TierScore::for_tier(registry, tier, &format!("Tier {}", tier.0)),
        }
    }

    /// Items collected across every tier
    pub fn collected_total(registry: &CollectibleRegistry) -> u32 {
        registry
            .tier_ids()
            .map(|tier| registry.total(tier) - registry.active_count(tier))
            .sum()
    }
}
