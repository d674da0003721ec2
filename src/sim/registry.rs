//! Remaining collectibles, grouped by tier
//!
//! Tiers form a strict precedence chain. Only the lowest tier that still has
//! active items is eligible for collection; emptied tiers stay empty because
//! items are never recreated mid-session.

use serde::{Deserialize, Serialize};

use super::state::{CollectibleItem, ItemState, TierId};

/// Items of one tier plus how many it started with
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TierBucket {
    pub total: u32,
    /// Active items in insertion order
    pub active: Vec<CollectibleItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectibleRegistry {
    /// Indexed by `TierId`
    tiers: Vec<TierBucket>,
}

impl CollectibleRegistry {
    /// Registry with `tier_count` empty tiers
    pub fn new(tier_count: usize) -> Self {
        Self {
            tiers: vec![TierBucket::default(); tier_count],
        }
    }

    pub fn insert(&mut self, item: CollectibleItem) {
        let idx = item.tier.index();
        if idx >= self.tiers.len() {
            self.tiers.resize_with(idx + 1, TierBucket::default);
        }
        let bucket = &mut self.tiers[idx];
        bucket.total += 1;
        bucket.active.push(item);
    }

    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    /// Tier ids, lowest first
    pub fn tier_ids(&self) -> impl Iterator<Item = TierId> + '_ {
        (0..self.tiers.len()).map(TierId)
    }

    /// Lowest tier that still has active items
    pub fn eligible_tier(&self) -> Option<TierId> {
        self.tiers
            .iter()
            .position(|b| !b.active.is_empty())
            .map(TierId)
    }

    /// Whether items of `tier` may currently be collected
    pub fn is_eligible(&self, tier: TierId) -> bool {
        self.eligible_tier() == Some(tier)
    }

    /// Active items of a tier in scan order
    pub fn active(&self, tier: TierId) -> &[CollectibleItem] {
        self.tiers
            .get(tier.index())
            .map(|b| b.active.as_slice())
            .unwrap_or(&[])
    }

    pub fn active_count(&self, tier: TierId) -> u32 {
        self.active(tier).len() as u32
    }

    pub fn total(&self, tier: TierId) -> u32 {
        self.tiers.get(tier.index()).map(|b| b.total).unwrap_or(0)
    }

    /// Active items across every tier
    pub fn active_total(&self) -> u32 {
        self.tiers.iter().map(|b| b.active.len() as u32).sum()
    }

    /// Every active item, lowest tier first
    pub fn iter_active(&self) -> impl Iterator<Item = &CollectibleItem> {
        self.tiers.iter().flat_map(|b| b.active.iter())
    }

    pub fn contains(&self, id: u32) -> bool {
        self.iter_active().any(|item| item.id == id)
    }

    /// True once every tier is empty
    pub fn is_cleared(&self) -> bool {
        self.tiers.iter().all(|b| b.active.is_empty())
    }

    /// Remove the item at `index` within `tier`, marking it collected
    ///
    /// Removal keeps the remaining items in insertion order.
    pub(crate) fn take(&mut self, tier: TierId, index: usize) -> CollectibleItem {
        let mut item = self.tiers[tier.index()].active.remove(index);
        item.state = ItemState::Collected;
        item
    }
}
