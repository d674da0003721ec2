//! Tier-gated collection
//!
//! Each step collects at most one item, and only from the lowest tier that
//! still has items. Within that tier the first item in insertion order that
//! is in range wins, even when a later one is closer.

use glam::Vec2;

use super::registry::CollectibleRegistry;
use super::state::{Ball, CollectibleItem, TierId};
use crate::planar;
use crate::tuning::TierSpec;

/// A successful collection
#[derive(Debug, Clone)]
pub struct Collection {
    pub item: CollectibleItem,
    /// Ball growth after this collection
    pub growth: f32,
    /// True when this emptied the item's tier
    pub tier_completed: bool,
}

/// Index of the first item in scan order within range of `ball_pos`
pub fn first_in_range(items: &[CollectibleItem], ball_pos: Vec2) -> Option<usize> {
    items.iter().position(|item| {
        let distance = ball_pos.distance(item.pos);
        log::trace!("Distance to item {}: {:.3}", item.id, distance);
        distance < item.collect_radius
    })
}

/// Try to collect one item at the ball's current position
///
/// On success the item is removed from the registry and the ball grows by
/// its tier's multiplier.
pub fn resolve(
    ball: &mut Ball,
    registry: &mut CollectibleRegistry,
    tiers: &[TierSpec],
) -> Option<Collection> {
    let tier = registry.eligible_tier()?;
    let index = first_in_range(registry.active(tier), planar(ball.pos))?;

    let item = registry.take(tier, index);
    ball.growth *= growth_for(tiers, tier);
    let tier_completed = registry.active_count(tier) == 0;

    log::debug!(
        "Collected item {} (tier {}), growth now {:.4}",
        item.id,
        tier.0,
        ball.growth
    );

    Some(Collection {
        item,
        growth: ball.growth,
        tier_completed,
    })
}

/// Growth multiplier for a tier (1.0 when the tier has no spec)
fn growth_for(tiers: &[TierSpec], tier: TierId) -> f32 {
    tiers.get(tier.index()).map(|t| t.growth).unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ItemState;
    use crate::tuning::Tuning;
    use glam::Vec3;

    fn item(id: u32, tier: usize, x: f32, z: f32, radius: f32) -> CollectibleItem {
        CollectibleItem {
            id,
            tier: TierId(tier),
            pos: Vec2::new(x, z),
            collect_radius: radius,
            scale: 1.0,
            state: ItemState::Active,
        }
    }

    fn ball_at(x: f32, z: f32) -> Ball {
        let mut ball = Ball::new(1.0, 0.005);
        ball.pos = Vec3::new(x, 1.0, z);
        ball
    }

    #[test]
    fn test_collects_in_range() {
        let tiers = Tuning::default().tiers;
        let mut registry = CollectibleRegistry::new(3);
        registry.insert(item(1, 0, 3.0, 0.0, 5.0));
        let mut ball = ball_at(0.0, 0.0);

        let collection = resolve(&mut ball, &mut registry, &tiers).unwrap();
        assert_eq!(collection.item.id, 1);
        assert_eq!(collection.item.state, ItemState::Collected);
        assert!(collection.tier_completed);
        assert!((ball.growth - 1.06).abs() < 1e-6);
        assert!(registry.is_cleared());
    }

    #[test]
    fn test_radius_is_strict() {
        let tiers = Tuning::default().tiers;
        let mut registry = CollectibleRegistry::new(1);
        registry.insert(item(1, 0, 5.0, 0.0, 5.0));
        let mut ball = ball_at(0.0, 0.0);
        assert!(resolve(&mut ball, &mut registry, &tiers).is_none());
        assert_eq!(ball.growth, 1.0);
    }

    #[test]
    fn test_height_does_not_matter() {
        // Ball sits at y = 1, items on the floor: distance is planar
        let tiers = Tuning::default().tiers;
        let mut registry = CollectibleRegistry::new(1);
        registry.insert(item(1, 0, 0.0, 4.99, 5.0));
        let mut ball = ball_at(0.0, 0.0);
        assert!(resolve(&mut ball, &mut registry, &tiers).is_some());
    }

    #[test]
    fn test_higher_tier_is_gated() {
        let tiers = Tuning::default().tiers;
        let mut registry = CollectibleRegistry::new(3);
        registry.insert(item(1, 0, 50.0, 50.0, 5.0));
        registry.insert(item(2, 1, 0.0, 0.0, 5.0));
        let mut ball = ball_at(0.0, 0.0);

        assert!(resolve(&mut ball, &mut registry, &tiers).is_none());
        assert!(registry.contains(2));
    }

    #[test]
    fn test_one_per_step_in_scan_order() {
        let tiers = Tuning::default().tiers;
        let mut registry = CollectibleRegistry::new(1);
        registry.insert(item(1, 0, 4.0, 0.0, 5.0));
        registry.insert(item(2, 0, 0.5, 0.0, 5.0));
        let mut ball = ball_at(0.0, 0.0);

        // Item 2 is closer, but item 1 comes first
        let first = resolve(&mut ball, &mut registry, &tiers).unwrap();
        assert_eq!(first.item.id, 1);
        assert!(!first.tier_completed);
        assert_eq!(registry.active_count(TierId(0)), 1);

        let second = resolve(&mut ball, &mut registry, &tiers).unwrap();
        assert_eq!(second.item.id, 2);
        assert!((ball.growth - 1.06 * 1.06).abs() < 1e-5);
    }

    #[test]
    fn test_next_tier_opens_after_clear() {
        let tiers = Tuning::default().tiers;
        let mut registry = CollectibleRegistry::new(3);
        registry.insert(item(1, 0, 1.0, 0.0, 5.0));
        registry.insert(item(2, 2, 1.0, 0.0, 10.0));
        let mut ball = ball_at(0.0, 0.0);

        assert_eq!(resolve(&mut ball, &mut registry, &tiers).unwrap().item.id, 1);
        // Tier 1 was empty from the start, so tier 2 is next
        let chair = resolve(&mut ball, &mut registry, &tiers).unwrap();
        assert_eq!(chair.item.tier, TierId(2));
        assert!((ball.growth - 1.06 * 1.09).abs() < 1e-5);
    }
}
