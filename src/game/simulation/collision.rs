/// Collision response driven by the broad-phase neighbor lists.
///
/// No all-pairs scan happens anywhere in here: candidate pairs come straight
/// from each entity's `Neighbors` component, which the spatial grid
/// populated earlier in the tick. The lists are over-inclusive (square cell
/// neighborhood), so every pair still gets a real circle-overlap test.

use bevy::prelude::*;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::game::config::InitialConfig;
use crate::profile_log;
use super::components::{Body, Neighbors};
use super::resources::SimTick;

/// Push overlapping bodies apart and wake them.
///
/// First pass collects impulses read-only (pairs deduplicated, since both
/// sides usually list each other), second pass applies them. A sleeping body
/// never initiates a contact from its own (stale) list, but an awake
/// neighbor's list will find it, push it, and wake it.
pub fn resolve_contacts(
    mut query: Query<(Entity, &Transform, &mut Body, &Neighbors)>,
    config: Res<InitialConfig>,
    #[allow(unused_variables)] tick: Res<SimTick>,
) {
    let strength = config.collision_push_strength;

    let mut seen: FxHashSet<(Entity, Entity)> = FxHashSet::default();
    let mut impulses: SmallVec<[(Entity, Vec3); 32]> = SmallVec::new();

    for (entity, transform, body, neighbors) in query.iter() {
        if body.sleeping {
            continue;
        }
        for &other in &neighbors.0 {
            if other == entity {
                continue;
            }
            let pair = if entity < other { (entity, other) } else { (other, entity) };
            if !seen.insert(pair) {
                continue;
            }
            let Ok((_, other_transform, other_body, _)) = query.get(other) else {
                continue;
            };

            let mut delta = transform.translation - other_transform.translation;
            delta.z = 0.0;
            let min_dist = body.radius + other_body.radius;
            let dist_sq = delta.length_squared();

            if dist_sq < min_dist * min_dist && dist_sq > 0.0001 {
                let dist = dist_sq.sqrt();
                let overlap = min_dist - dist;
                let impulse = delta / dist * overlap * strength;

                impulses.push((entity, impulse));
                impulses.push((other, -impulse));
            }
        }
    }

    profile_log!(tick, "[COLLISION] Contacts: {}", impulses.len() / 2);

    for (entity, impulse) in impulses {
        if let Ok((_, _, mut body, _)) = query.get_mut(entity) {
            body.wake();
            body.velocity += impulse;
        }
    }
}
