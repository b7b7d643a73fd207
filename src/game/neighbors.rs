/// Neighbor finding - the first consumer of the spatial grid.
///
/// Every tick, after the reindex pass, each awake tracked entity gets its
/// `Neighbors` list refilled from a radius query centered on itself. The
/// entity's own Vec is handed to the query as the out-buffer, so steady-state
/// operation allocates nothing.

use bevy::prelude::*;
use crate::game::config::InitialConfig;
use crate::game::simulation::{Body, Neighbors, SimSet, SimTick};
use crate::game::spatial_hash::{SpatialGrid, SpatialHashed};
use crate::profile_log;

pub struct NeighborsPlugin;

impl Plugin for NeighborsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, find_neighbors.in_set(SimSet::Sense));
    }
}

/// Refresh every awake entity's neighbor list from the spatial grid.
///
/// Sleeping entities keep their stale list: they have not moved, and anything
/// that moved near them will discover the contact from its own fresh list.
/// The search radius scales with body size so large dice still see partners
/// beyond the minimum two-cell neighborhood.
pub fn find_neighbors(
    grid: Res<SpatialGrid>,
    mut query: Query<(&Transform, &Body, &mut Neighbors), With<SpatialHashed>>,
    config: Res<InitialConfig>,
    #[allow(unused_variables)] tick: Res<SimTick>,
) {
    for (transform, body, mut neighbors) in query.iter_mut() {
        if body.sleeping {
            continue;
        }

        let radius = config.min_neighbor_radius.max(body.radius * 2.0);
        grid.query_radius(
            transform.translation,
            radius,
            config.max_neighbors,
            &mut neighbors.0,
        );
    }

    profile_log!(tick, "[NEIGHBORS] Lists refreshed: {}", query.iter().len());
}
