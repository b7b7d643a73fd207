use bevy::prelude::*;
use crate::game::simulation::{Body, SimTick};
use crate::profile_log;
use super::{SpatialGrid, SpatialHashed};

/// Detach entities that left the tracked set since the last tick.
///
/// Bevy buffers `SpatialHashed` removals (marker dropped or entity
/// despawned) no matter where in the frame they happened, so draining them
/// here, ahead of the reindex pass and therefore ahead of every query this
/// tick, guarantees queries never return destroyed entities. `detach` is
/// idempotent, so a stray double-report is harmless.
pub fn flush_detached(
    mut grid: ResMut<SpatialGrid>,
    mut removed: RemovedComponents<SpatialHashed>,
) {
    for entity in removed.read() {
        grid.detach(entity);
    }
}

/// Per-tick reindex pass: file every tracked entity under its current cell.
///
/// Runs after integration has moved entities and before any consumer reads
/// the index. Sleeping bodies are skipped: a sleeping body is never
/// integrated, so it cannot have changed cell since it was last filed.
/// (Mutating the position of a body without waking it first violates that
/// contract and will leave the index stale.)
pub fn reindex_tracked(
    mut grid: ResMut<SpatialGrid>,
    query: Query<(Entity, &Transform, &Body), With<SpatialHashed>>,
    #[allow(unused_variables)] tick: Res<SimTick>,
) {
    for (entity, transform, body) in query.iter() {
        if body.sleeping {
            continue;
        }
        grid.relocate(entity, transform.translation);
    }
    profile_log!(tick, "[SPATIAL] Tracked entities: {}", query.iter().len());
}
