use bevy::prelude::*;
use rustc_hash::FxHashMap;

mod grid;
mod query;
mod systems;
#[cfg(test)]
mod tests;

pub use systems::{flush_detached, reindex_tracked};

/// Marker component: the entity is tracked by the spatial grid.
///
/// Entities carrying both this marker and a `Transform` are picked up by the
/// per-tick reindex pass; dropping the marker (or despawning the entity)
/// detaches it from the grid before the next batch of queries runs.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SpatialHashed;

/// Discrete identifier of one grid cell, derived by flooring a world
/// position's X/Y coordinates. Z is ignored: the grid is planar.
///
/// Two positions map to the same key iff their floored X and Y match. Using a
/// composite integer pair (rather than a concatenated string) makes collisions
/// between e.g. (1, 23) and (12, 3) impossible by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub x: i32,
    pub y: i32,
}

impl CellKey {
    /// Derive the cell key for a world position. Pure and deterministic.
    ///
    /// NaN and infinite coordinates saturate through the `as` cast into a
    /// degenerate (but valid) key instead of panicking. Entities with such
    /// positions land in a far-corner cell and are effectively unqueryable;
    /// feeding the grid malformed positions is a caller contract violation,
    /// not an error the grid reports.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            x: position.x.floor() as i32,
            y: position.y.floor() as i32,
        }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Spatial partitioning grid for efficient proximity queries in 2D space.
///
/// The grid divides the play plane into unit cells keyed by [`CellKey`].
/// Buckets are created lazily the first time an entity enters a cell, so the
/// plane is unbounded and memory scales with occupied cells, not arena size.
///
/// # Use Cases
///
/// - **Collision Pruning:** Find candidate entities before overlap tests
/// - **Neighbor Lists:** Populate per-entity neighbor caches every tick
/// - **Area Effects:** Find all entities near an impact point
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use dicefield::game::spatial_hash::SpatialGrid;
///
/// let mut world = World::new();
/// let die = world.spawn_empty().id();
///
/// let mut grid = SpatialGrid::default();
/// grid.relocate(die, Vec3::new(3.4, -1.2, 0.0));
///
/// // Square neighborhood scan, one cell in every direction
/// let found = grid.entities_in_radius(Vec3::new(3.0, -1.0, 0.0), 1.0, usize::MAX);
/// assert_eq!(found, vec![die]);
/// ```
///
/// # Performance
///
/// - **Relocate (same cell):** O(1), no allocation (the common case)
/// - **Relocate (cell change):** O(bucket len) for the swap-remove
/// - **Query:** O(r² + k) where k = entities in scanned cells
///
/// # Consistency
///
/// The membership map is the authoritative record of which bucket an entity
/// occupies; every mutation updates both structures together, so an entity
/// recorded in cell C always appears in C's bucket and nowhere else. Buckets
/// that empty out are retained (a minor memory cost, never a correctness
/// issue) to avoid rehash churn on hot cell boundaries.
///
/// # Sharing
///
/// A single `SpatialGrid` resource is inserted by the simulation plugin and
/// is the only index for the tracked set. Constructing a second grid over the
/// same entities would silently fragment the index into two inconsistent
/// views; don't. Writes happen only in the spatial maintenance systems, and by
/// the time consumer systems run their queries the pass has completed. The
/// schedule is single-threaded per tick, so no locking is involved; a
/// parallel schedule would need to keep the maintenance systems exclusive.
#[derive(Resource, Default)]
pub struct SpatialGrid {
    /// Cell -> occupants. Buckets are plain `Vec`s for cache-friendly scans.
    cells: FxHashMap<CellKey, Vec<Entity>>,
    /// Entity -> the cell whose bucket currently holds it.
    membership: FxHashMap<Entity, CellKey>,
}

impl SpatialGrid {
    /// The cell an entity is currently filed under, if it is tracked.
    pub fn cell_of(&self, entity: Entity) -> Option<CellKey> {
        self.membership.get(&entity).copied()
    }

    /// Occupants of one cell. Cells that never held an entity yield an empty
    /// slice, same as cells whose occupants have all moved on.
    pub fn bucket(&self, key: CellKey) -> &[Entity] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of entities currently tracked.
    pub fn tracked_count(&self) -> usize {
        self.membership.len()
    }

    /// Count the total number of entity entries across all buckets.
    /// Useful for debugging and diagnostics.
    pub fn total_entries(&self) -> usize {
        self.cells.values().map(|bucket| bucket.len()).sum()
    }

    /// Count the number of non-empty cells.
    /// Useful for debugging and diagnostics.
    pub fn non_empty_cells(&self) -> usize {
        self.cells.values().filter(|bucket| !bucket.is_empty()).count()
    }

    /// Iterate over every tracked entity and its recorded cell.
    pub fn iter_tracked(&self) -> impl Iterator<Item = (Entity, CellKey)> + '_ {
        self.membership.iter().map(|(&entity, &key)| (entity, key))
    }

    /// Iterate over every bucket, including ones that are currently empty.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellKey, &[Entity])> + '_ {
        self.cells.iter().map(|(&key, bucket)| (key, bucket.as_slice()))
    }
}
