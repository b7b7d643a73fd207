use bevy::prelude::*;
use super::{CellKey, SpatialGrid};

impl SpatialGrid {
    /// File an entity under the cell matching its position, moving it out of
    /// its previous bucket if the cell changed. Returns `true` if membership
    /// changed (including first insertion).
    ///
    /// The same-cell case is a lookup and a compare: no bucket is touched
    /// and nothing is allocated, which keeps the per-tick reindex pass cheap
    /// for the large majority of entities that stay put.
    pub fn relocate(&mut self, entity: Entity, position: Vec3) -> bool {
        let key = CellKey::from_position(position);

        if self.membership.get(&entity) == Some(&key) {
            return false;
        }

        if let Some(previous) = self.membership.insert(entity, key) {
            self.remove_from_bucket(entity, previous);
        }
        self.cells.entry(key).or_default().push(entity);
        true
    }

    /// Remove an entity from the grid entirely. Returns `true` if it was
    /// tracked.
    ///
    /// Idempotent: detaching twice, or detaching an entity that was never
    /// indexed, is a no-op. Runs for every entity leaving the tracked set,
    /// whether by despawn or by dropping the tracking marker.
    pub fn detach(&mut self, entity: Entity) -> bool {
        match self.membership.remove(&entity) {
            Some(key) => {
                self.remove_from_bucket(entity, key);
                true
            }
            None => false,
        }
    }

    /// Drop all membership records and bucket contents, keeping allocated
    /// bucket capacity for reuse.
    pub fn clear(&mut self) {
        self.membership.clear();
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
    }

    fn remove_from_bucket(&mut self, entity: Entity, key: CellKey) {
        if let Some(bucket) = self.cells.get_mut(&key) {
            if let Some(idx) = bucket.iter().position(|&e| e == entity) {
                bucket.swap_remove(idx);
            }
        }
    }
}
