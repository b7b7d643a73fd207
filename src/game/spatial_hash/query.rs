use bevy::prelude::*;
use super::{CellKey, SpatialGrid};

impl SpatialGrid {
    /// Collect entities in the square cell neighborhood around `center`.
    ///
    /// `radius` is a cell-count radius: every bucket at integer offsets
    /// `(i, j)` with `-radius <= i, j <= radius` from the center cell is
    /// scanned. This is deliberately a square, not a circle: entities just
    /// outside a true Euclidean radius are still returned, and callers that
    /// care (the collision pass does) filter with their own distance test.
    ///
    /// Populates `out` instead of allocating a new Vec to avoid runtime
    /// allocations. Clears `out` before populating. The scan stops as soon as
    /// `max_results` entities have been collected, so the count is exact even
    /// when a single bucket holds more candidates.
    ///
    /// A non-positive `radius` or a zero `max_results` yields an empty
    /// result; cells without a bucket contribute nothing. Result order is
    /// bucket iteration order. Callers must not assume proximity ordering.
    ///
    /// Precondition: the reindex pass for the current tick has completed.
    /// Querying mid-pass observes a partially updated index.
    pub fn query_radius(
        &self,
        center: Vec3,
        radius: f32,
        max_results: usize,
        out: &mut Vec<Entity>,
    ) {
        out.clear();
        if !(radius > 0.0) || max_results == 0 {
            return;
        }

        let span = radius.floor() as i32;
        let base = CellKey::from_position(center);

        for dy in -span..=span {
            for dx in -span..=span {
                let Some(bucket) = self.cells.get(&base.offset(dx, dy)) else {
                    continue;
                };
                for &entity in bucket {
                    out.push(entity);
                    if out.len() >= max_results {
                        return;
                    }
                }
            }
        }
    }

    /// Allocating convenience wrapper around [`Self::query_radius`], for
    /// one-off callers and tests. Hot paths should reuse a buffer instead.
    pub fn entities_in_radius(&self, center: Vec3, radius: f32, max_results: usize) -> Vec<Entity> {
        let mut out = Vec::new();
        self.query_radius(center, radius, max_results, &mut out);
        out
    }
}
