/// Component definitions for the simulation layer.

use bevy::prelude::*;

// ============================================================================
// Physics Components
// ============================================================================

/// Rigid-body state for an arcade entity. Position and orientation live on
/// the entity's `Transform`; this holds everything the integrator needs on
/// top of that.
///
/// `sleeping` is load-bearing for the spatial grid: the reindex pass skips
/// sleeping bodies on the assumption that their position has not changed.
/// The integrator upholds that by never moving a sleeping body, and anything
/// that pushes a body (input, collision impulse) must call [`Body::wake`]
/// before the next integration step.
#[derive(Component, Debug, Clone)]
pub struct Body {
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Bounding radius used for overlap tests and neighbor search scaling.
    pub radius: f32,
    pub sleeping: bool,
    /// Consecutive ticks below the stillness thresholds.
    pub still_ticks: u32,
}

impl Body {
    pub fn from_radius(radius: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            radius,
            sleeping: false,
            still_ticks: 0,
        }
    }

    pub fn wake(&mut self) {
        self.sleeping = false;
        self.still_ticks = 0;
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::from_radius(0.5)
    }
}

// ============================================================================
// Neighbor List
// ============================================================================

/// Per-entity neighbor list, refreshed every tick from the spatial grid.
///
/// The inner Vec doubles as the query's out-buffer, so after the first few
/// ticks queries run allocation-free. The list is raw broad-phase output:
/// it may contain the entity itself and anything in the scanned cells,
/// unordered. Consumers do their own filtering.
#[derive(Component, Debug, Clone, Default)]
pub struct Neighbors(pub Vec<Entity>);

// ============================================================================
// Health
// ============================================================================

/// Health pool for destructible entities.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }
}
