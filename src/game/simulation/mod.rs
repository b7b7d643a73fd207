/// Simulation layer - per-tick arcade logic.
///
/// This module is organized into:
/// - **components**: Body, neighbor lists, health
/// - **resources**: tick counter
/// - **physics**: integration, damping, sleep, arena bounds
/// - **collision**: neighbor-list driven contact response
///
/// The spatial grid itself lives in `crate::game::spatial_hash`; this module
/// owns its lifecycle (the one `SpatialGrid` resource) and schedules its
/// maintenance systems at the right point in the tick.

use bevy::prelude::*;
use crate::game::config::{self, InitialConfig};
use crate::game::spatial_hash::{flush_detached, reindex_tracked, SpatialGrid};

// Module declarations
pub mod components;
pub mod resources;
pub mod physics;
pub mod collision;

// Re-export commonly used items
pub use components::*;
pub use resources::*;

/// System sets for organizing execution order.
///
/// The sets are chained: within a tick, integration finishes moving every
/// body before the spatial grid reindexes, the grid is fully reindexed
/// before any query runs, and all queries run before contact response
/// consumes their results. Consumers relying on the grid must schedule in
/// `Sense` or later.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum SimSet {
    Input,       // Player commands, weapon fire, age accumulation
    Integration, // Applying velocity to position
    Spatial,     // Removal flush + reindex pass
    Sense,       // Radius queries populating neighbor lists
    Physics,     // Contact response, damage
}

/// Main simulation plugin.
///
/// Owns the shared spatial grid: this is the single producer of the
/// `SpatialGrid` resource, and nothing else may construct one for the same
/// entities.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Default timestep; replaced from InitialConfig once it is loaded.
        app.insert_resource(Time::<Fixed>::from_hz(60.0));

        app.init_resource::<SimTick>();
        app.init_resource::<InitialConfig>();
        app.init_resource::<SpatialGrid>();

        // Configure System Sets
        app.configure_sets(
            FixedUpdate,
            (
                SimSet::Input,
                SimSet::Integration,
                SimSet::Spatial,
                SimSet::Sense,
                SimSet::Physics,
            )
                .chain(),
        );

        app.add_systems(
            Startup,
            configure_tick_rate.after(config::load_initial_config),
        );

        app.add_systems(
            FixedUpdate,
            (
                // Tick counter first, so every system sees the current tick
                increment_sim_tick.before(SimSet::Input),
                // Integration
                physics::integrate_bodies.in_set(SimSet::Integration),
                physics::confine_to_arena
                    .in_set(SimSet::Integration)
                    .after(physics::integrate_bodies),
                // Spatial maintenance: removals drain before the reindex pass,
                // so no query this tick can observe a destroyed entity
                flush_detached.in_set(SimSet::Spatial).before(reindex_tracked),
                reindex_tracked.in_set(SimSet::Spatial),
                // Contact response
                collision::resolve_contacts.in_set(SimSet::Physics),
            ),
        );
    }
}

fn configure_tick_rate(mut fixed_time: ResMut<Time<Fixed>>, config: Res<InitialConfig>) {
    fixed_time.set_timestep_hz(config.tick_rate);
    info!("Simulation tick rate: {} Hz", config.tick_rate);
}
