/// Resource definitions for the simulation layer.

use bevy::prelude::*;

/// Global simulation tick counter, incremented before every fixed update.
/// Used for conditional logging and anything that wants tick-based cadence.
#[derive(Resource, Default)]
pub struct SimTick(pub u64);

impl SimTick {
    pub fn increment(&mut self) {
        self.0 += 1;
    }
}

/// Increment the global simulation tick counter.
///
/// Runs first in the FixedUpdate schedule so all other systems observe the
/// current tick value.
pub fn increment_sim_tick(mut tick: ResMut<SimTick>) {
    tick.increment();
}
