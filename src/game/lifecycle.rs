/// Age accounting and expiry for short-lived entities (bullets, debris).

use bevy::prelude::*;
use crate::game::config::InitialConfig;
use crate::game::simulation::SimSet;

/// Seconds since the entity was spawned.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Age(pub f32);

/// Entities older than this are despawned.
#[derive(Component, Debug, Clone, Copy)]
pub struct MaxAge(pub f32);

pub struct LifecyclePlugin;

impl Plugin for LifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                advance_age.in_set(SimSet::Input),
                // Expiry runs after all consumers of this tick; the spatial
                // flush picks the removals up at the start of the next tick.
                despawn_expired.after(SimSet::Physics),
            ),
        );
    }
}

fn advance_age(mut query: Query<&mut Age>, config: Res<InitialConfig>) {
    let delta = 1.0 / config.tick_rate as f32;
    for mut age in query.iter_mut() {
        age.0 += delta;
    }
}

fn despawn_expired(mut commands: Commands, query: Query<(Entity, &Age, &MaxAge)>) {
    for (entity, age, max_age) in query.iter() {
        if age.0 >= max_age.0 {
            commands.entity(entity).despawn();
        }
    }
}
