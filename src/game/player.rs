/// Player ship: spawning and keyboard steering.

use bevy::prelude::*;
use crate::game::config::{GameConfig, GameConfigHandle, InitialConfig};
use crate::game::simulation::{Body, Neighbors, SimSet};
use crate::game::spatial_hash::SpatialHashed;

/// Marker for the player ship.
#[derive(Component)]
pub struct Player;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            spawn_player.after(crate::game::config::load_initial_config),
        )
        .add_systems(FixedUpdate, steer_player.in_set(SimSet::Input));
    }
}

fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<InitialConfig>,
) {
    // Cone points along +Y, which is the ship's thrust direction.
    commands.spawn((
        Player,
        Mesh3d(meshes.add(Cone::new(config.player_radius, config.player_radius * 2.4))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.9, 0.85, 0.3),
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, 0.0),
        Body::from_radius(config.player_radius),
        Neighbors::default(),
        SpatialHashed,
    ));

    info!("Player ship spawned");
}

/// Apply thrust and turn input to the player's body.
///
/// Any input wakes the ship: the reindex pass ignores sleeping bodies, so
/// the flag must be cleared before the next integration step moves it.
fn steer_player(
    mut query: Query<(&Transform, &mut Body), With<Player>>,
    keys: Res<ButtonInput<KeyCode>>,
    config_handle: Res<GameConfigHandle>,
    game_configs: Res<Assets<GameConfig>>,
    sim: Res<InitialConfig>,
) {
    let Some(config) = game_configs.get(&config_handle.0) else { return };
    let Ok((transform, mut body)) = query.single_mut() else { return };
    let delta = 1.0 / sim.tick_rate as f32;

    let thrust = key_axis(&keys, config.key_thrust_backward, config.key_thrust_forward);
    let turn = key_axis(&keys, config.key_turn_left, config.key_turn_right);

    if thrust != 0.0 {
        let dir = transform.rotation * Vec3::Y;
        body.velocity += dir * thrust * sim.player_thrust * delta;
        body.wake();
    }

    if turn != 0.0 {
        body.angular_velocity.z -= turn * sim.player_turn_rate * delta;
        body.wake();
    }
}

fn key_axis(keys: &ButtonInput<KeyCode>, negative: KeyCode, positive: KeyCode) -> f32 {
    (keys.pressed(positive) as i32 - keys.pressed(negative) as i32) as f32
}
