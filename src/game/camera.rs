use bevy::prelude::*;
use crate::game::config::{GameConfig, GameConfigHandle};
use crate::game::player::Player;

pub struct ArenaCameraPlugin;

impl Plugin for ArenaCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, follow_player);
    }
}

#[derive(Component)]
pub struct ArenaCamera;

fn spawn_camera(mut commands: Commands) {
    // Behind and above the origin on the -Y side; the play plane is X/Y
    // with +Z toward the viewer.
    let translation = Vec3::new(0.0, -18.0, 26.0);

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(translation).looking_at(Vec3::ZERO, Vec3::Z),
        ArenaCamera,
    ));
}

/// Smoothly trail the player at the configured offset.
/// Runs at render rate for smooth motion between simulation ticks.
fn follow_player(
    mut camera: Query<&mut Transform, (With<ArenaCamera>, Without<Player>)>,
    player: Query<&Transform, With<Player>>,
    config_handle: Res<GameConfigHandle>,
    game_configs: Res<Assets<GameConfig>>,
    time: Res<Time>,
) {
    let Some(config) = game_configs.get(&config_handle.0) else { return };
    let Ok(mut camera_transform) = camera.single_mut() else { return };
    let Ok(player_transform) = player.single() else { return };

    let target = player_transform.translation + config.camera_offset;
    let alpha = 1.0 - (-config.camera_smoothing * time.delta_secs()).exp();

    camera_transform.translation = camera_transform.translation.lerp(target, alpha);
    let aimed = camera_transform.looking_at(player_transform.translation, Vec3::Z);
    camera_transform.rotation = aimed.rotation;
}
