use bevy::prelude::*;

mod camera;
mod lifecycle;
mod player;
pub mod config;
pub mod dice;
pub mod neighbors;
pub mod simulation;
pub mod spatial_hash;
pub mod weapons;

use camera::ArenaCameraPlugin;
use config::GameConfigPlugin;
use dice::DicePlugin;
use lifecycle::LifecyclePlugin;
use neighbors::NeighborsPlugin;
use player::PlayerPlugin;
use simulation::SimulationPlugin;
use weapons::WeaponsPlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            GameConfigPlugin,
            SimulationPlugin,
            NeighborsPlugin,
            PlayerPlugin,
            WeaponsPlugin,
            DicePlugin,
            LifecyclePlugin,
            ArenaCameraPlugin,
        ))
        .add_systems(Startup, setup_game);
    }
}

fn setup_game(mut commands: Commands) {
    info!("Game setup started");

    commands.insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.05)));

    // Key light above the play plane (gameplay is on X/Y, +Z faces the camera)
    commands.spawn((
        PointLight {
            shadows_enabled: true,
            intensity: 10_000_000.0,
            range: 200.0,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 30.0),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 200.0,
        ..default()
    });
}
