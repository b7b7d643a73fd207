use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use serde::{Deserialize, Serialize};

/// Static configuration loaded once at startup. These values define the
/// simulation constants (tick rate, arena size, physics tuning, spawn
/// parameters) and are not hot-reloaded: changing the tick rate or arena
/// bounds mid-game would yank entities around under the running systems.
#[derive(Resource, Deserialize, Serialize, Clone, Debug)]
pub struct InitialConfig {
    // Simulation
    pub tick_rate: f64,
    pub arena_width: f32,
    pub arena_height: f32,

    // Physics
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub wall_restitution: f32,
    pub collision_push_strength: f32,

    // Sleep detection
    pub sleep_speed_threshold: f32,
    pub sleep_spin_threshold: f32,
    pub sleep_after_ticks: u32,

    // Neighbor search
    pub min_neighbor_radius: f32,
    pub max_neighbors: usize,

    // Player
    pub player_radius: f32,
    pub player_thrust: f32,
    pub player_turn_rate: f32,

    // Weapons
    pub fire_delay: f32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub bullet_lifetime: f32,
    pub bullet_damage: f32,
    pub bullet_spread: usize,
    pub bullet_spread_angle: f32,

    // Die field
    pub die_count: usize,
    pub die_radius: f32,
    pub die_health: f32,
    pub die_max_speed: f32,
    pub die_max_spin: f32,
    pub spawn_keepout_radius: f32,
}

/// Runtime configuration that can be hot-reloaded during gameplay.
/// Controls and camera tuning only, nothing the simulation depends on.
#[derive(Deserialize, Serialize, Asset, TypePath, Clone, Debug)]
pub struct GameConfig {
    // Controls (hot-reloadable)
    pub key_thrust_forward: KeyCode,
    pub key_thrust_backward: KeyCode,
    pub key_turn_left: KeyCode,
    pub key_turn_right: KeyCode,
    pub key_fire: KeyCode,

    // Camera (hot-reloadable)
    pub camera_offset: Vec3,
    pub camera_smoothing: f32,
}

#[derive(Resource)]
pub struct GameConfigHandle(pub Handle<GameConfig>);

pub struct GameConfigPlugin;

impl Plugin for GameConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<GameConfig>::new(&["game_config.ron"]))
            .add_systems(Startup, (load_initial_config, setup_runtime_config).chain());
    }
}

/// Load static initial configuration synchronously at startup.
/// This must complete before any game state that depends on these values.
pub fn load_initial_config(mut commands: Commands) {
    let initial_config_path = "assets/initial_config.ron";

    match std::fs::read_to_string(initial_config_path) {
        Ok(contents) => {
            match ron::from_str::<InitialConfig>(&contents) {
                Ok(config) => {
                    info!("Loaded initial config from {}", initial_config_path);
                    commands.insert_resource(config);
                }
                Err(e) => {
                    error!("Failed to parse initial config: {}", e);
                    error!("Using default InitialConfig");
                    commands.insert_resource(InitialConfig::default());
                }
            }
        }
        Err(e) => {
            error!("Failed to read {}: {}", initial_config_path, e);
            error!("Using default InitialConfig");
            commands.insert_resource(InitialConfig::default());
        }
    }
}

/// Load runtime configuration asynchronously (can be hot-reloaded).
fn setup_runtime_config(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load("game_config.ron");
    commands.insert_resource(GameConfigHandle(handle));
}

impl Default for InitialConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            arena_width: 80.0,
            arena_height: 80.0,
            linear_damping: 0.995,
            angular_damping: 0.998,
            wall_restitution: 0.8,
            collision_push_strength: 4.0,
            sleep_speed_threshold: 0.05,
            sleep_spin_threshold: 0.05,
            sleep_after_ticks: 45,
            min_neighbor_radius: 2.0,
            max_neighbors: 32,
            player_radius: 0.6,
            player_thrust: 20.0,
            player_turn_rate: 10.0,
            fire_delay: 0.2,
            bullet_speed: 30.0,
            bullet_radius: 0.2,
            bullet_lifetime: 1.5,
            bullet_damage: 1.0,
            bullet_spread: 3,
            bullet_spread_angle: 0.12,
            die_count: 24,
            die_radius: 0.75,
            die_health: 3.0,
            die_max_speed: 4.0,
            die_max_spin: 2.5,
            spawn_keepout_radius: 6.0,
        }
    }
}
