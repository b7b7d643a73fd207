/// The die field: tumbling dice standing in for asteroids.

use bevy::prelude::*;
use rand::Rng;
use crate::game::config::InitialConfig;
use crate::game::simulation::{Body, Health, Neighbors, SimSet};
use crate::game::spatial_hash::SpatialHashed;
use crate::game::weapons;

/// Marker for dice.
#[derive(Component)]
pub struct Die;

/// Shared render assets for dice, created once at startup.
#[derive(Resource)]
pub struct DieAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

pub struct DicePlugin;

impl Plugin for DicePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (setup_die_assets, spawn_die_field)
                .chain()
                .after(crate::game::config::load_initial_config),
        )
        .add_systems(
            FixedUpdate,
            despawn_shattered_dice
                .in_set(SimSet::Physics)
                .after(weapons::bullet_impacts),
        );
    }
}

fn setup_die_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<InitialConfig>,
) {
    // A die's bounding radius reaches the cube corners.
    let edge = config.die_radius * 2.0 / 3.0_f32.sqrt();
    commands.insert_resource(DieAssets {
        mesh: meshes.add(Cuboid::new(edge, edge, edge)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.1, 0.15),
            ..default()
        }),
    });
}

/// Scatter the die field across the arena with random drift and tumble,
/// keeping the area around the player spawn clear.
fn spawn_die_field(mut commands: Commands, assets: Res<DieAssets>, config: Res<InitialConfig>) {
    let mut rng = rand::rng();
    let half_w = config.arena_width / 2.0 - config.die_radius;
    let half_h = config.arena_height / 2.0 - config.die_radius;
    let keepout_sq = config.spawn_keepout_radius * config.spawn_keepout_radius;

    for _ in 0..config.die_count {
        let (x, y) = loop {
            let x = rng.random_range(-half_w..half_w);
            let y = rng.random_range(-half_h..half_h);
            if x * x + y * y >= keepout_sq {
                break (x, y);
            }
        };

        let drift_angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(0.0..config.die_max_speed);
        let spin_axis = Vec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        )
        .normalize_or(Vec3::Z);

        let mut body = Body::from_radius(config.die_radius);
        body.velocity = Vec3::new(drift_angle.cos(), drift_angle.sin(), 0.0) * speed;
        body.angular_velocity = spin_axis * rng.random_range(0.0..config.die_max_spin);

        commands.spawn((
            Die,
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
            Transform::from_xyz(x, y, 0.0).with_rotation(Quat::from_scaled_axis(
                spin_axis * rng.random_range(0.0..std::f32::consts::TAU),
            )),
            body,
            Health::new(config.die_health),
            Neighbors::default(),
            SpatialHashed,
        ));
    }

    info!("Scattered {} dice across the arena", config.die_count);
}

/// Despawn dice whose health ran out. The despawn detaches them from the
/// spatial grid before the next tick's queries run.
pub fn despawn_shattered_dice(
    mut commands: Commands,
    dice: Query<(Entity, &Health), With<Die>>,
) {
    for (entity, health) in dice.iter() {
        if health.current <= 0.0 {
            info!("Die {:?} shattered", entity);
            commands.entity(entity).despawn();
        }
    }
}
