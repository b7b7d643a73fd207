/// Bullets: cooldown-gated spread fire and impact handling.

use bevy::prelude::*;
use crate::game::config::{GameConfig, GameConfigHandle, InitialConfig};
use crate::game::dice::Die;
use crate::game::lifecycle::{Age, MaxAge};
use crate::game::player::Player;
use crate::game::simulation::{collision, Body, Health, Neighbors, SimSet};
use crate::game::spatial_hash::SpatialHashed;

/// Marker for bullets.
#[derive(Component)]
pub struct Bullet;

/// Seconds until the player may fire again.
#[derive(Resource, Default)]
pub struct FireCooldown(pub f32);

/// Shared render assets for bullets, created once at startup.
#[derive(Resource)]
pub struct BulletAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

pub struct WeaponsPlugin;

impl Plugin for WeaponsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FireCooldown>()
            .add_systems(
                Startup,
                setup_bullet_assets.after(crate::game::config::load_initial_config),
            )
            .add_systems(
                FixedUpdate,
                (
                    fire_weapon.in_set(SimSet::Input),
                    bullet_impacts
                        .in_set(SimSet::Physics)
                        .after(collision::resolve_contacts),
                ),
            );
    }
}

fn setup_bullet_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<InitialConfig>,
) {
    commands.insert_resource(BulletAssets {
        mesh: meshes.add(Sphere::new(config.bullet_radius)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.6, 0.2),
            emissive: LinearRgba::rgb(4.0, 2.0, 0.5),
            ..default()
        }),
    });
}

/// Spawn a fan of bullets from the player's nose while the fire key is held
/// and the cooldown allows.
fn fire_weapon(
    mut commands: Commands,
    mut cooldown: ResMut<FireCooldown>,
    keys: Res<ButtonInput<KeyCode>>,
    config_handle: Res<GameConfigHandle>,
    game_configs: Res<Assets<GameConfig>>,
    sim: Res<InitialConfig>,
    assets: Res<BulletAssets>,
    player: Query<(&Transform, &Body), With<Player>>,
) {
    let delta = 1.0 / sim.tick_rate as f32;
    cooldown.0 = (cooldown.0 - delta).max(0.0);

    let Some(config) = game_configs.get(&config_handle.0) else { return };
    if !keys.pressed(config.key_fire) || cooldown.0 > 0.0 {
        return;
    }
    let Ok((ship_transform, ship_body)) = player.single() else { return };

    cooldown.0 = sim.fire_delay;

    let count = sim.bullet_spread.max(1);
    let half = (count as f32 - 1.0) / 2.0;
    let muzzle_offset = ship_body.radius + sim.bullet_radius;

    for i in 0..count {
        let angle = (i as f32 - half) * sim.bullet_spread_angle;
        let dir = ship_transform.rotation * Quat::from_rotation_z(angle) * Vec3::Y;

        let mut body = Body::from_radius(sim.bullet_radius);
        body.velocity = ship_body.velocity + dir * sim.bullet_speed;

        commands.spawn((
            Bullet,
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
            Transform::from_translation(ship_transform.translation + dir * muzzle_offset),
            body,
            Neighbors::default(),
            SpatialHashed,
            Age::default(),
            MaxAge(sim.bullet_lifetime),
        ));
    }
}

/// Resolve bullet hits against dice.
///
/// Candidates come from the bullet's broad-phase neighbor list; a real
/// overlap test decides the hit. The die takes damage and the bullet's
/// momentum, and the bullet is gone; its index entry is flushed at the
/// start of the next tick, before any query can see it again.
pub fn bullet_impacts(
    mut commands: Commands,
    bullets: Query<(Entity, &Transform, &Body, &Neighbors), With<Bullet>>,
    mut dice: Query<(&Transform, &mut Body, &mut Health), (With<Die>, Without<Bullet>)>,
    config: Res<InitialConfig>,
) {
    for (bullet, bullet_transform, bullet_body, neighbors) in bullets.iter() {
        for &other in &neighbors.0 {
            let Ok((die_transform, mut die_body, mut health)) = dice.get_mut(other) else {
                continue;
            };

            let mut delta = bullet_transform.translation - die_transform.translation;
            delta.z = 0.0;
            let hit_dist = bullet_body.radius + die_body.radius;
            if delta.length_squared() >= hit_dist * hit_dist {
                continue;
            }

            health.current -= config.bullet_damage;
            die_body.wake();
            die_body.velocity += bullet_body.velocity * 0.1;

            commands.entity(bullet).despawn();
            break;
        }
    }
}
