/// Physics integration and movement systems.
///
/// This module handles:
/// - Velocity and spin integration into `Transform`
/// - Damping
/// - Sleep detection for bodies at rest
/// - Arena bounds

use bevy::prelude::*;
use crate::game::config::InitialConfig;
use super::components::Body;

// ============================================================================
// Integration
// ============================================================================

/// Integrate velocities into transforms and manage the sleeping flag.
///
/// A body whose linear and angular speeds stay under the configured
/// thresholds for `sleep_after_ticks` consecutive ticks is put to sleep with
/// its velocities zeroed, and is not moved on that tick or any later one
/// until something wakes it. This ordering matters: the spatial reindex pass
/// skips sleeping bodies, which is only sound if a body never moves on or
/// after the tick its flag is set.
pub fn integrate_bodies(
    mut query: Query<(&mut Transform, &mut Body)>,
    config: Res<InitialConfig>,
) {
    let delta = 1.0 / config.tick_rate as f32;
    let speed_threshold_sq = config.sleep_speed_threshold * config.sleep_speed_threshold;
    let spin_threshold_sq = config.sleep_spin_threshold * config.sleep_spin_threshold;

    for (mut transform, mut body) in query.iter_mut() {
        if body.sleeping {
            continue;
        }

        body.velocity *= config.linear_damping;
        body.angular_velocity *= config.angular_damping;

        let still = body.velocity.length_squared() < speed_threshold_sq
            && body.angular_velocity.length_squared() < spin_threshold_sq;
        if still {
            body.still_ticks += 1;
            if body.still_ticks >= config.sleep_after_ticks {
                body.sleeping = true;
                body.velocity = Vec3::ZERO;
                body.angular_velocity = Vec3::ZERO;
                continue;
            }
        } else {
            body.still_ticks = 0;
        }

        transform.translation += body.velocity * delta;
        if body.angular_velocity.length_squared() > 0.0 {
            transform.rotation =
                Quat::from_scaled_axis(body.angular_velocity * delta) * transform.rotation;
        }
    }
}

// ============================================================================
// Arena Bounds
// ============================================================================

/// Keep awake bodies inside the arena, reflecting their velocity off the
/// walls. Sleeping bodies are already at rest inside the bounds and are left
/// alone, preserving the no-movement-while-sleeping contract.
pub fn confine_to_arena(
    mut query: Query<(&mut Transform, &mut Body)>,
    config: Res<InitialConfig>,
) {
    let half_w = config.arena_width / 2.0;
    let half_h = config.arena_height / 2.0;
    let restitution = config.wall_restitution;

    for (mut transform, mut body) in query.iter_mut() {
        if body.sleeping {
            continue;
        }

        let pos = &mut transform.translation;
        if pos.x < -half_w {
            pos.x = -half_w;
            body.velocity.x = body.velocity.x.abs() * restitution;
        }
        if pos.x > half_w {
            pos.x = half_w;
            body.velocity.x = -body.velocity.x.abs() * restitution;
        }
        if pos.y < -half_h {
            pos.y = -half_h;
            body.velocity.y = body.velocity.y.abs() * restitution;
        }
        if pos.y > half_h {
            pos.y = half_h;
            body.velocity.y = -body.velocity.y.abs() * restitution;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn test_world() -> World {
        let mut world = World::new();
        world.insert_resource(InitialConfig::default());
        world
    }

    #[test]
    fn integration_moves_awake_bodies() {
        let mut world = test_world();
        let tick_rate = world.resource::<InitialConfig>().tick_rate as f32;
        let damping = world.resource::<InitialConfig>().linear_damping;

        let entity = world
            .spawn((
                Transform::default(),
                Body {
                    velocity: Vec3::new(6.0, 0.0, 0.0),
                    ..Body::from_radius(0.5)
                },
            ))
            .id();

        world.run_system_once(integrate_bodies).unwrap();

        let moved = world.get::<Transform>(entity).unwrap().translation.x;
        let expected = 6.0 * damping / tick_rate;
        assert!((moved - expected).abs() < 1e-5, "moved {moved}, expected {expected}");
    }

    #[test]
    fn still_bodies_fall_asleep_and_stop_moving() {
        let mut world = test_world();
        let sleep_after = world.resource::<InitialConfig>().sleep_after_ticks;

        let entity = world
            .spawn((Transform::default(), Body::from_radius(0.5)))
            .id();

        for _ in 0..sleep_after {
            world.run_system_once(integrate_bodies).unwrap();
        }
        assert!(world.get::<Body>(entity).unwrap().sleeping);

        // A sleeping body must not be integrated, even with velocity forced in.
        world.get_mut::<Body>(entity).unwrap().velocity = Vec3::new(100.0, 0.0, 0.0);
        world.run_system_once(integrate_bodies).unwrap();
        assert_eq!(world.get::<Transform>(entity).unwrap().translation, Vec3::ZERO);

        // Waking it re-enables integration.
        world.get_mut::<Body>(entity).unwrap().wake();
        world.run_system_once(integrate_bodies).unwrap();
        assert!(world.get::<Transform>(entity).unwrap().translation.x > 0.0);
    }

    #[test]
    fn bodies_bounce_off_arena_walls() {
        let mut world = test_world();
        let half_w = world.resource::<InitialConfig>().arena_width / 2.0;

        let entity = world
            .spawn((
                Transform::from_xyz(half_w + 5.0, 0.0, 0.0),
                Body {
                    velocity: Vec3::new(3.0, 0.0, 0.0),
                    ..Body::from_radius(0.5)
                },
            ))
            .id();

        world.run_system_once(confine_to_arena).unwrap();

        let transform = world.get::<Transform>(entity).unwrap();
        let body = world.get::<Body>(entity).unwrap();
        assert_eq!(transform.translation.x, half_w);
        assert!(body.velocity.x < 0.0, "Velocity must reflect off the wall");
    }
}
