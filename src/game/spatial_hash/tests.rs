use super::*;

fn spawn_entities(world: &mut World, count: usize) -> Vec<Entity> {
    (0..count).map(|_| world.spawn_empty().id()).collect()
}

#[test]
fn test_cell_key_is_deterministic() {
    let pos = Vec3::new(12.7, -3.2, 5.0);
    assert_eq!(CellKey::from_position(pos), CellKey::from_position(pos));
}

#[test]
fn test_positions_in_same_unit_cell_share_a_key() {
    let low = CellKey::from_position(Vec3::new(4.1, -2.9, 0.0));
    let high = CellKey::from_position(Vec3::new(4.9, -2.1, 0.0));
    assert_eq!(low, high, "Positions inside one unit cell must share a key");

    let next = CellKey::from_position(Vec3::new(5.0, -2.5, 0.0));
    assert_ne!(low, next, "Crossing x=5 must produce a different key");
}

#[test]
fn test_cell_keys_do_not_collide_across_axes() {
    // A concatenated string key without a separator would confuse these two.
    let a = CellKey::from_position(Vec3::new(1.0, 23.0, 0.0));
    let b = CellKey::from_position(Vec3::new(12.0, 3.0, 0.0));
    assert_ne!(a, b);
}

#[test]
fn test_cell_key_ignores_z() {
    let flat = CellKey::from_position(Vec3::new(3.5, 7.5, 0.0));
    let tall = CellKey::from_position(Vec3::new(3.5, 7.5, 99.0));
    assert_eq!(flat, tall);
}

#[test]
fn test_malformed_positions_produce_a_key_without_panicking() {
    // Degenerate but non-crashing; such entities are a caller contract
    // violation and may never be found by normal queries.
    let _ = CellKey::from_position(Vec3::new(f32::NAN, 0.0, 0.0));
    let _ = CellKey::from_position(Vec3::new(f32::INFINITY, f32::NEG_INFINITY, 0.0));
}

#[test]
fn test_relocate_within_cell_is_a_noop() {
    let mut world = World::new();
    let entity = world.spawn_empty().id();
    let mut grid = SpatialGrid::default();

    assert!(grid.relocate(entity, Vec3::new(0.2, 0.2, 0.0)));
    let key = grid.cell_of(entity).unwrap();

    // Moves within the same unit cell must not touch membership or buckets.
    assert!(!grid.relocate(entity, Vec3::new(0.8, 0.6, 0.0)));
    assert_eq!(grid.cell_of(entity), Some(key));
    assert_eq!(grid.bucket(key), &[entity]);
    assert_eq!(grid.total_entries(), 1);
}

#[test]
fn test_relocate_across_cells_moves_membership() {
    let mut world = World::new();
    let entity = world.spawn_empty().id();
    let mut grid = SpatialGrid::default();

    grid.relocate(entity, Vec3::new(0.0, 0.0, 0.0));
    let old_key = grid.cell_of(entity).unwrap();

    assert!(grid.relocate(entity, Vec3::new(1.2, 0.3, 0.0)));
    let new_key = grid.cell_of(entity).unwrap();

    assert_ne!(old_key, new_key);
    assert!(grid.bucket(old_key).is_empty(), "Old bucket must be vacated");
    assert_eq!(grid.bucket(new_key), &[entity]);

    // End-to-end: the old cell yields nothing, the new neighborhood finds it.
    assert!(grid.entities_in_radius(Vec3::new(0.5, 0.5, 0.0), 0.5, usize::MAX).is_empty());
    let found = grid.entities_in_radius(Vec3::new(1.0, 0.0, 0.0), 1.0, usize::MAX);
    assert_eq!(found, vec![entity]);
}

#[test]
fn test_detach_is_idempotent() {
    let mut world = World::new();
    let entity = world.spawn_empty().id();
    let mut grid = SpatialGrid::default();

    grid.relocate(entity, Vec3::new(2.5, 2.5, 0.0));
    assert!(grid.detach(entity));
    assert!(!grid.detach(entity), "Second detach must be a no-op");
    assert_eq!(grid.tracked_count(), 0);
    assert_eq!(grid.total_entries(), 0);

    // Detaching an entity that was never indexed is also a no-op.
    let stranger = world.spawn_empty().id();
    assert!(!grid.detach(stranger));
}

#[test]
fn test_query_radius_single_cell_completeness() {
    let mut world = World::new();
    let entities = spawn_entities(&mut world, 3);
    let mut grid = SpatialGrid::default();

    grid.relocate(entities[0], Vec3::new(0.0, 0.0, 0.0));
    grid.relocate(entities[1], Vec3::new(0.5, 0.5, 0.0));
    grid.relocate(entities[2], Vec3::new(5.0, 5.0, 0.0));

    let found = grid.entities_in_radius(Vec3::new(0.0, 0.0, 0.0), 1.0, usize::MAX);
    assert_eq!(found.len(), 2, "Should find the two entities in the origin neighborhood");
    assert!(found.contains(&entities[0]));
    assert!(found.contains(&entities[1]));
    assert!(!found.contains(&entities[2]), "Entity two cells away must not appear");
}

#[test]
fn test_query_radius_max_results_cutoff_is_exact() {
    let mut world = World::new();
    let entities = spawn_entities(&mut world, 10);
    let mut grid = SpatialGrid::default();

    for &entity in &entities {
        grid.relocate(entity, Vec3::new(0.5, 0.5, 0.0));
    }

    let found = grid.entities_in_radius(Vec3::new(0.5, 0.5, 0.0), 1.0, 3);
    assert_eq!(found.len(), 3, "Cutoff must be exact even within one bucket");
}

#[test]
fn test_query_radius_degenerate_arguments_yield_empty() {
    let mut world = World::new();
    let entity = world.spawn_empty().id();
    let mut grid = SpatialGrid::default();
    grid.relocate(entity, Vec3::ZERO);

    assert!(grid.entities_in_radius(Vec3::ZERO, 0.0, usize::MAX).is_empty());
    assert!(grid.entities_in_radius(Vec3::ZERO, -2.0, usize::MAX).is_empty());
    assert!(grid.entities_in_radius(Vec3::ZERO, 1.0, 0).is_empty());
    assert!(grid.entities_in_radius(Vec3::ZERO, f32::NAN, usize::MAX).is_empty());
}

#[test]
fn test_query_radius_reuses_out_buffer() {
    let mut world = World::new();
    let entity = world.spawn_empty().id();
    let mut grid = SpatialGrid::default();
    grid.relocate(entity, Vec3::ZERO);

    let mut out = vec![entity, entity, entity];
    grid.query_radius(Vec3::new(40.0, 40.0, 0.0), 1.0, usize::MAX, &mut out);
    assert!(out.is_empty(), "Buffer must be cleared even when nothing is found");

    grid.query_radius(Vec3::ZERO, 1.0, usize::MAX, &mut out);
    assert_eq!(out, vec![entity]);
}

#[test]
fn test_fractional_radius_scans_integer_offsets_only() {
    let mut world = World::new();
    let entities = spawn_entities(&mut world, 2);
    let mut grid = SpatialGrid::default();

    grid.relocate(entities[0], Vec3::new(0.5, 0.5, 0.0));
    grid.relocate(entities[1], Vec3::new(1.5, 0.5, 0.0));

    // radius 0.5 covers only offset 0: the neighboring cell is out of reach.
    let found = grid.entities_in_radius(Vec3::new(0.5, 0.5, 0.0), 0.5, usize::MAX);
    assert_eq!(found, vec![entities[0]]);
}

/// Both directions of the membership invariant: every tracked entity appears
/// in exactly the bucket it is recorded under, and every bucket occupant is
/// recorded as belonging to that bucket.
fn assert_membership_consistent(grid: &SpatialGrid) {
    for (entity, key) in grid.iter_tracked() {
        let bucket = grid.bucket(key);
        assert!(
            bucket.contains(&entity),
            "Entity {entity:?} recorded in cell {key:?} but missing from its bucket"
        );
    }
    for (key, bucket) in grid.iter_cells() {
        for &entity in bucket {
            assert_eq!(
                grid.cell_of(entity),
                Some(key),
                "Entity {entity:?} present in bucket {key:?} without a matching record"
            );
        }
    }
    assert_eq!(grid.total_entries(), grid.tracked_count());
}

#[test]
fn test_membership_invariant_survives_random_churn() {
    let mut world = World::new();
    let entities = spawn_entities(&mut world, 64);
    let mut grid = SpatialGrid::default();
    fastrand::seed(7);

    for _ in 0..200 {
        let entity = entities[fastrand::usize(..entities.len())];
        match fastrand::u8(..4) {
            0 => {
                grid.detach(entity);
            }
            _ => {
                let pos = Vec3::new(
                    fastrand::f32() * 40.0 - 20.0,
                    fastrand::f32() * 40.0 - 20.0,
                    0.0,
                );
                grid.relocate(entity, pos);
            }
        }
    }

    assert_membership_consistent(&grid);

    for &entity in &entities {
        grid.detach(entity);
    }
    assert_eq!(grid.tracked_count(), 0);
    assert_eq!(grid.total_entries(), 0);
}

#[test]
fn test_clear_resets_tracking() {
    let mut world = World::new();
    let entities = spawn_entities(&mut world, 5);
    let mut grid = SpatialGrid::default();
    for (i, &entity) in entities.iter().enumerate() {
        grid.relocate(entity, Vec3::new(i as f32 * 3.0, 0.0, 0.0));
    }

    grid.clear();
    assert_eq!(grid.tracked_count(), 0);
    assert_eq!(grid.total_entries(), 0);
    assert!(grid.entities_in_radius(Vec3::ZERO, 10.0, usize::MAX).is_empty());
}
