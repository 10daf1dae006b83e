//! Movement system - drifts fish and bounces them off the play-area edges

use hecs::World;

use crate::components::{Fish, Location, PlayArea, Position, Velocity};

/// Advance every fish at `location` by one tick.
pub fn movement_system(
    world: &mut World,
    bounds: &PlayArea,
    base_sprite: (f32, f32),
    location: Location,
) {
    for (_, (fish, pos, vel, loc)) in
        world.query_mut::<(&Fish, &mut Position, &mut Velocity, &Location)>()
    {
        if *loc != location {
            continue;
        }
        let size = fish.sprite_size(base_sprite);
        step(pos, vel, size, bounds);
    }
}

/// Move one fish. When an edge is reached while heading into it, that
/// velocity component inverts and the fish is nudged back by the new
/// velocity so the edge does not re-trigger next tick.
fn step(pos: &mut Position, vel: &mut Velocity, size: (f32, f32), bounds: &PlayArea) {
    pos.x += vel.dx;
    pos.y += vel.dy;

    let hit_left = pos.x <= bounds.left && vel.dx < 0.0;
    let hit_right = pos.x + size.0 >= bounds.right && vel.dx > 0.0;
    if hit_left || hit_right {
        vel.dx = -vel.dx;
        pos.x += vel.dx;
    }

    let hit_top = pos.y <= bounds.top && vel.dy < 0.0;
    let hit_bottom = pos.y + size.1 >= bounds.bottom && vel.dy > 0.0;
    if hit_top || hit_bottom {
        vel.dy = -vel.dy;
        pos.y += vel.dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishtank_logic::pattern::Pattern;
    use crate::components::Rgb;

    fn bounds() -> PlayArea {
        PlayArea {
            left: 0.0,
            right: 100.0,
            top: 0.0,
            bottom: 100.0,
        }
    }

    #[test]
    fn test_free_movement() {
        let mut world = World::new();
        let entity = world.spawn((
            Fish::new(Rgb::RED, Pattern::Plain, 1.0),
            Position::new(50.0, 50.0),
            Velocity::new(2.0, -1.0),
            Location::Tank,
        ));

        movement_system(&mut world, &bounds(), (10.0, 10.0), Location::Tank);

        let pos = *world.get::<&Position>(entity).unwrap();
        assert_eq!(pos, Position::new(52.0, 49.0));
    }

    #[test]
    fn test_bounce_off_right_wall() {
        let mut world = World::new();
        let entity = world.spawn((
            Fish::new(Rgb::RED, Pattern::Plain, 1.0),
            Position::new(88.0, 50.0),
            Velocity::new(3.0, 0.5),
            Location::Tank,
        ));

        movement_system(&mut world, &bounds(), (10.0, 10.0), Location::Tank);

        let vel = *world.get::<&Velocity>(entity).unwrap();
        let pos = *world.get::<&Position>(entity).unwrap();
        assert_eq!(vel.dx, -3.0);
        // 88 + 3 hits the wall, then nudged back by -3
        assert_eq!(pos.x, 88.0);

        // Next tick moves away without re-triggering.
        movement_system(&mut world, &bounds(), (10.0, 10.0), Location::Tank);
        let vel = *world.get::<&Velocity>(entity).unwrap();
        assert_eq!(vel.dx, -3.0);
    }

    #[test]
    fn test_bounce_off_top() {
        let mut world = World::new();
        let entity = world.spawn((
            Fish::new(Rgb::RED, Pattern::Plain, 1.0),
            Position::new(50.0, 1.0),
            Velocity::new(0.0, -2.0),
            Location::Pool,
        ));

        movement_system(&mut world, &bounds(), (10.0, 10.0), Location::Pool);

        let vel = *world.get::<&Velocity>(entity).unwrap();
        assert_eq!(vel.dy, 2.0);
    }

    #[test]
    fn test_only_selected_location_moves() {
        let mut world = World::new();
        let pool_fish = world.spawn((
            Fish::new(Rgb::RED, Pattern::Plain, 1.0),
            Position::new(50.0, 50.0),
            Velocity::new(1.0, 1.0),
            Location::Pool,
        ));
        let stored = world.spawn((
            Fish::new(Rgb::RED, Pattern::Plain, 1.0),
            Position::new(50.0, 50.0),
            Velocity::new(1.0, 1.0),
            Location::Storage,
        ));

        movement_system(&mut world, &bounds(), (10.0, 10.0), Location::Pool);

        assert_eq!(*world.get::<&Position>(pool_fish).unwrap(), Position::new(51.0, 51.0));
        assert_eq!(*world.get::<&Position>(stored).unwrap(), Position::new(50.0, 50.0));
    }

    #[test]
    fn test_fish_stays_in_band_for_long_runs() {
        let mut world = World::new();
        let b = bounds();
        let entity = world.spawn((
            Fish::new(Rgb::RED, Pattern::Plain, 1.0),
            Position::new(40.0, 60.0),
            Velocity::new(2.7, -1.9),
            Location::Tank,
        ));
        for _ in 0..10_000 {
            movement_system(&mut world, &b, (10.0, 10.0), Location::Tank);
            let pos = *world.get::<&Position>(entity).unwrap();
            assert!(pos.x > b.left - 3.0 && pos.x + 10.0 < b.right + 3.0);
            assert!(pos.y > b.top - 3.0 && pos.y + 10.0 < b.bottom + 3.0);
        }
    }
}
