use lander_ga::genetic::{Genome, OnePointReproducer, Reproducer};
use lander_ga::simulation::{Command, LanderState, Physics, Segment, Vec2};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Vec2> {
    (-100i32..100, -100i32..100).prop_map(|(x, y)| Vec2::new(x as f64, y as f64))
}

fn segment() -> impl Strategy<Value = Segment> {
    (point(), point()).prop_map(|(a, b)| Segment::new(a, b))
}

proptest! {
    #[test]
    fn commands_are_clamped_to_slew_window(
        rotation in -90i32..=90,
        thrust in 0i32..=4,
        cmd_rotation in -90i32..=90,
        cmd_thrust in 0i32..=4,
    ) {
        let lander = LanderState::new(Vec2::new(2500., 2500.), 500.)
            .with_rotation(rotation)
            .with_thrust(thrust);
        let next = Physics::default()
            .iterate(lander, Command::new(cmd_rotation, cmd_thrust))
            .unwrap();

        prop_assert!((next.rotation - rotation).abs() <= 15);
        prop_assert!((next.thrust - thrust).abs() <= 1);
        prop_assert!((-90..=90).contains(&next.rotation));
        prop_assert!((0..=4).contains(&next.thrust));
        if (cmd_rotation - rotation).abs() <= 15 {
            prop_assert_eq!(next.rotation, cmd_rotation);
        }
        if (cmd_thrust - thrust).abs() <= 1 {
            prop_assert_eq!(next.thrust, cmd_thrust);
        }
    }

    #[test]
    fn out_of_range_commands_are_rejected(rotation in 91i32..1000, thrust in 5i32..100) {
        let lander = LanderState::new(Vec2::new(2500., 2500.), 500.);
        let physics = Physics::default();
        prop_assert!(physics.iterate(lander.clone(), Command::new(rotation, 0)).is_err());
        prop_assert!(physics.iterate(lander.clone(), Command::new(-rotation, 0)).is_err());
        prop_assert!(physics.iterate(lander, Command::new(0, thrust)).is_err());
    }

    #[test]
    fn intersection_is_symmetric(s1 in segment(), s2 in segment()) {
        prop_assert_eq!(s1.intersects(&s2), s2.intersects(&s1));
    }

    #[test]
    fn intersection_point_lies_on_both_segments(s1 in segment(), s2 in segment()) {
        if let Some(p) = s1.intersection_with(&s2) {
            prop_assert!(s1.distance_to(p) < 1e-6);
            prop_assert!(s2.distance_to(p) < 1e-6);
        }
    }

    #[test]
    fn one_point_crossover_keeps_length(
        pairs in 1usize..60,
        point in 0f64..=1.,
    ) {
        let parents = vec![
            Genome::new(vec![0; pairs * 2]),
            Genome::new(vec![1; pairs * 2]),
        ];
        let children = OnePointReproducer::new(point).reproduce(&parents);
        prop_assert_eq!(children.len(), 2);
        prop_assert!(children.iter().all(|c| c.len() == pairs * 2));
    }
}

#[test]
fn collinear_overlap_is_not_an_intersection() {
    let a = Segment::new(Vec2::new(0., 0.), Vec2::new(10., 0.));
    let b = Segment::new(Vec2::new(5., 0.), Vec2::new(15., 0.));
    assert!(!a.intersects(&b));
    assert_eq!(a.intersection_with(&b), None);
}

#[test]
fn crossing_diagonals_meet_in_the_middle() {
    let a = Segment::new(Vec2::new(0., 0.), Vec2::new(10., 10.));
    let b = Segment::new(Vec2::new(0., 10.), Vec2::new(10., 0.));
    assert_eq!(a.intersection_with(&b), Some(Vec2::new(5., 5.)));
}
