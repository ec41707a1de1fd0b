use serde::Serialize;

use super::{LanderState, Terrain, Vec2};

mod defaults {
    pub const MAX_VERTICAL_SPEED: f64 = 40.;
    pub const MAX_HORIZONTAL_SPEED: f64 = 20.;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Landing {
    Correct,
    WrongTerrain,
    NotVertical { error_abs: f64 },
    TooFastVertical { error_abs: f64 },
    TooFastHorizontal { error_abs: f64 },
    OutOfMap,
}

#[derive(Debug, Clone)]
pub struct CollisionChecker {
    max_vertical_speed: f64,
    max_horizontal_speed: f64,
}

impl Default for CollisionChecker {
    fn default() -> Self {
        Self {
            max_vertical_speed: defaults::MAX_VERTICAL_SPEED,
            max_horizontal_speed: defaults::MAX_HORIZONTAL_SPEED,
        }
    }
}

impl CollisionChecker {
    // `None` while flying
    pub fn check(&self, terrain: &Terrain, state: &LanderState) -> Option<(Vec2, Landing)> {
        let movement = &state.last_movement;
        if let Some(collision_point) = terrain.collision_point_with(movement) {
            let landing = if !terrain.is_on_landing_site(movement) {
                Landing::WrongTerrain
            } else {
                self.classify_landing(state)
            };
            return Some((collision_point, landing));
        }
        if terrain.is_moving_out_of_bounds(movement) {
            return Some((state.position, Landing::OutOfMap));
        }
        None
    }

    pub fn is_safe_landing(&self, state: &LanderState) -> bool {
        matches!(self.classify_landing(state), Landing::Correct)
    }

    fn classify_landing(&self, state: &LanderState) -> Landing {
        if state.rotation != 0 {
            Landing::NotVertical {
                error_abs: state.rotation.abs() as f64,
            }
        } else if state.h_speed.abs() > self.max_horizontal_speed {
            Landing::TooFastHorizontal {
                error_abs: state.h_speed.abs() - self.max_horizontal_speed,
            }
        } else if state.v_speed.abs() > self.max_vertical_speed {
            Landing::TooFastVertical {
                error_abs: state.v_speed.abs() - self.max_vertical_speed,
            }
        } else {
            Landing::Correct
        }
    }

    pub fn with_max_vertical_speed(self, max_vertical_speed: f64) -> Self {
        assert!(max_vertical_speed > 0.);
        Self {
            max_vertical_speed,
            ..self
        }
    }

    pub fn with_max_horizontal_speed(self, max_horizontal_speed: f64) -> Self {
        assert!(max_horizontal_speed > 0.);
        Self {
            max_horizontal_speed,
            ..self
        }
    }
}

#[cfg(test)]
mod collision_checker_tests {
    use super::*;
    use crate::simulation::Segment;

    fn terrain() -> Terrain {
        Terrain::try_with_default_limits(&[
            Vec2::new(0., 100.),
            Vec2::new(3500., 100.),
            Vec2::new(7000., 150.),
        ])
        .unwrap()
    }

    fn checker() -> CollisionChecker {
        CollisionChecker::default()
            .with_max_vertical_speed(40.)
            .with_max_horizontal_speed(20.)
    }

    fn moved(from: (f64, f64), to: (f64, f64)) -> LanderState {
        let mut state = LanderState::default().with_position(to.0, to.1);
        state.last_movement = Segment::new(Vec2::new(from.0, from.1), state.position);
        state
    }

    #[test]
    fn still_in_flight() {
        assert!(checker()
            .check(&terrain(), &moved((1000., 500.), (1500., 700.)))
            .is_none())
    }

    #[test]
    fn out_of_map_left() {
        assert!(matches!(
            checker().check(&terrain(), &moved((1., 700.), (-5., 700.))),
            Some((_, Landing::OutOfMap))
        ));
    }

    #[test]
    fn out_of_map_right() {
        assert!(matches!(
            checker().check(&terrain(), &moved((6900., 700.), (7100., 700.))),
            Some((_, Landing::OutOfMap))
        ));
    }

    #[test]
    fn out_of_map_ceiling() {
        assert!(matches!(
            checker().check(&terrain(), &moved((1000., 2900.), (1000., 3100.))),
            Some((_, Landing::OutOfMap))
        ));
    }

    #[test]
    fn wrong_terrain() {
        assert!(matches!(
            checker().check(&terrain(), &moved((5000., 500.), (5000., 50.))),
            Some((_, Landing::WrongTerrain))
        ));
    }

    #[test]
    fn not_vertical() {
        let state = moved((1000., 500.), (1500., 50.)).with_rotation(-10);
        assert!(matches!(
            checker().check(&terrain(), &state),
            Some((_, Landing::NotVertical { error_abs })) if error_abs == 10.
        ));
    }

    #[test]
    fn too_fast_vertical() {
        let state = moved((1500., 500.), (1500., 50.)).with_v_speed(-45.);
        assert!(matches!(
            checker().check(&terrain(), &state),
            Some((p, Landing::TooFastVertical { error_abs })) if p.y == 100. && (p.x - 1500.).abs() < 1e-9 && error_abs == 5.
        ));
    }

    #[test]
    fn too_fast_horizontal() {
        let state = moved((1500., 500.), (1500., 50.))
            .with_v_speed(-10.)
            .with_h_speed(-30.);
        assert!(matches!(
            checker().check(&terrain(), &state),
            Some((_, Landing::TooFastHorizontal { error_abs })) if error_abs == 10.
        ));
    }

    #[test]
    fn correct() {
        let state = moved((1500., 500.), (1500., 50.))
            .with_v_speed(-10.)
            .with_h_speed(-5.);
        assert!(matches!(
            checker().check(&terrain(), &state),
            Some((p, Landing::Correct)) if p.y == 100. && (p.x - 1500.).abs() < 1e-9
        ));
    }

    #[test]
    fn safety_boundary() {
        let at_limit = LanderState::default().with_v_speed(40.).with_h_speed(20.);
        assert!(checker().is_safe_landing(&at_limit));
        assert!(checker().is_safe_landing(&at_limit.clone().with_v_speed(-40.).with_h_speed(-20.)));
        assert!(!checker().is_safe_landing(&at_limit.clone().with_v_speed(40.1)));
        assert!(!checker().is_safe_landing(&at_limit.with_rotation(15)));
    }
}
