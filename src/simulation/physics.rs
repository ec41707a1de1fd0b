use std::ops::RangeInclusive;

use serde::Serialize;

use super::{Segment, Vec2};

pub(crate) mod defaults {
    pub const G: f64 = 3.711;
    pub const ROTATION_STEP: i32 = 15;
    pub const THRUST_STEP: i32 = 1;
}

pub mod limits {
    use std::ops::RangeInclusive;

    pub const ROTATION: RangeInclusive<i32> = -90..=90;
    pub const THRUST: RangeInclusive<i32> = 0..=4;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Command {
    pub rotation: i32,
    pub thrust: i32,
}

impl Command {
    pub fn new(rotation: i32, thrust: i32) -> Self {
        Self { rotation, thrust }
    }

    pub fn is_valid(&self) -> bool {
        limits::ROTATION.contains(&self.rotation) && limits::THRUST.contains(&self.thrust)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LanderState {
    pub position: Vec2,
    pub h_speed: f64,
    pub v_speed: f64,
    pub fuel: f64,
    pub rotation: i32,
    pub thrust: i32,
    pub last_movement: Segment,
    pub landed: bool,
    pub step: usize,
}

impl LanderState {
    pub fn new(position: Vec2, fuel: f64) -> Self {
        Self {
            position,
            fuel,
            last_movement: Segment::new(position, position),
            ..Self::default()
        }
    }

    pub fn with_position(self, x: f64, y: f64) -> Self {
        let position = Vec2::new(x, y);
        Self {
            position,
            last_movement: Segment::new(position, position),
            ..self
        }
    }

    pub fn with_h_speed(self, h_speed: f64) -> Self {
        Self { h_speed, ..self }
    }

    pub fn with_v_speed(self, v_speed: f64) -> Self {
        Self { v_speed, ..self }
    }

    pub fn with_fuel(self, fuel: f64) -> Self {
        Self { fuel, ..self }
    }

    pub fn with_rotation(self, rotation: i32) -> Self {
        Self { rotation, ..self }
    }

    pub fn with_thrust(self, thrust: i32) -> Self {
        Self { thrust, ..self }
    }

    pub fn command(&self) -> Command {
        Command::new(self.rotation, self.thrust)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid command {0:?}, rotation must be in [-90, 90] and thrust in [0, 4]")]
    InvalidCommand(Command),
}

pub fn slew_window(previous: i32, step: i32, bounds: RangeInclusive<i32>) -> RangeInclusive<i32> {
    let lower = (previous - step).clamp(*bounds.start(), *bounds.end());
    let upper = (previous + step).clamp(*bounds.start(), *bounds.end());
    lower..=upper
}

#[derive(Clone, Debug)]
pub struct Physics {
    g: f64,
    rotation_step: i32,
    thrust_step: i32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            g: defaults::G,
            rotation_step: defaults::ROTATION_STEP,
            thrust_step: defaults::THRUST_STEP,
        }
    }
}

impl Physics {
    pub fn with_g(self, g: f64) -> Self {
        Self { g, ..self }
    }
    pub fn with_rotation_step(self, rotation_step: i32) -> Self {
        Self {
            rotation_step,
            ..self
        }
    }
    pub fn with_thrust_step(self, thrust_step: i32) -> Self {
        Self {
            thrust_step,
            ..self
        }
    }

    // rotations reachable in one step from `previous`
    pub fn rotation_window(&self, previous: i32) -> RangeInclusive<i32> {
        slew_window(previous, self.rotation_step, limits::ROTATION)
    }

    pub fn thrust_window(&self, previous: i32) -> RangeInclusive<i32> {
        slew_window(previous, self.thrust_step, limits::THRUST)
    }

    pub fn iterate(
        &self,
        mut lander: LanderState,
        cmd: Command,
    ) -> Result<LanderState, SimulationError> {
        // validate cmd
        if !cmd.is_valid() {
            return Err(SimulationError::InvalidCommand(cmd));
        }

        // update rotation and thrust
        let rotation = self.rotation_window(lander.rotation);
        let thrust = self.thrust_window(lander.thrust);
        lander.rotation = cmd.rotation.clamp(*rotation.start(), *rotation.end());
        lander.thrust = cmd.thrust.clamp(*thrust.start(), *thrust.end());

        // update velocity
        let (sin, cos) = (lander.rotation as f64).to_radians().sin_cos();
        let power = lander.thrust as f64;
        let h_speed = lander.h_speed - power * sin;
        let v_speed = lander.v_speed - self.g + power * cos;

        // update position with the mean speed over the step
        let movement = Vec2::new(
            (lander.h_speed + h_speed) / 2.,
            (lander.v_speed + v_speed) / 2.,
        );
        let new_position = lander.position.add(movement);
        lander.last_movement = Segment::new(lander.position, new_position);
        lander.position = new_position;
        lander.h_speed = h_speed;
        lander.v_speed = v_speed;

        // consume fuel
        lander.fuel = (lander.fuel - power).max(0.);
        lander.step += 1;
        Ok(lander)
    }
}
