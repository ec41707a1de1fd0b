use log::warn;
use rand::{seq::SliceRandom, Rng};

use super::{Command, LanderState, SimulationError, Terrain, TerrainError, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct FitnessBiases {
    pub h_speed: f64,
    pub v_speed: f64,
    pub angle: f64,
    pub fuel_burned: f64,
    pub distance: f64,
    pub landed: f64,
}

impl Default for FitnessBiases {
    fn default() -> Self {
        let equal = 1. / 6.;
        Self {
            h_speed: equal,
            v_speed: equal,
            angle: equal,
            fuel_burned: equal,
            distance: equal,
            landed: equal,
        }
    }
}

impl FitnessBiases {
    pub fn total(&self) -> f64 {
        self.h_speed + self.v_speed + self.angle + self.fuel_burned + self.distance + self.landed
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut weights = [0f64; 6];
        let mut order = [0, 1, 2, 3, 4, 5];
        order.shuffle(rng);

        let mut remaining = 1.;
        for &i in &order[..5] {
            let weight = rng.gen_range(0f64..=remaining);
            weights[i] = weight;
            remaining -= weight;
        }
        weights[order[5]] = remaining;

        let [h_speed, v_speed, angle, fuel_burned, distance, landed] = weights;
        Self {
            h_speed,
            v_speed,
            angle,
            fuel_burned,
            distance,
            landed,
        }
    }

    pub(crate) fn warn_if_unbalanced(&self) {
        let total = self.total();
        if (total - 1.).abs() > 1e-3 {
            warn!("Fitness biases sum to {total:.3} instead of 1");
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub surface: Vec<Vec2>,
    pub position: Vec2,
    pub h_speed: f64,
    pub v_speed: f64,
    pub fuel: f64,
    pub rotation: i32,
    pub thrust: i32,
    pub biases: FitnessBiases,
}

impl Scenario {
    pub fn initial_lander_state(&self) -> LanderState {
        LanderState::new(self.position, self.fuel)
            .with_h_speed(self.h_speed)
            .with_v_speed(self.v_speed)
            .with_rotation(self.rotation)
            .with_thrust(self.thrust)
    }

    pub fn initial_command(&self) -> Command {
        Command::new(self.rotation, self.thrust)
    }

    pub fn terrain(&self) -> Result<Terrain, TerrainError> {
        Terrain::try_with_default_limits(&self.surface)
    }

    // the starting rotation and thrust obey the same limits as any command
    pub fn validate(&self) -> Result<(), SimulationError> {
        let command = self.initial_command();
        if command.is_valid() {
            Ok(())
        } else {
            Err(SimulationError::InvalidCommand(command))
        }
    }
}
