use rayon::prelude::*;

use super::{FitnessCalculator, Genome};
use crate::error::Result;
use crate::simulation::{
    FitnessBiases, LanderState, LanderStateCalculation, Outcome, Rollout, Scenario,
    SimulationError, Terrain,
};

mod normalization {
    pub const SAFE_H_SPEED: f64 = 20.;
    pub const WORST_H_SPEED: f64 = 250.;
    pub const SAFE_V_SPEED: f64 = 40.;
    pub const WORST_V_SPEED: f64 = 150.;
    pub const WORST_ROTATION: f64 = 90.;
}

/// Receives every finished rollout. Must not influence the search.
pub trait RolloutObserver: Send + Sync {
    fn on_rollout_complete(&self, log: &[LanderState], outcome: &Outcome);
}

pub struct NoopObserver;

impl RolloutObserver for NoopObserver {
    fn on_rollout_complete(&self, _: &[LanderState], _: &Outcome) {}
}

impl<F> RolloutObserver for F
where
    F: Fn(&[LanderState], &Outcome) + Send + Sync,
{
    fn on_rollout_complete(&self, log: &[LanderState], outcome: &Outcome) {
        self(log, outcome)
    }
}

pub struct LanderFitness {
    terrain: Terrain,
    calculation: LanderStateCalculation,
    initial_lander_state: LanderState,
    biases: FitnessBiases,
    observer: Box<dyn RolloutObserver>,
}

impl LanderFitness {
    pub fn try_new(scenario: &Scenario) -> Result<Self> {
        scenario.validate()?;
        scenario.biases.warn_if_unbalanced();
        Ok(Self {
            terrain: scenario.terrain()?,
            calculation: LanderStateCalculation::default(),
            initial_lander_state: scenario.initial_lander_state(),
            biases: scenario.biases.clone(),
            observer: Box::new(NoopObserver),
        })
    }

    pub fn with_calculation(self, calculation: LanderStateCalculation) -> Self {
        Self {
            calculation,
            ..self
        }
    }

    pub fn with_observer(self, observer: impl RolloutObserver + 'static) -> Self {
        Self {
            observer: Box::new(observer),
            ..self
        }
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn rollout(&self, genome: &Genome) -> Result<Rollout<'_>, SimulationError> {
        Rollout::run(
            &self.terrain,
            &self.calculation,
            self.initial_lander_state.clone(),
            genome.commands(),
        )
    }

    pub fn score(&self, genome: &Genome) -> Result<f64, SimulationError> {
        let rollout = self.rollout(genome)?;
        self.observer
            .on_rollout_complete(rollout.history().as_slice(), rollout.outcome());
        Ok(self.score_rollout(&rollout))
    }

    fn score_rollout(&self, rollout: &Rollout) -> f64 {
        use normalization::*;

        let first = rollout.history().first();
        let last = rollout.final_state();

        let h_speed = 1.
            - (last.h_speed.abs().max(SAFE_H_SPEED) - SAFE_H_SPEED)
                / (WORST_H_SPEED - SAFE_H_SPEED);
        let v_speed = 1.
            - (last.v_speed.abs().max(SAFE_V_SPEED) - SAFE_V_SPEED)
                / (WORST_V_SPEED - SAFE_V_SPEED);
        let angle = 1. - last.rotation.abs() as f64 / WORST_ROTATION;
        let fuel_burned = if first.fuel > 0. {
            1. - (first.fuel - last.fuel) / first.fuel
        } else {
            1.
        };
        let distance =
            1. - rollout.distance_to_landing(last.position) / self.terrain.world_diagonal();
        let landed = if rollout.has_landed() { 1. } else { 0. };

        let b = &self.biases;
        [
            (h_speed, b.h_speed),
            (v_speed, b.v_speed),
            (angle, b.angle),
            (fuel_burned, b.fuel_burned),
            (distance, b.distance),
            (landed, b.landed),
        ]
        .into_iter()
        .map(|(term, bias)| term.clamp(0., 1.) * bias)
        .sum()
    }
}

impl FitnessCalculator for LanderFitness {
    fn evaluate(&self, population: &mut [Genome]) -> Result<(), SimulationError> {
        population.par_iter_mut().try_for_each(|genome| {
            let score = self.score(genome)?;
            genome.set_fitness(score);
            Ok(())
        })
    }
}
