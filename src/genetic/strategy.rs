use std::time::Duration;

use super::Genome;
use crate::simulation::SimulationError;

pub trait Initializer {
    fn initialize(&mut self) -> Vec<Genome>;
}

pub trait FitnessCalculator {
    fn evaluate(&self, population: &mut [Genome]) -> Result<(), SimulationError>;
}

pub trait ParentSelector {
    fn select(&mut self, population: &[Genome]) -> Vec<Genome>;
}

pub trait Reproducer {
    fn reproduce(&mut self, parents: &[Genome]) -> Vec<Genome>;
}

pub trait Mutater {
    fn mutate(&mut self, population: &mut [Genome]);
}

pub trait SurvivorSelector {
    fn select(&self, population: Vec<Genome>, children: Vec<Genome>) -> Vec<Genome>;
}

pub trait Terminator {
    fn should_terminate(&self, generations: usize, elapsed: Duration, population: &[Genome])
        -> bool;
}
