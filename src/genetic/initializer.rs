use rand::{rngs::StdRng, Rng};

use super::{Gene, Genome, Initializer};
use crate::simulation::{Command, Physics, Scenario};

// one command for every 8 units of fuel
pub fn default_gene_pairs(fuel: f64) -> usize {
    let genes = (fuel / 4.).round().max(0.) as usize;
    (genes / 2).max(1)
}

pub struct RandomInitializer {
    population_size: usize,
    gene_pairs: usize,
    initial_command: Command,
    physics: Physics,
    rng: StdRng,
}

impl RandomInitializer {
    pub fn new(scenario: &Scenario, population_size: usize, rng: StdRng) -> Self {
        Self {
            population_size,
            gene_pairs: default_gene_pairs(scenario.fuel),
            initial_command: scenario.initial_command(),
            physics: Physics::default(),
            rng,
        }
    }

    pub fn with_gene_pairs(self, gene_pairs: usize) -> Self {
        assert!(gene_pairs > 0);
        Self { gene_pairs, ..self }
    }

    pub fn with_physics(self, physics: Physics) -> Self {
        Self { physics, ..self }
    }

    fn random_genes(&mut self) -> Vec<Gene> {
        let mut genes = Vec::with_capacity(self.gene_pairs * 2);
        let Command {
            mut rotation,
            mut thrust,
        } = self.initial_command;
        for _ in 0..self.gene_pairs {
            rotation = self.rng.gen_range(self.physics.rotation_window(rotation));
            thrust = self.rng.gen_range(self.physics.thrust_window(thrust));
            genes.push(rotation);
            genes.push(thrust);
        }
        genes
    }
}

impl Initializer for RandomInitializer {
    fn initialize(&mut self) -> Vec<Genome> {
        (0..self.population_size)
            .map(|_| Genome::new(self.random_genes()))
            .collect()
    }
}
