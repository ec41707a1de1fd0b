use rand::{rngs::StdRng, Rng};

use super::{Genome, Mutater};
use crate::simulation::{limits, Physics};

// genes are resampled within reach of the previous command
pub struct BoundedMutater {
    mutation_rate: f64,
    physics: Physics,
    rng: StdRng,
}

impl BoundedMutater {
    pub fn new(mutation_rate: f64, rng: StdRng) -> Self {
        assert!((0. ..=1.).contains(&mutation_rate));
        Self {
            mutation_rate,
            physics: Physics::default(),
            rng,
        }
    }

    pub fn with_physics(self, physics: Physics) -> Self {
        Self { physics, ..self }
    }

    fn mutate_genome(&mut self, genome: &mut Genome) {
        for i in 0..genome.len() {
            if !self.rng.gen_bool(self.mutation_rate) {
                continue;
            }
            let is_rotation = i % 2 == 0;
            let range = match (i.checked_sub(2), is_rotation) {
                (None, true) => limits::ROTATION,
                (None, false) => limits::THRUST,
                (Some(prev), true) => self.physics.rotation_window(genome.genes()[prev]),
                (Some(prev), false) => self.physics.thrust_window(genome.genes()[prev]),
            };
            let gene = self.rng.gen_range(range);
            genome.set_gene(i, gene);
        }
    }
}

impl Mutater for BoundedMutater {
    fn mutate(&mut self, population: &mut [Genome]) {
        for genome in population {
            self.mutate_genome(genome);
        }
    }
}
