use std::cmp::Ordering;

use crate::simulation::Command;

pub type Gene = i32;

/// A candidate command sequence. Genes alternate rotation and thrust, so
/// `genes[2 * i]` and `genes[2 * i + 1]` are the command of step `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct Genome {
    genes: Vec<Gene>,
    fitness: Option<f64>,
    age: usize,
}

impl Genome {
    pub fn new(genes: Vec<Gene>) -> Self {
        debug_assert!(genes.len() % 2 == 0, "genes must come in pairs");
        Self {
            genes,
            fitness: None,
            age: 0,
        }
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn set_gene(&mut self, index: usize, value: Gene) {
        self.genes[index] = value;
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        self.genes
            .chunks_exact(2)
            .map(|pair| Command::new(pair[0], pair[1]))
    }

    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    pub fn age(&self) -> usize {
        self.age
    }

    pub fn increment_age(&mut self) {
        self.age += 1;
    }
}

pub fn by_descending_fitness(a: &Genome, b: &Genome) -> Ordering {
    let score = |g: &Genome| g.fitness.unwrap_or(f64::NEG_INFINITY);
    score(b).total_cmp(&score(a))
}

// stable, ties keep population order
pub fn ranked(population: &[Genome]) -> Vec<Genome> {
    let mut ranking = population.to_vec();
    ranking.sort_by(by_descending_fitness);
    ranking
}

pub fn fittest(population: &[Genome]) -> Option<&Genome> {
    population.iter().reduce(|best, genome| {
        if by_descending_fitness(genome, best) == Ordering::Less {
            genome
        } else {
            best
        }
    })
}
