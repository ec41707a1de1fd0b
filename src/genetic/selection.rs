use log::debug;
use rand::{
    distributions::{Distribution, WeightedIndex},
    rngs::StdRng,
    Rng,
};

use super::{ranked, Genome, ParentSelector, SurvivorSelector};

pub struct TruncateParentSelector {
    cutoff: usize,
}

impl TruncateParentSelector {
    pub fn new(cutoff: usize) -> Self {
        Self { cutoff }
    }
}

impl ParentSelector for TruncateParentSelector {
    fn select(&mut self, population: &[Genome]) -> Vec<Genome> {
        let mut parents = ranked(population);
        parents.truncate(self.cutoff);
        parents
    }
}

// draws with replacement, uniform when no genome has positive fitness
pub struct RouletteParentSelector {
    count: usize,
    rng: StdRng,
}

impl RouletteParentSelector {
    pub fn new(count: usize, rng: StdRng) -> Self {
        Self { count, rng }
    }
}

impl ParentSelector for RouletteParentSelector {
    fn select(&mut self, population: &[Genome]) -> Vec<Genome> {
        if population.is_empty() {
            return Vec::new();
        }
        let weights = population.iter().map(|genome| {
            genome
                .fitness()
                .filter(|fitness| fitness.is_finite())
                .map_or(0., |fitness| fitness.max(0.))
        });
        match WeightedIndex::<f64>::new(weights) {
            Ok(wheel) => (0..self.count)
                .map(|_| population[wheel.sample(&mut self.rng)].clone())
                .collect(),
            Err(err) => {
                debug!("Roulette wheel unusable ({err}), drawing parents uniformly");
                (0..self.count)
                    .map(|_| population[self.rng.gen_range(0..population.len())].clone())
                    .collect()
            }
        }
    }
}

fn parent_slots(population: &[Genome], children: &mut Vec<Genome>) -> usize {
    children.truncate(population.len());
    population.len() - children.len()
}

pub struct ElitistSurvivorSelector;

impl SurvivorSelector for ElitistSurvivorSelector {
    fn select(&self, population: Vec<Genome>, mut children: Vec<Genome>) -> Vec<Genome> {
        let slots = parent_slots(&population, &mut children);
        let mut survivors = ranked(&population);
        survivors.truncate(slots);
        survivors.append(&mut children);
        survivors
    }
}

// `elite` best parents first, then the youngest
pub struct AgeSurvivorSelector {
    elite: usize,
}

impl AgeSurvivorSelector {
    pub fn new(elite: usize) -> Self {
        Self { elite }
    }
}

impl SurvivorSelector for AgeSurvivorSelector {
    fn select(&self, population: Vec<Genome>, mut children: Vec<Genome>) -> Vec<Genome> {
        let slots = parent_slots(&population, &mut children);
        let mut survivors = ranked(&population);
        let mut others = survivors.split_off(self.elite.min(slots).min(survivors.len()));
        others.sort_by_key(Genome::age);
        others.truncate(slots - survivors.len());

        survivors.append(&mut others);
        survivors.append(&mut children);
        survivors
    }
}

#[cfg(test)]
mod selection_tests {
    use rand::SeedableRng;

    use super::*;

    fn genome(id: i32, fitness: f64, age: usize) -> Genome {
        let mut genome = Genome::new(vec![id, 0]);
        genome.set_fitness(fitness);
        for _ in 0..age {
            genome.increment_age();
        }
        genome
    }

    fn ids(population: &[Genome]) -> Vec<i32> {
        population.iter().map(|g| g.genes()[0]).collect()
    }

    fn population() -> Vec<Genome> {
        vec![
            genome(1, 0.2, 1),
            genome(2, 0.9, 5),
            genome(3, 0.5, 3),
            genome(4, 0.7, 2),
            genome(5, 0.1, 4),
        ]
    }

    fn children(n: i32) -> Vec<Genome> {
        (0..n).map(|i| Genome::new(vec![100 + i, 0])).collect()
    }

    #[test]
    fn truncation_keeps_the_best() {
        let parents = TruncateParentSelector::new(3).select(&population());
        assert_eq!(ids(&parents), vec![2, 4, 3]);
    }

    #[test]
    fn truncation_with_large_cutoff_keeps_everyone() {
        let parents = TruncateParentSelector::new(10).select(&population());
        assert_eq!(parents.len(), 5);
    }

    fn roulette(count: usize, seed: u64) -> RouletteParentSelector {
        RouletteParentSelector::new(count, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn roulette_draws_the_requested_count() {
        assert_eq!(roulette(7, 1).select(&population()).len(), 7);
        assert_eq!(roulette(5, 1).select(&population()[..1]).len(), 5);
        assert!(roulette(3, 1).select(&[]).is_empty());
    }

    #[test]
    fn roulette_is_proportional_to_fitness() {
        let population = vec![genome(1, 1., 0), genome(2, 3., 0)];
        let parents = roulette(4000, 5).select(&population);
        let fitter = ids(&parents).iter().filter(|&&id| id == 2).count();
        let share = fitter as f64 / parents.len() as f64;
        assert!((0.7..0.8).contains(&share), "share was {share}");
    }

    #[test]
    fn roulette_never_draws_weightless_genomes() {
        let mut population = population();
        population.push(genome(6, 0., 0));
        population.push(genome(7, -0.5, 0));
        population.push(Genome::new(vec![8, 0]));
        let parents = roulette(1000, 3).select(&population);
        assert!(ids(&parents).iter().all(|&id| id <= 5));
    }

    #[test]
    fn roulette_falls_back_to_uniform() {
        let population: Vec<Genome> = (1..=4).map(|id| genome(id, 0., 0)).collect();
        let drawn = ids(&roulette(400, 8).select(&population));
        assert_eq!(drawn.len(), 400);
        for id in 1..=4 {
            assert!(drawn.contains(&id), "{id} never drawn");
        }
    }

    #[test]
    fn roulette_same_seed_same_parents() {
        let a = roulette(20, 11).select(&population());
        let b = roulette(20, 11).select(&population());
        let c = roulette(20, 12).select(&population());
        assert_eq!(ids(&a), ids(&b));
        assert_ne!(ids(&a), ids(&c));
    }

    #[test]
    fn elitist_fills_free_slots() {
        let next = ElitistSurvivorSelector.select(population(), children(2));
        assert_eq!(ids(&next), vec![2, 4, 3, 100, 101]);
    }

    #[test]
    fn surplus_children_are_truncated() {
        let next = ElitistSurvivorSelector.select(population(), children(7));
        assert_eq!(ids(&next), vec![100, 101, 102, 103, 104]);

        let next = AgeSurvivorSelector::new(2).select(population(), children(6));
        assert_eq!(next.len(), 5);
        assert!(next.iter().all(|g| g.genes()[0] >= 100));
    }

    #[test]
    fn age_based_prefers_young_after_elite() {
        let next = AgeSurvivorSelector::new(1).select(population(), children(2));
        // 2 is elite, then youngest of the rest: 1 (age 1), 4 (age 2)
        assert_eq!(ids(&next), vec![2, 1, 4, 100, 101]);
    }

    #[test]
    fn age_based_without_elite() {
        let next = AgeSurvivorSelector::new(0).select(population(), children(3));
        assert_eq!(ids(&next), vec![1, 4, 100, 101, 102]);
    }

    #[test]
    fn elite_larger_than_slots() {
        let next = AgeSurvivorSelector::new(4).select(population(), children(3));
        assert_eq!(ids(&next), vec![2, 4, 100, 101, 102]);
    }
}
