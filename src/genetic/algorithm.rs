use std::time::Instant;

use log::debug;

use super::*;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_score: f64,
    pub average_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Completed,
}

pub struct GeneticAlgorithm {
    population: Vec<Genome>,
    fitness: Box<dyn FitnessCalculator>,
    parent_selector: Box<dyn ParentSelector>,
    reproducer: Box<dyn Reproducer>,
    mutater: Box<dyn Mutater>,
    survivor_selector: Box<dyn SurvivorSelector>,
    terminator: Box<dyn Terminator>,
    state: State,
    generations: usize,
    best_score: f64,
    average_score: f64,
    history: Vec<GenerationStats>,
}

impl GeneticAlgorithm {
    pub fn new(
        mut initializer: Box<dyn Initializer>,
        fitness: Box<dyn FitnessCalculator>,
        parent_selector: Box<dyn ParentSelector>,
        reproducer: Box<dyn Reproducer>,
        mutater: Box<dyn Mutater>,
        survivor_selector: Box<dyn SurvivorSelector>,
        terminator: Box<dyn Terminator>,
    ) -> Self {
        Self {
            population: initializer.initialize(),
            fitness,
            parent_selector,
            reproducer,
            mutater,
            survivor_selector,
            terminator,
            state: State::Running,
            generations: 0,
            best_score: f64::NEG_INFINITY,
            average_score: f64::NEG_INFINITY,
            history: Vec::new(),
        }
    }

    /// Runs one generation. The terminator is consulted right after scoring,
    /// so the final population is scored but never replaced.
    pub fn step(&mut self, started_at: Option<Instant>) -> Result<()> {
        if self.is_completed() {
            return Ok(());
        }
        if self.population.is_empty() {
            return Err(Error::EmptyPopulation);
        }

        self.generations += 1;
        self.population.iter_mut().for_each(Genome::increment_age);
        self.fitness.evaluate(&mut self.population)?;
        self.record_scores();

        let elapsed = started_at.map(|t| t.elapsed()).unwrap_or_default();
        if self
            .terminator
            .should_terminate(self.generations, elapsed, &self.population)
        {
            debug!("Terminating after {} generations", self.generations);
            self.state = State::Completed;
            return Ok(());
        }

        let parents = self.parent_selector.select(&self.population);
        let mut children = self.reproducer.reproduce(&parents);
        self.mutater.mutate(&mut children);
        let population = std::mem::take(&mut self.population);
        self.population = self.survivor_selector.select(population, children);
        Ok(())
    }

    // never returns if the terminator has no budget
    pub fn run(&mut self) -> Result<Genome> {
        let started_at = Instant::now();
        while !self.is_completed() {
            self.step(Some(started_at))?;
        }
        fittest(&self.population)
            .cloned()
            .ok_or(Error::EmptyPopulation)
    }

    fn record_scores(&mut self) {
        let scores = self.population.iter().filter_map(Genome::fitness);
        let (count, total, best) = scores.fold((0, 0., f64::NEG_INFINITY), |(n, sum, best), s| {
            (n + 1, sum + s, f64::max(best, s))
        });
        self.best_score = best;
        self.average_score = if count > 0 {
            total / count as f64
        } else {
            f64::NEG_INFINITY
        };

        let stats = GenerationStats {
            generation: self.generations,
            best_score: self.best_score,
            average_score: self.average_score,
        };
        debug!(
            "Generation {}: best {:.4}, average {:.4}",
            stats.generation, stats.best_score, stats.average_score
        );
        self.history.push(stats);
    }

    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    pub fn average_score(&self) -> f64 {
        self.average_score
    }

    pub fn is_completed(&self) -> bool {
        self.state == State::Completed
    }

    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }
}
