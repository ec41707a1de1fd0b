use std::{
    str::FromStr,
    time::{Duration, Instant},
};

use log::info;
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use crate::{error::Result, genetic::*, simulation::*};

pub mod defaults {
    pub const POPULATION_SIZE: usize = 100;
    pub const PARENT_CUTOFF: usize = 40;
    pub const CROSSOVER_POINT: f64 = 0.5;
    pub const MUTATION_RATE: f64 = 0.02;
    pub const ELITE_COUNT: usize = 10;
    pub const MAX_SIMULATIONS: usize = 100_000;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentKind {
    #[default]
    Truncate,
    Roulette,
}

impl FromStr for ParentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Truncate" => Ok(Self::Truncate),
            "Roulette" => Ok(Self::Roulette),
            _ => Err(format!("expected \"Truncate\" or \"Roulette\", got {s:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossoverKind {
    #[default]
    OnePoint,
    WeightedAverage,
}

impl FromStr for CrossoverKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "OnePoint" => Ok(Self::OnePoint),
            "WeightedAverage" => Ok(Self::WeightedAverage),
            _ => Err(format!("expected \"OnePoint\" or \"WeightedAverage\", got {s:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurvivorKind {
    #[default]
    Elitist,
    AgeBased,
}

impl FromStr for SurvivorKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Elitist" => Ok(Self::Elitist),
            "AgeBased" => Ok(Self::AgeBased),
            _ => Err(format!("expected \"Elitist\" or \"AgeBased\", got {s:?}")),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("PopulationSize must be at least 1")]
    EmptyPopulation,
    #[error("ChromosomeSize must be at least 1")]
    EmptyChromosome,
    #[error("{name} ({value}) exceeds PopulationSize ({population_size})")]
    ExceedsPopulation {
        name: &'static str,
        value: usize,
        population_size: usize,
    },
    #[error("{name} ({value}) out of range [0,1]")]
    OutOfUnitRange { name: &'static str, value: f64 },
}

// a `None` budget is unlimited
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub population_size: usize,
    pub chromosome_size: Option<usize>,
    pub parent_cutoff: usize,
    pub parent: ParentKind,
    pub crossover: CrossoverKind,
    pub crossover_point: f64,
    pub mutation_rate: f64,
    pub survivor: SurvivorKind,
    pub elite_count: usize,
    pub max_simulations: Option<usize>,
    pub max_time: Option<Duration>,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            population_size: defaults::POPULATION_SIZE,
            chromosome_size: None,
            parent_cutoff: defaults::PARENT_CUTOFF,
            parent: ParentKind::default(),
            crossover: CrossoverKind::default(),
            crossover_point: defaults::CROSSOVER_POINT,
            mutation_rate: defaults::MUTATION_RATE,
            survivor: SurvivorKind::default(),
            elite_count: defaults::ELITE_COUNT,
            max_simulations: Some(defaults::MAX_SIMULATIONS),
            max_time: None,
            seed: None,
        }
    }
}

impl Settings {
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    pub fn validate(&self) -> std::result::Result<(), SettingsError> {
        let population_size = self.population_size;
        if population_size == 0 {
            return Err(SettingsError::EmptyPopulation);
        }
        if self.chromosome_size == Some(0) {
            return Err(SettingsError::EmptyChromosome);
        }
        for (name, value) in [
            ("ParentCutoff", self.parent_cutoff),
            ("EliteCount", self.elite_count),
        ] {
            if value > population_size {
                return Err(SettingsError::ExceedsPopulation {
                    name,
                    value,
                    population_size,
                });
            }
        }
        for (name, value) in [
            ("CrossoverPoint", self.crossover_point),
            ("MutationRate", self.mutation_rate),
        ] {
            if !(0. ..=1.).contains(&value) {
                return Err(SettingsError::OutOfUnitRange { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Solution {
    pub genome: Genome,
    pub history: LanderHistory,
    pub outcome: Outcome,
}

impl Solution {
    pub fn has_landed(&self) -> bool {
        self.outcome == Outcome::Landed
    }

    pub fn score(&self) -> Option<f64> {
        self.genome.fitness()
    }
}

pub struct App {
    scenario: Scenario,
    terrain: Terrain,
    calculation: LanderStateCalculation,
    seed: u64,
    algorithm: GeneticAlgorithm,
    started_at: Option<Instant>,
}

impl App {
    pub fn try_new(scenario: Scenario, settings: Settings) -> Result<Self> {
        settings.validate()?;
        scenario.validate()?;
        let terrain = scenario.terrain()?;
        let calculation = LanderStateCalculation::default();
        let seed = settings.seed.unwrap_or_else(rand::random);
        let rng = |k: u64| StdRng::seed_from_u64(seed.wrapping_add(k));

        let mut initializer = RandomInitializer::new(&scenario, settings.population_size, rng(0))
            .with_physics(calculation.physics().clone());
        if let Some(gene_pairs) = settings.chromosome_size {
            initializer = initializer.with_gene_pairs(gene_pairs);
        }
        let parent_selector: Box<dyn ParentSelector> = match settings.parent {
            ParentKind::Truncate => Box::new(TruncateParentSelector::new(settings.parent_cutoff)),
            ParentKind::Roulette => {
                Box::new(RouletteParentSelector::new(settings.parent_cutoff, rng(3)))
            }
        };
        let reproducer: Box<dyn Reproducer> = match settings.crossover {
            CrossoverKind::OnePoint => Box::new(OnePointReproducer::new(settings.crossover_point)),
            CrossoverKind::WeightedAverage => Box::new(WeightedAverageReproducer::new(rng(1))),
        };
        let survivor_selector: Box<dyn SurvivorSelector> = match settings.survivor {
            SurvivorKind::Elitist => Box::new(ElitistSurvivorSelector),
            SurvivorKind::AgeBased => Box::new(AgeSurvivorSelector::new(settings.elite_count)),
        };

        let fitness = LanderFitness::try_new(&scenario)?.with_calculation(calculation.clone());
        let mutater = BoundedMutater::new(settings.mutation_rate, rng(2))
            .with_physics(calculation.physics().clone());

        let algorithm = GeneticAlgorithm::new(
            Box::new(initializer),
            Box::new(fitness),
            parent_selector,
            reproducer,
            Box::new(mutater),
            survivor_selector,
            Box::new(BudgetTerminator::new(
                settings.max_simulations,
                settings.max_time,
            )),
        );
        info!(
            "Solving {:?} with {} genomes, seed {seed}",
            scenario.name, settings.population_size
        );

        Ok(Self {
            scenario,
            terrain,
            calculation,
            seed,
            algorithm,
            started_at: None,
        })
    }

    // the time budget counts from the first call
    pub fn step(&mut self) -> Result<()> {
        let started_at = *self.started_at.get_or_insert_with(Instant::now);
        self.algorithm.step(Some(started_at))
    }

    pub fn run(&mut self) -> Result<Solution> {
        let now = Instant::now();
        let genome = self.algorithm.run()?;
        let solution = self.replay(genome)?;
        info!(
            "{:?} finished after {} generations in {:?}: {:?}, score {:.4}",
            self.scenario.name,
            self.algorithm.generations(),
            now.elapsed(),
            solution.outcome,
            self.algorithm.best_score()
        );
        Ok(solution)
    }

    pub fn replay(&self, genome: Genome) -> Result<Solution> {
        let rollout = Rollout::run(
            &self.terrain,
            &self.calculation,
            self.scenario.initial_lander_state(),
            genome.commands(),
        )?;
        let outcome = rollout.outcome().clone();
        Ok(Solution {
            genome,
            history: rollout.into_history(),
            outcome,
        })
    }

    pub fn best_solution(&self) -> Result<Option<Solution>> {
        fittest(self.algorithm.population())
            .filter(|genome| genome.fitness().is_some())
            .map(|genome| self.replay(genome.clone()))
            .transpose()
    }

    pub fn algorithm(&self) -> &GeneticAlgorithm {
        &self.algorithm
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
