use std::time::Duration;

use super::{Genome, Terminator};

#[derive(Debug, Clone, Default)]
pub struct BudgetTerminator {
    max_simulations: Option<usize>,
    max_time: Option<Duration>,
}

impl BudgetTerminator {
    pub fn new(max_simulations: Option<usize>, max_time: Option<Duration>) -> Self {
        Self {
            max_simulations,
            max_time,
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_simulations(self, max_simulations: usize) -> Self {
        Self {
            max_simulations: Some(max_simulations),
            ..self
        }
    }

    pub fn with_max_time(self, max_time: Duration) -> Self {
        Self {
            max_time: Some(max_time),
            ..self
        }
    }
}

impl Terminator for BudgetTerminator {
    fn should_terminate(
        &self,
        generations: usize,
        elapsed: Duration,
        population: &[Genome],
    ) -> bool {
        let simulations = generations.saturating_mul(population.len());
        self.max_simulations.is_some_and(|max| simulations > max)
            || self.max_time.is_some_and(|max| elapsed > max)
    }
}

#[cfg(test)]
mod terminator_tests {
    use super::*;

    fn population(n: usize) -> Vec<Genome> {
        vec![Genome::new(vec![0, 0]); n]
    }

    #[test]
    fn simulation_budget() {
        let terminator = BudgetTerminator::new(Some(100), None);
        assert!(terminator.should_terminate(11, Duration::ZERO, &population(10)));
        assert!(!terminator.should_terminate(10, Duration::ZERO, &population(10)));
    }

    #[test]
    fn time_budget() {
        let terminator = BudgetTerminator::unbounded().with_max_time(Duration::from_millis(50));
        assert!(!terminator.should_terminate(1000, Duration::from_millis(50), &population(10)));
        assert!(terminator.should_terminate(1, Duration::from_millis(51), &population(10)));
    }

    #[test]
    fn unbounded_never_stops() {
        let terminator = BudgetTerminator::unbounded();
        assert!(!terminator.should_terminate(usize::MAX, Duration::MAX, &population(10)));
    }

    #[test]
    fn either_budget_stops() {
        let terminator = BudgetTerminator::unbounded()
            .with_max_simulations(50)
            .with_max_time(Duration::from_secs(3600));
        assert!(terminator.should_terminate(6, Duration::from_secs(1), &population(10)));
    }
}
