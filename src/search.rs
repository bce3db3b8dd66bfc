use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::error::{Result, ShuffleError};
use crate::generator::AssignmentGenerator;
use crate::model::condition::{Capacity, Score};
use crate::model::entity::GuestList;
use crate::model::group::{Assignment, SeatedGuest};
use crate::score;

/// Settings for one optimizer run.
///
/// ```
/// use table_shuffle::search::OptimizerConfig;
///
/// let config = OptimizerConfig::default()
///     .with_capacity(8.0)
///     .with_iterations(500)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Target guests per table; the table count is `ceil(guests / capacity)`.
    pub capacity: f64,

    /// Random restarts after the initial candidate.
    pub n_iter: usize,

    /// Fixed seed for reproducible runs. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            capacity: 10.0,
            n_iter: 10,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_iterations(mut self, n_iter: usize) -> Self {
        self.n_iter = n_iter;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        Capacity::new(self.capacity)?;
        if self.n_iter < 1 {
            return Err(ShuffleError::InvalidConfiguration(
                "trial budget must be at least 1".into(),
            ));
        }
        if self.n_iter.checked_add(1).is_none() {
            return Err(ShuffleError::InvalidConfiguration(format!(
                "trial budget {} leaves no room for the initial candidate",
                self.n_iter
            )));
        }
        Ok(())
    }

    pub fn groups_for(&self, n_guests: usize) -> Result<usize> {
        Capacity::new(self.capacity)?.groups_for(n_guests)
    }
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub assignment: Assignment,
    pub score: Score,

    /// Candidates scored, the initial one included.
    pub trials: usize,

    /// Times a candidate strictly beat the best so far.
    pub improvements: usize,

    /// `(trial, score)` each time the best score rose, starting with the
    /// initial candidate at trial 0. Strictly increasing in both fields.
    pub history: Vec<(usize, Score)>,
}

impl Outcome {
    pub fn seated(&self, guests: &GuestList) -> Result<Vec<SeatedGuest>> {
        self.assignment.seated(guests)
    }
}

/// Random-restart search: every trial is an independent uniform seating,
/// kept only if it scores strictly higher than the best so far.
#[derive(Debug, Clone)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Result<Optimizer> {
        config.validate()?;
        Ok(Optimizer { config })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn run(&self, guests: &GuestList) -> Result<Outcome> {
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        self.run_with_rng(guests, &mut rng)
    }

    #[tracing::instrument(level = "debug", name = "Table Shuffle", skip_all, fields(guests = guests.len(), n_iter = self.config.n_iter))]
    pub fn run_with_rng<R: Rng + ?Sized>(&self, guests: &GuestList, rng: &mut R) -> Result<Outcome> {
        let n_groups = self.config.groups_for(guests.len())?;
        for guest in guests.unresolved_avoids() {
            debug!(guest = guest.id, avoid = ?guest.avoid, "avoid reference ignored");
        }

        let mut generator = AssignmentGenerator::new(n_groups, rng)?;
        let mut best = generator.generate(guests)?;
        let mut best_score = score::score(guests, &best)?;
        let mut improvements = 0usize;
        let mut history = vec![(0, best_score)];
        debug!(n_groups, score = best_score, "initial seating");

        for trial in 1..=self.config.n_iter {
            let candidate = generator.generate(guests)?;
            let candidate_score = score::score(guests, &candidate)?;
            trace!(trial, score = candidate_score, best = best_score);
            if candidate_score > best_score {
                debug!(trial, from = best_score, to = candidate_score, "improved seating");
                best = candidate;
                best_score = candidate_score;
                improvements += 1;
                history.push((trial, best_score));
            }
        }

        debug!(score = best_score, improvements, "search finished");
        Ok(Outcome {
            assignment: best,
            score: best_score,
            trials: self.config.n_iter + 1,
            improvements,
            history,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::Guest;

    fn six_guests() -> GuestList {
        GuestList::new(
            ["A", "A", "A", "B", "B", "B"]
                .iter()
                .enumerate()
                .map(|(id, category)| Guest::new(id as u32, format!("g{id}")).with_category(*category))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn default_config() {
        let config = OptimizerConfig::default();
        assert_eq!(config.n_iter, 10);
        assert!((config.capacity - 10.0).abs() < 1e-12);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let err = Optimizer::new(OptimizerConfig::default().with_iterations(0)).unwrap_err();
        assert!(matches!(err, ShuffleError::InvalidConfiguration(_)));
    }

    #[test]
    fn bad_capacity_is_rejected() {
        assert!(Optimizer::new(OptimizerConfig::default().with_capacity(0.0)).is_err());
        assert!(Optimizer::new(OptimizerConfig::default().with_capacity(-2.0)).is_err());
    }

    #[test]
    fn empty_guest_list_fails() {
        let optimizer = Optimizer::new(OptimizerConfig::default().with_seed(1)).unwrap();
        let empty = GuestList::new(vec![]).unwrap();
        assert!(matches!(
            optimizer.run(&empty),
            Err(ShuffleError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn history_records_each_improvement() {
        let config = OptimizerConfig::default().with_capacity(3.0).with_iterations(25).with_seed(9);
        let outcome = Optimizer::new(config).unwrap().run(&six_guests()).unwrap();
        assert_eq!(outcome.trials, 26);
        assert_eq!(outcome.history.len(), outcome.improvements + 1);
        assert_eq!(outcome.history[0].0, 0);
        assert_eq!(outcome.history.last().unwrap().1, outcome.score);
        assert!(outcome
            .history
            .windows(2)
            .all(|w| w[0].0 < w[1].0 && w[0].1 < w[1].1 && w[1].0 <= 25));
    }

    #[test]
    fn unrepresentable_budget_is_rejected() {
        let config = OptimizerConfig::default().with_iterations(usize::MAX);
        assert!(matches!(config.validate(), Err(ShuffleError::InvalidConfiguration(_))));
        assert!(Optimizer::new(config).is_err());
        assert!(OptimizerConfig::default().with_iterations(usize::MAX - 1).validate().is_ok());
    }

    #[test]
    fn history_does_not_grow_with_the_budget() {
        // one table: every trial scores the same, so nothing is recorded past the start
        let config = OptimizerConfig::default().with_capacity(6.0).with_iterations(5000).with_seed(4);
        let outcome = Optimizer::new(config).unwrap().run(&six_guests()).unwrap();
        assert_eq!(outcome.trials, 5001);
        assert_eq!(outcome.history, vec![(0, 8)]);
    }

    #[test]
    fn best_score_matches_rescoring() {
        let guests = six_guests();
        let config = OptimizerConfig::default().with_capacity(3.0).with_iterations(50).with_seed(5);
        let outcome = Optimizer::new(config).unwrap().run(&guests).unwrap();
        assert_eq!(score::score(&guests, &outcome.assignment).unwrap(), outcome.score);
        assert_eq!(outcome.assignment.n_groups(), 2);
        assert!(outcome.score <= 12);
    }

    #[test]
    fn single_table_is_deterministic_regardless_of_seed() {
        let guests = six_guests();
        let outcome = Optimizer::new(OptimizerConfig::default().with_capacity(6.0))
            .unwrap()
            .run(&guests)
            .unwrap();
        // A A A B B B around one table: four matching pairs
        assert_eq!(outcome.score, 8);
        assert_eq!(outcome.improvements, 0);
    }
}
