use rand::Rng;

use crate::error::{Result, ShuffleError};
use crate::model::entity::GuestList;
use crate::model::group::Assignment;

/// Draws a table for every guest independently and uniformly from
/// `1..=n_groups`. Tables may end up over capacity or empty.
pub struct AssignmentGenerator<R> {
    n_groups: usize,
    rng: R,
}

impl<R: Rng> AssignmentGenerator<R> {
    pub fn new(n_groups: usize, rng: R) -> Result<AssignmentGenerator<R>> {
        if n_groups == 0 {
            return Err(ShuffleError::InvalidConfiguration("table count must be positive".into()));
        }
        Ok(AssignmentGenerator { n_groups, rng })
    }

    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    pub fn generate(&mut self, guests: &GuestList) -> Result<Assignment> {
        if guests.is_empty() {
            return Err(ShuffleError::InvalidConfiguration("no guests to seat".into()));
        }
        let mut assignment = Assignment::with_capacity(self.n_groups, guests.len());
        for guest in guests {
            assignment.insert(guest.id, self.rng.gen_range(1..=self.n_groups));
        }
        Ok(assignment)
    }
}
