use std::collections::HashSet;

use itertools::Itertools;

use crate::error::Result;
use crate::model::condition::Score;
use crate::model::entity::{Guest, GuestList, Id};
use crate::model::group::Assignment;

/// Score split into its two rules. `conflicts` is never positive,
/// `affinity` never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Breakdown {
    pub conflicts: Score,
    pub affinity: Score,
}

impl Breakdown {
    pub fn total(&self) -> Score {
        self.conflicts + self.affinity
    }
}

pub fn score(guests: &GuestList, assignment: &Assignment) -> Result<Score> {
    evaluate(guests, assignment).map(|breakdown| breakdown.total())
}

pub fn evaluate(guests: &GuestList, assignment: &Assignment) -> Result<Breakdown> {
    assignment.validate(guests)?;
    Ok(assignment
        .tables(guests)
        .values()
        .fold(Breakdown::default(), |acc, table| Breakdown {
            conflicts: acc.conflicts + conflict_penalty(table),
            affinity: acc.affinity + affinity_bonus(table),
        }))
}

/// -1 for every guest whose avoid target sits at the same table. Only the
/// guest's own direction counts. A guest avoiding itself always conflicts;
/// a target missing from the table's list never does.
pub fn conflict_penalty(table: &[&Guest]) -> Score {
    let ids: HashSet<Id> = table.iter().map(|guest| guest.id).collect();
    let conflicts = table
        .iter()
        .filter_map(|guest| guest.avoid)
        .filter(|target| ids.contains(target))
        .count();
    -(conflicts as Score)
}

/// +1 per guest for each circular neighbour (next and previous) sharing its
/// category, i.e. +2 per matching adjacent pair. A lone guest has no
/// neighbours and scores 0.
pub fn affinity_bonus(table: &[&Guest]) -> Score {
    if table.len() < 2 {
        return 0;
    }
    let pairs = table
        .iter()
        .circular_tuple_windows::<(_, _)>()
        .filter(|(a, b)| a.shares_category(b))
        .count();
    2 * pairs as Score
}
