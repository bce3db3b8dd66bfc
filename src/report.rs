use std::fmt;

use crate::model::entity::GuestList;
use crate::search::Outcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    RandomSimulation,
    File(String),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::RandomSimulation => write!(f, "Random Simulation"),
            Source::File(name) => write!(f, "Data from {name}"),
        }
    }
}

/// One-line headline of a run, e.g.
/// `Random Simulation : 100 guests --> 10 tables calculated with max 10 people per table`.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub source: Source,
    pub guests: usize,
    pub tables: usize,
    pub capacity: f64,
}

impl Summary {
    pub fn new(source: Source, guests: &GuestList, outcome: &Outcome, capacity: f64) -> Summary {
        Summary {
            source,
            guests: guests.len(),
            tables: outcome.assignment.occupied_groups(),
            capacity,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : {} guests --> {} tables calculated with max {} people per table",
            self.source,
            self.guests,
            self.tables,
            self.capacity.trunc() as u64
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::Guest;
    use crate::model::group::Assignment;

    #[test]
    fn summary_counts_occupied_tables_only() {
        let guests = GuestList::new((0..4).map(|id| Guest::new(id, "g")).collect()).unwrap();
        let mut assignment = Assignment::new(3);
        for id in 0..4 {
            assignment.insert(id, if id < 2 { 1 } else { 3 });
        }
        let outcome = Outcome {
            assignment,
            score: 0,
            trials: 1,
            improvements: 0,
            history: vec![(0, 0)],
        };
        let summary = Summary::new(Source::File("guests.xlsx".into()), &guests, &outcome, 2.5);
        assert_eq!(
            summary.to_string(),
            "Data from guests.xlsx : 4 guests --> 2 tables calculated with max 2 people per table"
        );
    }

    #[test]
    fn random_source_label() {
        assert_eq!(Source::RandomSimulation.to_string(), "Random Simulation");
    }
}
