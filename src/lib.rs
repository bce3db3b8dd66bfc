//! Seat guests at tables so that guests who should avoid each other sit
//! apart and guests of the same category sit side by side.
//!
//! The search is random restart: [`search::Optimizer`] draws independent
//! seatings with [`generator::AssignmentGenerator`], scores each with
//! [`score::score`] and keeps the best.

pub mod error;
pub mod generator;
pub mod model;
pub mod report;
pub mod sample;
pub mod score;
pub mod search;

pub use error::{Result, ShuffleError};
pub use model::condition::{Capacity, Score};
pub use model::entity::{Guest, GuestList, Id};
pub use model::group::{Assignment, GroupId, SeatedGuest};
pub use search::{Optimizer, OptimizerConfig, Outcome};
