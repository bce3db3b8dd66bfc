use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, ShuffleError};
use crate::model::entity::{Guest, GuestList, Id};

pub const DEFAULT_CATEGORIES: [&str; 5] = ["family", "friends", "work", "university", "tennis"];

/// Random guest list for simulations: ids `0..n`, uniform categories (none
/// when `categories` is empty) and up to `n_rules` avoid relations between
/// distinct guests that have none yet.
pub fn random_guests<R, S>(n: usize, categories: &[S], n_rules: usize, rng: &mut R) -> Result<GuestList>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    let mut guests = (0..n)
        .map(|i| {
            let id = Id::try_from(i).map_err(|_| {
                ShuffleError::InvalidConfiguration(format!("{n} guests exceed the id range"))
            })?;
            let guest = Guest::new(id, format!("Guest {id}"));
            Ok(match categories.choose(rng) {
                Some(category) => guest.with_category(category.as_ref()),
                None => guest,
            })
        })
        .collect::<Result<Vec<Guest>>>()?;

    for _ in 0..n_rules {
        let free: Vec<usize> = guests
            .iter()
            .enumerate()
            .filter(|(_, guest)| guest.avoid.is_none())
            .map(|(position, _)| position)
            .collect();
        if free.len() < 2 {
            break;
        }
        let pair: Vec<usize> = free.choose_multiple(rng, 2).copied().collect();
        let target = guests[pair[1]].id;
        guests[pair[0]].avoid = Some(target);
    }

    GuestList::new(guests)
}
