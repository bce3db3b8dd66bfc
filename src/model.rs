pub mod entity {
    use std::collections::HashMap;

    use serde::{Deserialize, Serialize};

    use crate::error::{Result, ShuffleError};

    pub type Id = u32;
    pub type Category = String;

    /// A guest to be seated. Immutable once loaded; seating lives in
    /// [`Assignment`](super::group::Assignment), never on the guest.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Guest {
        pub id: Id,
        pub name: String,
        pub category: Option<Category>,
        /// Directional: this guest should not share a table with `avoid`.
        pub avoid: Option<Id>,
    }

    impl Guest {
        pub fn new(id: Id, name: impl Into<String>) -> Guest {
            Guest { id, name: name.into(), category: None, avoid: None }
        }

        pub fn with_category(mut self, category: impl Into<Category>) -> Guest {
            self.category = Some(category.into());
            self
        }

        pub fn with_avoid(mut self, avoid: Id) -> Guest {
            self.avoid = Some(avoid);
            self
        }

        /// Absent categories never match, not even each other.
        pub fn shares_category(&self, other: &Guest) -> bool {
            matches!((&self.category, &other.category), (Some(a), Some(b)) if a == b)
        }
    }

    /// Ordered, id-unique list of guests. The order defines seating order
    /// around each table.
    #[derive(Debug, Clone, PartialEq)]
    pub struct GuestList {
        guests: Vec<Guest>,
        index: HashMap<Id, usize>,
    }

    impl GuestList {
        pub fn new(guests: Vec<Guest>) -> Result<GuestList> {
            let mut index = HashMap::with_capacity(guests.len());
            for (position, guest) in guests.iter().enumerate() {
                if index.insert(guest.id, position).is_some() {
                    return Err(ShuffleError::MalformedItem(format!(
                        "duplicate guest id {}",
                        guest.id
                    )));
                }
            }
            Ok(GuestList { guests, index })
        }

        pub fn len(&self) -> usize {
            self.guests.len()
        }

        pub fn is_empty(&self) -> bool {
            self.guests.is_empty()
        }

        pub fn iter(&self) -> std::slice::Iter<'_, Guest> {
            self.guests.iter()
        }

        pub fn guests(&self) -> &[Guest] {
            &self.guests
        }

        pub fn get(&self, id: Id) -> Option<&Guest> {
            self.index.get(&id).map(|position| &self.guests[*position])
        }

        pub fn contains(&self, id: Id) -> bool {
            self.index.contains_key(&id)
        }

        /// Guests whose `avoid` target is missing from this list. Such
        /// references never produce a conflict.
        pub fn unresolved_avoids(&self) -> Vec<&Guest> {
            self.guests
                .iter()
                .filter(|guest| guest.avoid.is_some_and(|target| !self.contains(target)))
                .collect()
        }
    }

    impl<'a> IntoIterator for &'a GuestList {
        type Item = &'a Guest;
        type IntoIter = std::slice::Iter<'a, Guest>;

        fn into_iter(self) -> Self::IntoIter {
            self.guests.iter()
        }
    }
}


pub mod group {
    use std::collections::{HashMap, HashSet};

    use serde::{Deserialize, Serialize};

    use super::entity::{Guest, GuestList, Id};
    use crate::error::{Result, ShuffleError};

    /// Table number, `1..=n_groups`.
    pub type GroupId = usize;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Assignment {
        groups: HashMap<Id, GroupId>,
        n_groups: usize,
    }

    impl Assignment {
        pub fn new(n_groups: usize) -> Assignment {
            Assignment { groups: HashMap::new(), n_groups }
        }

        pub fn with_capacity(n_groups: usize, n_guests: usize) -> Assignment {
            Assignment { groups: HashMap::with_capacity(n_guests), n_groups }
        }

        pub fn insert(&mut self, id: Id, group: GroupId) -> Option<GroupId> {
            self.groups.insert(id, group)
        }

        pub fn group_of(&self, id: Id) -> Option<GroupId> {
            self.groups.get(&id).copied()
        }

        pub fn n_groups(&self) -> usize {
            self.n_groups
        }

        pub fn len(&self) -> usize {
            self.groups.len()
        }

        pub fn is_empty(&self) -> bool {
            self.groups.is_empty()
        }

        pub fn iter(&self) -> impl Iterator<Item = (Id, GroupId)> + '_ {
            self.groups.iter().map(|(id, group)| (*id, *group))
        }

        /// Number of tables with at least one guest.
        pub fn occupied_groups(&self) -> usize {
            self.groups.values().collect::<HashSet<_>>().len()
        }

        /// Every guest seated exactly once, every key a known guest, every
        /// table number within `1..=n_groups`.
        pub fn validate(&self, guests: &GuestList) -> Result<()> {
            for (id, group) in self.iter() {
                if !guests.contains(id) {
                    return Err(ShuffleError::InvalidAssignment(format!("unknown guest id {id}")));
                }
                if group == 0 || group > self.n_groups {
                    return Err(ShuffleError::InvalidAssignment(format!(
                        "guest {id} seated at table {group}, expected 1..={}",
                        self.n_groups
                    )));
                }
            }
            if let Some(missing) = guests.iter().find(|guest| !self.groups.contains_key(&guest.id)) {
                return Err(ShuffleError::InvalidAssignment(format!(
                    "guest {} has no table",
                    missing.id
                )));
            }
            Ok(())
        }

        /// Guests of each occupied table, in guest-list order.
        pub fn tables<'a>(&self, guests: &'a GuestList) -> HashMap<GroupId, Vec<&'a Guest>> {
            let mut tables: HashMap<GroupId, Vec<&'a Guest>> = HashMap::new();
            for guest in guests {
                if let Some(group) = self.group_of(guest.id) {
                    tables.entry(group).or_default().push(guest);
                }
            }
            tables
        }

        pub fn seated(&self, guests: &GuestList) -> Result<Vec<SeatedGuest>> {
            self.validate(guests)?;
            Ok(guests
                .iter()
                .filter_map(|guest| {
                    self.group_of(guest.id)
                        .map(|table| SeatedGuest { guest: guest.clone(), table })
                })
                .collect())
        }
    }

    /// A guest annotated with its resolved table.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SeatedGuest {
        #[serde(flatten)]
        pub guest: Guest,
        pub table: GroupId,
    }
}


pub mod condition {
    use serde::{Deserialize, Serialize};

    use crate::error::{Result, ShuffleError};

    pub type Score = i64;

    /// Target guests per table. Only used to derive the table count, never
    /// enforced on the seating itself.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    #[serde(try_from = "f64", into = "f64")]
    pub struct Capacity(f64);

    impl TryFrom<f64> for Capacity {
        type Error = ShuffleError;

        fn try_from(capacity: f64) -> Result<Capacity> {
            Capacity::new(capacity)
        }
    }

    impl From<Capacity> for f64 {
        fn from(capacity: Capacity) -> f64 {
            capacity.0
        }
    }

    impl Capacity {
        pub fn new(capacity: f64) -> Result<Capacity> {
            if !capacity.is_finite() || capacity <= 0.0 {
                return Err(ShuffleError::InvalidConfiguration(format!(
                    "capacity must be positive and finite, got {capacity}"
                )));
            }
            Ok(Capacity(capacity))
        }

        pub fn get(self) -> f64 {
            self.0
        }

        /// `ceil(n_guests / capacity)`.
        pub fn groups_for(self, n_guests: usize) -> Result<usize> {
            if n_guests == 0 {
                return Err(ShuffleError::InvalidConfiguration("no guests to seat".into()));
            }
            let groups = (n_guests as f64 / self.0).ceil();
            if !groups.is_finite() || groups > u32::MAX as f64 {
                return Err(ShuffleError::InvalidConfiguration(format!(
                    "capacity {} yields too many tables for {n_guests} guests",
                    self.0
                )));
            }
            Ok(groups as usize)
        }
    }
}
