/// Tie-aware ranked lists of reference genome identifiers
use crate::PhirboError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A group of identifiers sharing one rank.
pub type TieSet = Vec<String>;

/// Ranked lists keyed by entity name, iterated in ascending name order.
pub type RankedCollection = BTreeMap<String, RankedList>;

/// Ordered sequence of non-empty tie-sets. An identifier occurs at most once
/// across the whole list; `RankedList::new` rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<TieSet>", into = "Vec<TieSet>")]
pub struct RankedList {
    groups: Vec<TieSet>,
}

impl RankedList {
    pub fn new(groups: Vec<TieSet>) -> Result<Self, PhirboError> {
        let mut seen = HashSet::new();
        for (rank, group) in groups.iter().enumerate() {
            if group.is_empty() {
                return Err(PhirboError::MalformedRankedList(format!(
                    "tie-set at rank {} is empty",
                    rank + 1
                )));
            }
            for id in group {
                if id.is_empty() {
                    return Err(PhirboError::MalformedRankedList(format!(
                        "empty identifier at rank {}",
                        rank + 1
                    )));
                }
                if !seen.insert(id.as_str()) {
                    return Err(PhirboError::MalformedRankedList(format!(
                        "identifier '{}' appears more than once (again at rank {})",
                        id,
                        rank + 1
                    )));
                }
            }
        }

        Ok(Self { groups })
    }

    /// Convenience constructor for string literals.
    pub fn from_groups<I, G, S>(groups: I) -> Result<Self, PhirboError>
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            groups
                .into_iter()
                .map(|g| g.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Keep only the first `k` tie-sets; `k == 0` leaves the list untouched.
    pub fn truncated(mut self, k: usize) -> Self {
        if k > 0 {
            self.groups.truncate(k);
        }
        self
    }

    /// Number of ranks (tie-sets), not identifiers.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[TieSet] {
        &self.groups
    }

    /// Tie-set at zero-based rank `depth`, or `None` past the end.
    pub fn group(&self, depth: usize) -> Option<&TieSet> {
        self.groups.get(depth)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().flatten().map(String::as_str)
    }

    pub fn identifier_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Flattened identifier set.
    pub fn identifier_set(&self) -> HashSet<&str> {
        self.identifiers().collect()
    }

    pub fn is_disjoint(&self, other: &RankedList) -> bool {
        let (small, large) = if self.identifier_count() <= other.identifier_count() {
            (self, other)
        } else {
            (other, self)
        };
        let ids = large.identifier_set();
        !small.identifiers().any(|id| ids.contains(id))
    }
}

impl TryFrom<Vec<TieSet>> for RankedList {
    type Error = PhirboError;

    fn try_from(groups: Vec<TieSet>) -> Result<Self, Self::Error> {
        Self::new(groups)
    }
}

impl From<RankedList> for Vec<TieSet> {
    fn from(list: RankedList) -> Self {
        list.groups
    }
}
