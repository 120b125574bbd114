//! Deduplicated collection of canonical dates.

use std::collections::BTreeSet;

use crate::date::CanonicalDate;

/// Every date at most once. Iterates in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSet(BTreeSet<CanonicalDate>);

impl DateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the date was already present.
    pub fn add(&mut self, date: CanonicalDate) -> bool {
        self.0.insert(date)
    }

    pub fn all(&self) -> impl Iterator<Item = CanonicalDate> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, date: &CanonicalDate) -> bool {
        self.0.contains(date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Extend<CanonicalDate> for DateSet {
    fn extend<I: IntoIterator<Item = CanonicalDate>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<CanonicalDate> for DateSet {
    fn from_iter<I: IntoIterator<Item = CanonicalDate>>(iter: I) -> Self {
        DateSet(iter.into_iter().collect())
    }
}
