//! Domain frequency counting.

use std::collections::HashMap;

/// Query counts per domain name, remembering first-seen order.
///
/// Names are compared byte for byte; `Example.com` and `example.com` are
/// different entries.
#[derive(Debug, Clone, Default)]
pub struct DomainTally {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl DomainTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one query for `name`.
    pub fn record(&mut self, name: &str) {
        match self.index.get(name) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), 1));
            }
        }
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded queries.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.index.get(name).map(|&i| self.entries[i].1)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Entries ranked by count, highest first. Equal counts keep first-seen
    /// order. `None` and `Some(0)` return every entry.
    pub fn report(&self, limit: Option<usize>) -> Vec<(&str, u64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        // Stable, so ties stay in first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(n) = limit.filter(|&n| n > 0) {
            ranked.truncate(n);
        }
        ranked
    }
}

impl<'a> Extend<&'a str> for DomainTally {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for name in iter {
            self.record(name);
        }
    }
}

impl<'a> FromIterator<&'a str> for DomainTally {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tally = Self::new();
        tally.extend(iter);
        tally
    }
}
