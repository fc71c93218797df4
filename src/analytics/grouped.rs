use std::collections::BTreeMap;

/// Single-level count table keyed by bucket or issue type.
pub type Counts = BTreeMap<String, u64>;

/// Sparse two-level count table, e.g. week -> issue type -> count.
///
/// Entries exist only for pairs that were incremented at least once; the
/// inner table for an outer key is created on its first increment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedCounts {
    groups: BTreeMap<String, Counts>,
}

impl GroupedCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `(outer, inner)`.
    pub fn increment(&mut self, outer: &str, inner: &str) {
        let group = self.groups.entry(outer.to_string()).or_default();
        *group.entry(inner.to_string()).or_insert(0) += 1;
    }

    /// Count for a pair, or `None` if the pair was never observed.
    pub fn get(&self, outer: &str, inner: &str) -> Option<u64> {
        self.groups.get(outer)?.get(inner).copied()
    }

    /// Iterate over every observed `(outer, inner, count)` triple.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.groups.iter().flat_map(|(outer, group)| {
            group
                .iter()
                .map(move |(inner, count)| (outer.as_str(), inner.as_str(), *count))
        })
    }

    /// Number of observed pairs.
    pub fn len(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_creates_group_on_first_access() {
        let mut counts = GroupedCounts::new();
        assert!(counts.is_empty());

        counts.increment("2024-W10", "billing");
        counts.increment("2024-W10", "billing");
        counts.increment("2024-W10", "access");

        assert_eq!(counts.get("2024-W10", "billing"), Some(2));
        assert_eq!(counts.get("2024-W10", "access"), Some(1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_unobserved_pairs_are_absent() {
        let mut counts = GroupedCounts::new();
        counts.increment("2024-W10", "billing");
        counts.increment("2024-W11", "access");

        assert_eq!(counts.get("2024-W10", "access"), None);
        assert_eq!(counts.get("2024-W11", "billing"), None);
        assert_eq!(counts.get("2024-W12", "billing"), None);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.iter().count(), 2);
    }

    #[test]
    fn test_iter_yields_all_pairs() {
        let mut counts = GroupedCounts::new();
        counts.increment("2024-03", "a");
        counts.increment("2024-04", "b");
        counts.increment("2024-04", "b");

        let triples: Vec<_> = counts.iter().collect();
        assert_eq!(triples, vec![("2024-03", "a", 1), ("2024-04", "b", 2)]);
    }
}
