//! Ordering names by their sort keys.
//!
//! Sorting is stable: names with equal keys keep their input order. Keys are
//! computed once per name, not once per comparison.

use crate::key::{build_key, KeyOptions, SortKey};
use crate::rules::RuleTable;

/// Permutation that sorts `names` by ascending key.
///
/// The result lists input indices: `result[0]` is the index of the name that
/// sorts first.
pub fn ordered_indices<S, K, F>(names: &[S], mut key_fn: F) -> Vec<usize>
where
    S: AsRef<str>,
    K: Ord,
    F: FnMut(&str) -> K,
{
    let keys: Vec<K> = names.iter().map(|name| key_fn(name.as_ref())).collect();
    let mut indices: Vec<usize> = (0..names.len()).collect();
    indices.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
    indices
}

/// Reorder `names` according to a permutation from [`ordered_indices`].
pub fn apply_permutation<S>(names: Vec<S>, order: &[usize]) -> Vec<S> {
    let mut slots: Vec<Option<S>> = names.into_iter().map(Some).collect();
    order
        .iter()
        .filter_map(|&index| slots.get_mut(index).and_then(Option::take))
        .collect()
}

/// A rule table and options borrowed for one sort pass.
#[derive(Debug, Clone, Copy)]
pub struct Sorter<'a> {
    table: &'a RuleTable,
    options: KeyOptions,
}

impl<'a> Sorter<'a> {
    pub fn new(table: &'a RuleTable, options: KeyOptions) -> Self {
        Self { table, options }
    }

    /// Sort key for a single name.
    pub fn key(&self, name: &str) -> SortKey {
        build_key(name, &self.options, self.table)
    }

    /// Permutation that sorts `names`.
    pub fn ordered_indices<S: AsRef<str>>(&self, names: &[S]) -> Vec<usize> {
        ordered_indices(names, |name| self.key(name))
    }

    /// Return `names` in sorted order.
    pub fn sort<S: AsRef<str>>(&self, names: Vec<S>) -> Vec<S> {
        let order = self.ordered_indices(&names);
        apply_permutation(names, &order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;

    fn table(rules: &[(&str, i64)]) -> RuleTable {
        rules
            .iter()
            .map(|&(p, s)| Rule::parse(p, s).unwrap())
            .collect()
    }

    #[test]
    fn test_ordered_indices_simple_key() {
        let names = ["b", "c", "a"];
        assert_eq!(ordered_indices(&names, |n| n.to_string()), vec![2, 0, 1]);
    }

    #[test]
    fn test_ordered_indices_is_stable() {
        let names = ["x1", "y1", "x2", "y2", "x3"];
        let order = ordered_indices(&names, |n| n.chars().next());
        assert_eq!(order, vec![0, 2, 4, 1, 3]);
    }

    #[test]
    fn test_ordered_indices_empty() {
        let names: [&str; 0] = [];
        assert!(ordered_indices(&names, |n| n.len()).is_empty());
    }

    #[test]
    fn test_apply_permutation() {
        let names = vec!["b".to_string(), "c".to_string(), "a".to_string()];
        assert_eq!(apply_permutation(names, &[2, 0, 1]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sorter_default_rules() {
        let table = RuleTable::with_default_rules();
        let sorter = Sorter::new(&table, KeyOptions::default());

        let sorted = sorter.sort(vec![
            "irc.freenode.#rust",
            "python.foo",
            "irc.server.freenode",
            "core.weechat",
            "irc.irc_raw",
            "irc.freenode.alice",
            "irc.server.oftc",
            "irc.oftc.#debian",
        ]);

        assert_eq!(
            sorted,
            vec![
                "core.weechat",
                "python.foo",
                "irc.irc_raw",
                "irc.server.freenode",
                "irc.freenode.#rust",
                "irc.freenode.alice",
                "irc.server.oftc",
                "irc.oftc.#debian",
            ]
        );
    }

    #[test]
    fn test_sorter_channels_before_queries_rule() {
        let table = table(&[
            ("core", 0),
            ("irc", 2),
            ("*", 1),
            ("irc.server", 0),
            ("irc.server.*.#*", 1),
            ("irc.server.*.*", 0),
        ]);
        let sorter = Sorter::new(&table, KeyOptions::default());

        let sorted = sorter.sort(vec![
            "irc.net.#b",
            "irc.net.zed",
            "irc.server.net",
            "irc.net.#a",
            "irc.net.amy",
        ]);
        assert_eq!(
            sorted,
            vec![
                "irc.server.net",
                "irc.net.amy",
                "irc.net.zed",
                "irc.net.#a",
                "irc.net.#b",
            ]
        );
    }

    #[test]
    fn test_sorter_case_sensitivity() {
        let table = RuleTable::new();
        let names = vec!["b", "A", "a", "B"];

        let insensitive = Sorter::new(&table, KeyOptions::default());
        assert_eq!(insensitive.sort(names.clone()), vec!["A", "a", "b", "B"]);

        let sensitive = Sorter::new(&table, KeyOptions::default().with_case_sensitive(true));
        assert_eq!(sensitive.sort(names), vec!["A", "B", "a", "b"]);
    }

    #[test]
    fn test_sorter_without_grouping() {
        let table = RuleTable::with_default_rules();
        let sorter = Sorter::new(&table, KeyOptions::default().with_group_irc(false));

        let sorted = sorter.sort(vec!["irc.server.freenode", "irc.freenode.#rust"]);
        assert_eq!(sorted, vec!["irc.server.freenode", "irc.freenode.#rust"]);

        // Without grouping the network component is scored on its own.
        let key = sorter.key("irc.freenode.#rust");
        assert_eq!(key.scores().collect::<Vec<_>>(), vec![2, 3, 3]);
    }
}
