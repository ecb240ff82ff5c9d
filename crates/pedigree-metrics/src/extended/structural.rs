use super::Distribution;
use crate::index::PedigreeIndex;
use pedigree_core::LevelKey;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Structural {
    /// Distinct generation keys; level-0 entries only count with `top_level`.
    pub generations_count: usize,
    pub nodes_per_level: BTreeMap<LevelKey, usize>,
    pub per_level_min: usize,
    pub per_level_max: usize,
    pub per_level_avg: f64,
    /// Nodes with neither father nor mother.
    pub root_nodes_count: usize,
    /// Nodes whose name is nobody's father or mother.
    pub leaf_nodes_count: usize,
}

impl Structural {
    pub fn count_at(&self, key: LevelKey) -> usize {
        self.nodes_per_level.get(&key).copied().unwrap_or(0)
    }
}

pub(super) fn compute(index: &PedigreeIndex<'_>) -> Structural {
    let nodes = index.nodes();

    let mut nodes_per_level: BTreeMap<LevelKey, usize> = BTreeMap::new();
    for node in nodes.iter().filter(|n| n.counts_toward_generations()) {
        *nodes_per_level.entry(LevelKey::of(node.level)).or_default() += 1;
    }
    let sizes = Distribution::from_sizes(nodes_per_level.values().copied());

    let root_nodes_count = nodes.iter().filter(|n| !n.has_parents()).count();
    let leaf_nodes_count = nodes
        .iter()
        .filter(|n| !n.name().is_some_and(|name| index.is_parent(name)))
        .count();

    Structural {
        generations_count: nodes_per_level.len(),
        nodes_per_level,
        per_level_min: sizes.min,
        per_level_max: sizes.max,
        per_level_avg: sizes.avg,
        root_nodes_count,
        leaf_nodes_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pedigree_core::PedigreeNode;
    use serde_json::json;

    fn structural(value: serde_json::Value) -> Structural {
        let nodes: Vec<PedigreeNode> = serde_json::from_value(value).unwrap();
        compute(&PedigreeIndex::build(&nodes))
    }

    #[test]
    fn placeholder_level_zero_is_not_a_generation() {
        let s = structural(json!([
            {"name": "P", "level": 0},
            {"name": "C", "level": 1},
            {"name": "D", "level": 2}
        ]));
        assert_eq!(s.generations_count, 2);
        assert_eq!(s.count_at(LevelKey::Level(0)), 0);
    }

    #[test]
    fn unleveled_nodes_form_their_own_bucket_sorted_last() {
        let s = structural(json!([
            {"name": "X"},
            {"name": "A", "level": 0, "top_level": true},
            {"name": "B", "level": 1, "father": "A"},
            {"name": "C", "level": 1, "father": "A"}
        ]));
        assert_eq!(s.generations_count, 3);
        let keys: Vec<_> = s.nodes_per_level.keys().copied().collect();
        assert_eq!(
            keys,
            vec![LevelKey::Level(0), LevelKey::Level(1), LevelKey::Unassigned]
        );
        assert_eq!(s.per_level_min, 1);
        assert_eq!(s.per_level_max, 2);
        assert!((s.per_level_avg - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(s.root_nodes_count, 2);
        assert_eq!(s.leaf_nodes_count, 3);
    }
}
