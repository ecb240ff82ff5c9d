use crate::index::PedigreeIndex;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partnerships {
    /// Distinct unordered partner pairs; one direction is enough.
    pub partnerships_count: usize,
    pub avg_partners_per_node: f64,
    pub max_partners_for_single_node: usize,
    pub partnered_nodes_count: usize,
    /// Distinct unordered pairs from `divorced` lists.
    pub divorces_count: usize,
    pub divorce_rate_percent: f64,
}

fn unordered<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

pub(super) fn compute(index: &PedigreeIndex<'_>) -> Partnerships {
    let sets = index.partner_sets();

    let pairs: BTreeSet<(&str, &str)> = sets
        .iter()
        .flat_map(|(a, partners)| partners.iter().map(move |b| unordered(*a, *b)))
        .collect();

    let mut divorces: BTreeSet<(&str, &str)> = BTreeSet::new();
    for node in index.nodes() {
        let Some(name) = node.name() else {
            continue;
        };
        for other in node.divorced.iter().map(String::as_str) {
            if other != name {
                divorces.insert(unordered(name, other));
            }
        }
    }

    let total_partner_refs: usize = sets.values().map(BTreeSet::len).sum();
    let divorce_rate_percent = if pairs.is_empty() {
        0.0
    } else {
        divorces.len() as f64 / pairs.len() as f64 * 100.0
    };

    Partnerships {
        partnerships_count: pairs.len(),
        avg_partners_per_node: total_partner_refs as f64 / index.len().max(1) as f64,
        max_partners_for_single_node: sets.values().map(BTreeSet::len).max().unwrap_or(0),
        partnered_nodes_count: sets.values().filter(|s| !s.is_empty()).count(),
        divorces_count: divorces.len(),
        divorce_rate_percent,
    }
}
