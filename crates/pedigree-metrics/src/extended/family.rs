use super::Distribution;
use crate::index::PedigreeIndex;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParentsCompleteness {
    pub zero_parents: usize,
    pub one_parent: usize,
    pub two_parents: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParentChildAndSiblings {
    pub parents_completeness: ParentsCompleteness,
    /// Child references per referenced parent name.
    pub children_distribution: Distribution,
    pub sibling_groups_count: usize,
    pub sibling_group_sizes: Distribution,
    /// Members of each distinct sibling group, sorted by name. An unnamed
    /// node is a `null` member of its own group.
    pub sibling_groups: Vec<Vec<Option<String>>>,
}

/// Distinct sibling groups in order of first appearance.
///
/// Each node with siblings contributes `{self} ∪ siblings`; singleton groups
/// are dropped and a group equal as a set to an earlier one is skipped, so
/// `X: [Y]` and `Y: [X]` form one group. `self` is a member even when the
/// node has no name.
fn sibling_groups<'a>(index: &PedigreeIndex<'a>) -> Vec<BTreeSet<Option<&'a str>>> {
    let mut groups: Vec<BTreeSet<Option<&str>>> = Vec::new();
    for node in index.nodes().iter().filter(|n| !n.siblings.is_empty()) {
        let group: BTreeSet<Option<&str>> = std::iter::once(node.name())
            .chain(node.siblings.iter().map(|s| Some(s.as_str())))
            .collect();
        if group.len() > 1 && !groups.contains(&group) {
            groups.push(group);
        }
    }
    groups
}

pub(super) fn compute(index: &PedigreeIndex<'_>) -> ParentChildAndSiblings {
    let mut completeness = ParentsCompleteness::default();
    for node in index.nodes() {
        match node.parent_count() {
            0 => completeness.zero_parents += 1,
            1 => completeness.one_parent += 1,
            _ => completeness.two_parents += 1,
        }
    }

    let groups = sibling_groups(index);

    ParentChildAndSiblings {
        parents_completeness: completeness,
        children_distribution: Distribution::from_sizes(
            index.children_counts().map(|(_, count)| count),
        ),
        sibling_groups_count: groups.len(),
        sibling_group_sizes: Distribution::from_sizes(groups.iter().map(BTreeSet::len)),
        sibling_groups: groups
            .into_iter()
            .map(|g| g.into_iter().map(|m| m.map(str::to_owned)).collect())
            .collect(),
    }
}
