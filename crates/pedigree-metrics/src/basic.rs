use pedigree_core::PedigreeNode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Flat per-graph counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicMetrics {
    pub total_nodes: usize,
    pub nodes_with_no_parents_true: usize,
    pub nodes_with_top_level_true: usize,
    pub nodes_with_partner: usize,
    pub nodes_with_one_partner: usize,
    pub nodes_with_multiple_partners: usize,
    pub nodes_with_child: usize,
    pub nodes_with_father: usize,
    pub nodes_with_mother: usize,
    pub nodes_with_siblings: usize,
    pub nodes_with_1_sibling: usize,
    pub nodes_with_2_siblings: usize,
    pub nodes_with_3_siblings: usize,
    pub nodes_with_4_siblings: usize,
    pub nodes_with_5_or_more_siblings: usize,
}

impl BasicMetrics {
    /// Sibling-list length buckets `1, 2, 3, 4, 5+`.
    pub fn sibling_buckets(&self) -> [usize; 5] {
        [
            self.nodes_with_1_sibling,
            self.nodes_with_2_siblings,
            self.nodes_with_3_siblings,
            self.nodes_with_4_siblings,
            self.nodes_with_5_or_more_siblings,
        ]
    }

    /// Counters in report order, keyed by their field names.
    pub fn counters(&self) -> [(&'static str, usize); 15] {
        [
            ("total_nodes", self.total_nodes),
            ("nodes_with_no_parents_true", self.nodes_with_no_parents_true),
            ("nodes_with_top_level_true", self.nodes_with_top_level_true),
            ("nodes_with_partner", self.nodes_with_partner),
            ("nodes_with_one_partner", self.nodes_with_one_partner),
            ("nodes_with_multiple_partners", self.nodes_with_multiple_partners),
            ("nodes_with_child", self.nodes_with_child),
            ("nodes_with_father", self.nodes_with_father),
            ("nodes_with_mother", self.nodes_with_mother),
            ("nodes_with_siblings", self.nodes_with_siblings),
            ("nodes_with_1_sibling", self.nodes_with_1_sibling),
            ("nodes_with_2_siblings", self.nodes_with_2_siblings),
            ("nodes_with_3_siblings", self.nodes_with_3_siblings),
            ("nodes_with_4_siblings", self.nodes_with_4_siblings),
            ("nodes_with_5_or_more_siblings", self.nodes_with_5_or_more_siblings),
        ]
    }
}

pub fn compute_metrics(nodes: &[PedigreeNode]) -> BasicMetrics {
    let mut m = BasicMetrics {
        total_nodes: nodes.len(),
        ..Default::default()
    };

    let names: HashSet<&str> = nodes.iter().filter_map(PedigreeNode::name).collect();
    let mut parents: HashSet<&str> = HashSet::new();

    for node in nodes {
        m.nodes_with_no_parents_true += usize::from(node.noparents);
        m.nodes_with_top_level_true += usize::from(node.top_level);
        m.nodes_with_father += usize::from(node.has_father_key);
        m.nodes_with_mother += usize::from(node.has_mother_key);
        parents.extend(node.parents());

        match node.partners_len {
            0 => {}
            1 => {
                m.nodes_with_partner += 1;
                m.nodes_with_one_partner += 1;
            }
            _ => {
                m.nodes_with_partner += 1;
                m.nodes_with_multiple_partners += 1;
            }
        }

        match node.siblings_len {
            0 => {}
            n => {
                m.nodes_with_siblings += 1;
                match n {
                    1 => m.nodes_with_1_sibling += 1,
                    2 => m.nodes_with_2_siblings += 1,
                    3 => m.nodes_with_3_siblings += 1,
                    4 => m.nodes_with_4_siblings += 1,
                    _ => m.nodes_with_5_or_more_siblings += 1,
                }
            }
        }
    }

    m.nodes_with_child = parents.intersection(&names).count();
    m
}
