use crate::vocab::{canonical_pattern, shading_token, shape_for, DISEASE_PATTERNS};
use pedigree_core::PedigreeNode;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Shading {
    /// Recognized `SHAPE_PATTERN` tokens with a non-zero count.
    pub disease_counts: BTreeMap<String, usize>,
}

impl Shading {
    pub fn count(&self, pattern: &str) -> usize {
        self.disease_counts.get(pattern).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.disease_counts.values().sum()
    }

    /// Every vocabulary pattern with its count, zero-filled.
    pub fn all_patterns(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        DISEASE_PATTERNS.iter().map(move |p| (*p, self.count(p)))
    }
}

pub(super) fn compute(nodes: &[PedigreeNode]) -> Shading {
    let mut disease_counts: BTreeMap<String, usize> = BTreeMap::new();
    for node in nodes.iter().filter(|n| !n.miscarriage && !n.shading.is_empty()) {
        let Some(shape) = shape_for(node.sex) else {
            continue;
        };
        for raw in &node.shading {
            if let Some(pattern) = canonical_pattern(&shading_token(shape, raw)) {
                *disease_counts.entry(pattern.to_owned()).or_default() += 1;
            }
        }
    }
    Shading { disease_counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_recognized_patterns_by_shape() {
        let nodes: Vec<PedigreeNode> = serde_json::from_value(json!([
            {"sex": "M", "shading": "filled"},
            {"sex": "F", "shading": ["filled", "left-half-filled female", "polka-dots"]},
            {"sex": "F", "shading": "filled", "miscarriage": true},
            {"shading": "filled"},
            {"sex": "M", "shading": ["TOP HALF STROKES"]},
            {"sex": "M", "shading": "left-filled"}
        ]))
        .unwrap();
        let s = compute(&nodes);
        assert_eq!(s.count("SQUARE_FILLED"), 1);
        assert_eq!(s.count("CIRCLE_FILLED"), 1);
        assert_eq!(s.count("CIRCLE_LEFT_HALF_FILLED"), 1);
        assert_eq!(s.count("SQUARE_TOP_HALF_STROKES"), 1);
        assert_eq!(s.count("SQUARE_LEFT_HALF_FILLED"), 1);
        assert_eq!(s.total(), 5);
        assert_eq!(s.all_patterns().count(), 28);
    }
}
