use pedigree_core::{BoundingBox, LevelKey, PedigreeNode};
use serde::Serialize;
use std::collections::BTreeMap;

/// Extents over every node with a bounding box; `None` when no node has one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CanvasBounds {
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
}

impl CanvasBounds {
    fn include(&mut self, bbox: &BoundingBox) {
        fn widen(slot: &mut Option<f64>, value: f64, pick: fn(f64, f64) -> f64) {
            *slot = Some(slot.map_or(value, |current| pick(current, value)));
        }
        widen(&mut self.min_x, bbox.left(), f64::min);
        widen(&mut self.max_x, bbox.right(), f64::max);
        widen(&mut self.min_y, bbox.top(), f64::min);
        widen(&mut self.max_y, bbox.bottom(), f64::max);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spatial {
    pub canvas_bounds: CanvasBounds,
    pub avg_center_y_per_level: BTreeMap<LevelKey, f64>,
    pub overlapping_boxes_count: usize,
    pub overlapping_pairs: Vec<(Option<String>, Option<String>)>,
}

pub(super) fn compute(nodes: &[PedigreeNode]) -> Spatial {
    let boxed: Vec<(&PedigreeNode, &BoundingBox)> = nodes
        .iter()
        .filter_map(|n| n.coordinates.as_ref().map(|bbox| (n, bbox)))
        .collect();

    let mut canvas_bounds = CanvasBounds::default();
    for (_, bbox) in &boxed {
        canvas_bounds.include(bbox);
    }

    let mut center_ys: BTreeMap<LevelKey, (f64, usize)> = BTreeMap::new();
    for node in nodes {
        if let Some(center) = node.center {
            let slot = center_ys.entry(LevelKey::of(node.level)).or_default();
            slot.0 += center.y;
            slot.1 += 1;
        }
    }
    let avg_center_y_per_level = center_ys
        .into_iter()
        .map(|(level, (sum, count))| (level, sum / count as f64))
        .collect();

    let mut overlapping_pairs = Vec::new();
    for (i, (a, abox)) in boxed.iter().enumerate() {
        for (b, bbox) in &boxed[i + 1..] {
            if abox.overlaps(bbox) {
                overlapping_pairs.push((a.name.clone(), b.name.clone()));
            }
        }
    }

    Spatial {
        canvas_bounds,
        avg_center_y_per_level,
        overlapping_boxes_count: overlapping_pairs.len(),
        overlapping_pairs,
    }
}
