use approx::assert_relative_eq;
use pedigree_core::{PedigreeNode, RelationshipScheme};
use pedigree_metrics::{compute_extended_metrics, compute_metrics, ExtendedOptions};
use pedigree_scoring::{compare_documents, compare_nodes, score, CompareOptions, ScoreBand, Tier};
use serde_json::{json, Value};

fn nodes(value: Value) -> Vec<PedigreeNode> {
    serde_json::from_value(value).unwrap()
}

fn golden_ab() -> Value {
    json!([
        {"name": "A", "level": 0, "top_level": true, "sex": "M"},
        {"name": "B", "level": 1, "sex": "F", "father": "A"}
    ])
}

fn both_schemes() -> [CompareOptions; 2] {
    [
        CompareOptions {
            scheme: RelationshipScheme::SiblingDistribution,
            ..Default::default()
        },
        CompareOptions {
            scheme: RelationshipScheme::ParentPartnership,
            ..Default::default()
        },
    ]
}

#[test]
fn test_identical_graphs_score_100() {
    for options in both_schemes() {
        let c = compare_documents(&golden_ab(), &golden_ab(), &options).unwrap();
        assert_eq!(c.golden.extended.structural.generations_count, 2);
        assert_eq!(c.candidate.extended.structural.generations_count, 2);
        assert_eq!(c.score.tier1_deductions, 0.0);
        assert_eq!(c.score.tier2_deductions, 0.0);
        assert_eq!(c.score.tier3_deductions, 0.0);
        assert_eq!(c.score.final_score, 100.0);
        assert_eq!(c.score.band, ScoreBand::Excellent);
        assert!(c.score.is_perfect());
    }
}

#[test]
fn test_dropping_a_node_costs_points() {
    let candidate = json!([{"name": "A", "level": 0, "top_level": true, "sex": "M"}]);
    for options in both_schemes() {
        let c = compare_documents(&golden_ab(), &candidate, &options).unwrap();
        assert!(c.score.tier1_deductions > 0.0);
        assert!(c.score.final_score < 100.0);
        let female = c
            .score
            .items_for(Tier::Foundation)
            .find(|i| i.metric == "FEMALE")
            .unwrap();
        assert_eq!(female.difference, 1);
        assert_eq!(female.points, 5.0);
    }
}

#[test]
fn test_score_saturates_at_zero() {
    let golden: Vec<Value> = (0..60)
        .map(|i| {
            let sex = if i % 2 == 0 { "M" } else { "F" };
            let level = i % 6;
            json!({
                "name": format!("n{}", i),
                "sex": sex,
                "level": level,
                "top_level": level == 0,
                "partners": [format!("p{}", i)],
                "siblings": ["x", "y"],
                "status": 1,
                "shading": "filled"
            })
        })
        .collect();
    let golden = nodes(Value::Array(golden));
    let c = compare_nodes(&golden, &[], &CompareOptions::default());
    assert_eq!(c.score.final_score, 0.0);
    assert!(c.score.total_deductions > 100.0);
    assert_eq!(c.score.band, ScoreBand::Failing);
}

#[test]
fn test_extra_male_never_lowers_foundation_deduction() {
    let golden = nodes(golden_ab());
    let (gb, ge) = (compute_metrics(&golden), compute_extended_metrics(&golden));

    let mut candidate = golden.clone();
    let mut previous = 0.0;
    for i in 0..5 {
        let (cb, ce) = (compute_metrics(&candidate), compute_extended_metrics(&candidate));
        let s = score(&gb, &cb, &ge, &ce);
        assert!(s.tier1_deductions >= previous);
        assert!((0.0..=100.0).contains(&s.final_score));
        previous = s.tier1_deductions;
        candidate.push(nodes(json!([{"name": format!("m{}", i), "sex": "M", "level": 1}])).remove(0));
    }
}

#[test]
fn test_weighted_tiers_add_up_to_total() {
    let candidate = json!([
        {"name": "A", "level": 0, "top_level": true, "sex": "F", "siblings": ["Z"]},
        {"name": "B", "level": 2, "sex": "F", "dztwin": 1, "shading": "checkered"}
    ]);
    for options in both_schemes() {
        let c = compare_documents(&golden_ab(), &candidate, &options).unwrap();
        let s = &c.score;
        assert_relative_eq!(
            s.tier1_weighted + s.tier2_weighted + s.tier3_weighted,
            s.total_deductions,
            epsilon = 1e-9
        );
        assert_relative_eq!(s.final_score, (100.0 - s.total_deductions).max(0.0), epsilon = 1e-9);
        assert_eq!(s.scheme, options.scheme);
    }
}

#[test]
fn test_malformed_candidate_is_an_error() {
    let err = compare_documents(&golden_ab(), &json!({"image": "x.png"}), &CompareOptions::default());
    assert!(err.is_err());
}

#[test]
fn test_huge_levels_do_not_stall_scoring() {
    let options = CompareOptions::default();
    let candidate = nodes(json!([{"level": 1}]));
    for far in [400_000_000_i64, i64::MAX] {
        let golden = nodes(json!([{"level": 1}, {"level": far}]));
        let c = compare_nodes(&golden, &candidate, &options);
        // only the generation-count step is charged, the far level weighs nothing
        assert_eq!(c.score.items.len(), 1);
        assert_eq!(c.score.items[0].metric, "generations_count");
        assert_relative_eq!(c.score.final_score, 97.5, epsilon = 1e-9);
    }
}

#[test]
fn test_divorce_pairs_cost_one_point_under_parent_partnership() {
    let golden = json!([
        {"name": "A", "partners": ["B"], "divorced": ["B"]},
        {"name": "B", "partners": ["A"]}
    ]);
    let candidate = json!([
        {"name": "A", "partners": ["B"]},
        {"name": "B", "partners": ["A"]}
    ]);
    let [sibling, parent] = both_schemes();

    let c = compare_documents(&golden, &candidate, &parent).unwrap();
    assert_eq!(c.score.tier2_deductions, 1.0);
    assert_eq!(c.score.items.len(), 1);
    assert_eq!(c.score.items[0].metric, "divorces_count");
    assert_relative_eq!(c.score.total_deductions, 0.26, epsilon = 1e-12);

    let c = compare_documents(&golden, &candidate, &sibling).unwrap();
    assert!(c.score.is_perfect());
}

#[test]
fn test_diagnostics_never_change_the_score() {
    // asymmetric partner and sibling lists, a duplicate name and overlapping boxes
    let golden = json!([
        {"name": "A", "sex": "M", "partners": ["B"], "coordinates": [0, 0, 10, 10]},
        {"name": "B", "sex": "F", "coordinates": [5, 5, 15, 15]},
        {"name": "C", "sex": "F", "siblings": ["D"], "father": "A", "noparents": true},
        {"name": "C", "sex": "M", "level": 1}
    ]);
    let candidate = json!([
        {"name": "A", "sex": "M", "coordinates": [0, 0, 10, 10]},
        {"name": "B", "sex": "F", "partners": ["A"], "coordinates": [0, 0, 10, 10]},
        {"name": "D", "sex": "F", "siblings": ["C"]}
    ]);
    let quiet = |scheme: RelationshipScheme| CompareOptions {
        scheme,
        extended: ExtendedOptions { diagnostics: false },
    };

    for with_diagnostics in both_schemes() {
        let without = quiet(with_diagnostics.scheme);
        let on = compare_documents(&golden, &candidate, &with_diagnostics).unwrap();
        let off = compare_documents(&golden, &candidate, &without).unwrap();

        let checks = on.golden.extended.consistency_checks.as_ref().unwrap();
        assert!(!checks.is_clean());
        assert!(on.candidate.extended.spatial.as_ref().unwrap().overlapping_boxes_count > 0);
        assert!(off.golden.extended.consistency_checks.is_none());
        assert!(off.candidate.extended.spatial.is_none());

        assert_eq!(on.score, off.score);
        assert!(!on.score.is_perfect());
    }
}
