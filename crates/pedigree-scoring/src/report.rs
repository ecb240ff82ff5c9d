//! Spreadsheet-style report sheets built from a [`Comparison`].
//!
//! Sheets are plain data: renderers decide whether they become console
//! tables, JSON or a workbook file.

use crate::pipeline::Comparison;
use crate::scorer::Tier;
use pedigree_core::LevelKey;
use pedigree_metrics::{Symbol, DISEASE_PATTERNS};
use serde::Serialize;
use std::collections::BTreeSet;

pub const SUMMARY_HEADERS: [&str; 3] = ["Metric", "Value", "Details"];
pub const COMPARE_HEADERS: [&str; 4] = ["Metric", "Golden", "Candidate", "Difference"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportRow {
    Summary {
        metric: String,
        value: String,
        details: String,
    },
    Compare {
        metric: String,
        golden: usize,
        candidate: usize,
        difference: usize,
    },
}

impl ReportRow {
    pub fn summary(metric: impl Into<String>, value: String, details: impl Into<String>) -> Self {
        ReportRow::Summary {
            metric: metric.into(),
            value,
            details: details.into(),
        }
    }

    pub fn compare(metric: impl Into<String>, golden: usize, candidate: usize) -> Self {
        ReportRow::Compare {
            metric: metric.into(),
            golden,
            candidate,
            difference: golden.abs_diff(candidate),
        }
    }

    pub fn metric(&self) -> &str {
        match self {
            ReportRow::Summary { metric, .. } | ReportRow::Compare { metric, .. } => metric,
        }
    }

    pub fn cells(&self) -> Vec<String> {
        match self {
            ReportRow::Summary {
                metric,
                value,
                details,
            } => vec![metric.clone(), value.clone(), details.clone()],
            ReportRow::Compare {
                metric,
                golden,
                candidate,
                difference,
            } => vec![
                metric.clone(),
                golden.to_string(),
                candidate.to_string(),
                difference.to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSheet {
    pub name: &'static str,
    pub rows: Vec<ReportRow>,
}

impl ReportSheet {
    pub fn headers(&self) -> &'static [&'static str] {
        match self.rows.first() {
            Some(ReportRow::Summary { .. }) => &SUMMARY_HEADERS,
            _ => &COMPARE_HEADERS,
        }
    }

    pub fn row(&self, metric: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|r| r.metric() == metric)
    }
}

/// All sheets plus the raw comparison, for export.
#[derive(Debug, Serialize)]
pub struct Workbook<'a> {
    pub sheets: Vec<ReportSheet>,
    pub comparison: &'a Comparison,
}

impl<'a> Workbook<'a> {
    pub fn new(comparison: &'a Comparison) -> Self {
        Self {
            sheets: build_sheets(comparison),
            comparison,
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&ReportSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// `nodes_with_1_sibling` -> `Nodes With 1 Sibling`.
fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn tier_details(tier: Tier) -> &'static str {
    match tier {
        Tier::Foundation => "Generation structure + Node detection",
        Tier::Relationships => "Family connections + Partnerships",
        Tier::Attributes => "Symbols + Diseases + Twins",
    }
}

pub fn score_summary(comparison: &Comparison) -> ReportSheet {
    let score = &comparison.score;
    let mut rows = vec![
        ReportRow::summary(
            "Final Score",
            format!("{:.1}/100", score.final_score),
            score.band.to_string(),
        ),
        ReportRow::summary(
            "Relationship Scheme",
            score.scheme.as_str().to_string(),
            "",
        ),
    ];
    for tier in Tier::ALL {
        rows.push(ReportRow::summary(
            tier.to_string(),
            format!("-{:.1} pts", score.weighted(tier)),
            tier_details(tier),
        ));
    }
    rows.push(ReportRow::summary(
        "Total Deductions",
        format!("-{:.1} pts", score.total_deductions),
        "Sum of all penalties",
    ));
    ReportSheet {
        name: "Score Summary",
        rows,
    }
}

pub fn generation_sheet(comparison: &Comparison) -> ReportSheet {
    let (g, c) = (
        &comparison.golden.extended.structural,
        &comparison.candidate.extended.structural,
    );
    let mut rows = vec![ReportRow::compare(
        "Generations Count",
        g.generations_count,
        c.generations_count,
    )];
    let levels: BTreeSet<LevelKey> = g
        .nodes_per_level
        .keys()
        .chain(c.nodes_per_level.keys())
        .copied()
        .collect();
    for level in levels {
        rows.push(ReportRow::compare(
            format!("Nodes at level {}", level),
            g.count_at(level),
            c.count_at(level),
        ));
    }
    ReportSheet {
        name: "Generation",
        rows,
    }
}

pub fn nodes_sheet(comparison: &Comparison) -> ReportSheet {
    let (gb, cb) = (&comparison.golden.basic, &comparison.candidate.basic);
    let mut rows: Vec<ReportRow> = gb
        .counters()
        .into_iter()
        .zip(cb.counters())
        .map(|((key, g), (_, c))| ReportRow::compare(title_case(key), g, c))
        .collect();

    let gg = comparison.golden.extended.gender_and_naming.gender_distribution;
    let cg = comparison.candidate.extended.gender_and_naming.gender_distribution;
    rows.extend(
        gg.entries()
            .into_iter()
            .zip(cg.entries())
            .map(|((class, g), (_, c))| ReportRow::compare(class, g, c)),
    );
    ReportSheet {
        name: "Nodes",
        rows,
    }
}

pub fn diseases_sheet(comparison: &Comparison) -> ReportSheet {
    let (g, c) = (
        &comparison.golden.extended.shading,
        &comparison.candidate.extended.shading,
    );
    let mut rows = vec![ReportRow::compare(
        "Total Nodes With Disease/Shading",
        g.total(),
        c.total(),
    )];
    let mut patterns = DISEASE_PATTERNS;
    patterns.sort_unstable();
    rows.extend(
        patterns
            .iter()
            .map(|p| ReportRow::compare(*p, g.count(p), c.count(p))),
    );
    ReportSheet {
        name: "Diseases",
        rows,
    }
}

pub fn symbols_sheet(comparison: &Comparison) -> ReportSheet {
    let (g, c) = (
        &comparison.golden.extended.symbols,
        &comparison.candidate.extended.symbols,
    );
    ReportSheet {
        name: "Symbols",
        rows: Symbol::ALL
            .iter()
            .map(|s| ReportRow::compare(s.as_str(), g.count(*s), c.count(*s)))
            .collect(),
    }
}

pub fn edges_sheet(comparison: &Comparison) -> ReportSheet {
    let (g, c) = (
        &comparison.golden.extended.edges,
        &comparison.candidate.extended.edges,
    );
    ReportSheet {
        name: "Edges",
        rows: vec![
            ReportRow::compare("DZ Twin (Dizygotic) Count", g.dztwin_count, c.dztwin_count),
            ReportRow::compare("MZ Twin (Monozygotic) Count", g.mztwin_count, c.mztwin_count),
        ],
    }
}

pub fn build_sheets(comparison: &Comparison) -> Vec<ReportSheet> {
    vec![
        score_summary(comparison),
        generation_sheet(comparison),
        nodes_sheet(comparison),
        diseases_sheet(comparison),
        symbols_sheet(comparison),
        edges_sheet(comparison),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{compare_nodes, CompareOptions};
    use pedigree_core::PedigreeNode;
    use serde_json::json;

    fn comparison() -> Comparison {
        let golden: Vec<PedigreeNode> = serde_json::from_value(json!([
            {"name": "A", "sex": "M", "level": 0, "top_level": true, "shading": "filled"},
            {"name": "B", "sex": "F", "level": 1, "father": "A", "mztwin": 1}
        ]))
        .unwrap();
        let candidate: Vec<PedigreeNode> = serde_json::from_value(json!([
            {"name": "A", "sex": "M", "level": 0, "top_level": true}
        ]))
        .unwrap();
        compare_nodes(&golden, &candidate, &CompareOptions::default())
    }

    #[test]
    fn title_cases_counter_keys() {
        assert_eq!(title_case("nodes_with_1_sibling"), "Nodes With 1 Sibling");
        assert_eq!(title_case("total_nodes"), "Total Nodes");
    }

    #[test]
    fn builds_all_sheets_in_order() {
        let c = comparison();
        let names: Vec<_> = build_sheets(&c).iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            ["Score Summary", "Generation", "Nodes", "Diseases", "Symbols", "Edges"]
        );
    }

    #[test]
    fn zero_fills_vocabularies() {
        let c = comparison();
        let diseases = diseases_sheet(&c);
        assert_eq!(diseases.rows.len(), 29);
        assert_eq!(
            diseases.row("SQUARE_FILLED"),
            Some(&ReportRow::compare("SQUARE_FILLED", 1, 0))
        );
        assert_eq!(
            diseases.row("CIRCLE_CHECKERED"),
            Some(&ReportRow::compare("CIRCLE_CHECKERED", 0, 0))
        );
        assert_eq!(symbols_sheet(&c).rows.len(), 6);
        assert_eq!(edges_sheet(&c).rows[1].cells(), vec!["MZ Twin (Monozygotic) Count", "1", "0", "1"]);
    }

    #[test]
    fn summary_formats_score_and_deductions() {
        let c = comparison();
        let sheet = score_summary(&c);
        assert_eq!(sheet.headers(), &SUMMARY_HEADERS);
        let ReportRow::Summary { value, .. } = &sheet.rows[0] else {
            panic!("summary row expected");
        };
        assert_eq!(value, &format!("{:.1}/100", c.score.final_score));
        let total = sheet.row("Total Deductions").unwrap().cells();
        assert_eq!(total[1], format!("-{:.1} pts", c.score.total_deductions));
        assert!(sheet.row("Tier 2 (Relationships)").is_some());
    }

    #[test]
    fn generation_and_nodes_rows() {
        let c = comparison();
        let generation = generation_sheet(&c);
        assert_eq!(generation.headers(), &COMPARE_HEADERS);
        assert_eq!(
            generation.row("Nodes at level 1"),
            Some(&ReportRow::compare("Nodes at level 1", 1, 0))
        );
        let nodes = nodes_sheet(&c);
        assert_eq!(nodes.rows.len(), 15 + 4);
        assert_eq!(nodes.row("FEMALE"), Some(&ReportRow::compare("FEMALE", 1, 0)));
        assert_eq!(nodes.row("Total Nodes"), Some(&ReportRow::compare("Total Nodes", 2, 1)));
    }

    #[test]
    fn workbook_serializes_sheets_and_comparison() {
        let c = comparison();
        let value = serde_json::to_value(Workbook::new(&c)).unwrap();
        assert_eq!(value["sheets"].as_array().unwrap().len(), 6);
        assert_eq!(value["sheets"][0]["rows"][0]["metric"], "Final Score");
        assert!(value["comparison"]["score"]["final_score"].is_number());
    }
}
