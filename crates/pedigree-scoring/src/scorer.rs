//! Tiered golden-vs-candidate deductions.
//!
//! Every deduction is `|golden - candidate| * points` for one metric,
//! accumulated into three tiers: foundation (generations, level population,
//! gender), relationships (one of two [`RelationshipScheme`]s) and attributes
//! (shading, scored symbols, twins). Tier totals are combined with the
//! scheme's own weights and subtracted from 100, saturating at 0.

use crate::weight::{generation_weight, total_levels};
use pedigree_core::{LevelKey, RelationshipScheme};
use pedigree_metrics::{BasicMetrics, ExtendedMetrics, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

pub const MAX_SCORE: f64 = 100.0;

const GENERATION_OFF_BY_ONE: f64 = 5.0;
const GENERATION_OFF_BY_MORE: f64 = 15.0;
const LEVEL_POPULATION_POINTS: f64 = 2.0;
const GENDER_POINTS: f64 = 5.0;
const MISCARRIAGE_POINTS: f64 = 1.0;

const SIBLING_SCHEME_POINTS: f64 = 4.0;
const PARENT_POINTS: f64 = 3.0;
const PARTNERSHIP_POINTS: f64 = 2.0;
const DIVORCE_POINTS: f64 = 1.0;

const DISEASE_POINTS: f64 = 1.0;
const SYMBOL_POINTS: f64 = 2.0;
const TWIN_POINTS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Foundation,
    Relationships,
    Attributes,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Foundation, Tier::Relationships, Tier::Attributes];

    pub fn number(&self) -> u8 {
        match self {
            Tier::Foundation => 1,
            Tier::Relationships => 2,
            Tier::Attributes => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Foundation => "Foundation",
            Tier::Relationships => "Relationships",
            Tier::Attributes => "Attributes",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {} ({})", self.number(), self.label())
    }
}

/// Combination weights for the three tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierWeights {
    pub foundation: f64,
    pub relationships: f64,
    pub attributes: f64,
}

impl TierWeights {
    pub fn for_scheme(scheme: RelationshipScheme) -> Self {
        match scheme {
            RelationshipScheme::SiblingDistribution => Self {
                foundation: 0.50,
                relationships: 0.40,
                attributes: 0.10,
            },
            RelationshipScheme::ParentPartnership => Self {
                foundation: 0.63,
                relationships: 0.26,
                attributes: 0.11,
            },
        }
    }

    pub fn get(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Foundation => self.foundation,
            Tier::Relationships => self.relationships,
            Tier::Attributes => self.attributes,
        }
    }
}

/// One non-zero term of a tier's deductions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionItem {
    pub tier: Tier,
    pub metric: String,
    /// Absolute golden/candidate difference.
    pub difference: usize,
    /// Unweighted points this difference costs.
    pub points: f64,
}

/// Interpretation of a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    Acceptable,
    Poor,
    Failing,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => ScoreBand::Excellent,
            s if s >= 80.0 => ScoreBand::Good,
            s if s >= 70.0 => ScoreBand::Acceptable,
            s if s >= 60.0 => ScoreBand::Poor,
            _ => ScoreBand::Failing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT",
            ScoreBand::Good => "GOOD",
            ScoreBand::Acceptable => "ACCEPTABLE",
            ScoreBand::Poor => "POOR",
            ScoreBand::Failing => "FAILING",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Minor issues only",
            ScoreBand::Good => "Some relationship/attribute errors",
            ScoreBand::Acceptable => "Foundation mostly correct",
            ScoreBand::Poor => "Significant structural problems",
            ScoreBand::Failing => "Major structural failures",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.as_str(), self.description())
    }
}

/// Result of one golden/candidate comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub final_score: f64,
    pub tier1_deductions: f64,
    pub tier2_deductions: f64,
    pub tier3_deductions: f64,
    pub total_deductions: f64,
    pub tier1_weighted: f64,
    pub tier2_weighted: f64,
    pub tier3_weighted: f64,
    pub scheme: RelationshipScheme,
    pub band: ScoreBand,
    pub items: Vec<DeductionItem>,
}

impl ScoreBreakdown {
    pub fn deductions(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Foundation => self.tier1_deductions,
            Tier::Relationships => self.tier2_deductions,
            Tier::Attributes => self.tier3_deductions,
        }
    }

    pub fn weighted(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Foundation => self.tier1_weighted,
            Tier::Relationships => self.tier2_weighted,
            Tier::Attributes => self.tier3_weighted,
        }
    }

    pub fn items_for(&self, tier: Tier) -> impl Iterator<Item = &DeductionItem> {
        self.items.iter().filter(move |item| item.tier == tier)
    }

    pub fn is_perfect(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Default)]
struct Ledger {
    items: Vec<DeductionItem>,
}

impl Ledger {
    fn charge(&mut self, tier: Tier, metric: impl Into<String>, difference: usize, points: f64) {
        if points > 0.0 {
            self.items.push(DeductionItem {
                tier,
                metric: metric.into(),
                difference,
                points,
            });
        }
    }

    fn per_unit(
        &mut self,
        tier: Tier,
        metric: impl Into<String>,
        golden: usize,
        candidate: usize,
        unit: f64,
    ) {
        let difference = golden.abs_diff(candidate);
        self.charge(tier, metric, difference, difference as f64 * unit);
    }

    fn total(&self, tier: Tier) -> f64 {
        self.items
            .iter()
            .filter(|item| item.tier == tier)
            .map(|item| item.points)
            .sum()
    }
}

/// Scores candidates against goldens under one relationship scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scorer {
    scheme: RelationshipScheme,
}

impl Scorer {
    pub fn new(scheme: RelationshipScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> RelationshipScheme {
        self.scheme
    }

    pub fn weights(&self) -> TierWeights {
        TierWeights::for_scheme(self.scheme)
    }

    pub fn score(
        &self,
        golden: &BasicMetrics,
        candidate: &BasicMetrics,
        golden_ext: &ExtendedMetrics,
        candidate_ext: &ExtendedMetrics,
    ) -> ScoreBreakdown {
        let mut ledger = Ledger::default();
        foundation(&mut ledger, golden_ext, candidate_ext);
        match self.scheme {
            RelationshipScheme::SiblingDistribution => {
                sibling_distribution(&mut ledger, golden, candidate)
            }
            RelationshipScheme::ParentPartnership => {
                parent_partnership(&mut ledger, golden, candidate, golden_ext, candidate_ext)
            }
        }
        attributes(&mut ledger, golden_ext, candidate_ext);

        let weights = self.weights();
        let tier1 = ledger.total(Tier::Foundation);
        let tier2 = ledger.total(Tier::Relationships);
        let tier3 = ledger.total(Tier::Attributes);
        let tier1_weighted = tier1 * weights.foundation;
        let tier2_weighted = tier2 * weights.relationships;
        let tier3_weighted = tier3 * weights.attributes;
        let total_deductions = tier1_weighted + tier2_weighted + tier3_weighted;
        let final_score = (MAX_SCORE - total_deductions).max(0.0);

        debug!(
            scheme = self.scheme.as_str(),
            tier1, tier2, tier3, final_score, "scored comparison"
        );

        ScoreBreakdown {
            final_score,
            tier1_deductions: tier1,
            tier2_deductions: tier2,
            tier3_deductions: tier3,
            total_deductions,
            tier1_weighted,
            tier2_weighted,
            tier3_weighted,
            scheme: self.scheme,
            band: ScoreBand::from_score(final_score),
            items: ledger.items,
        }
    }
}

/// Score with the default relationship scheme.
pub fn score(
    golden: &BasicMetrics,
    candidate: &BasicMetrics,
    golden_ext: &ExtendedMetrics,
    candidate_ext: &ExtendedMetrics,
) -> ScoreBreakdown {
    Scorer::default().score(golden, candidate, golden_ext, candidate_ext)
}

fn foundation(ledger: &mut Ledger, golden: &ExtendedMetrics, candidate: &ExtendedMetrics) {
    let tier = Tier::Foundation;
    let (gs, cs) = (&golden.structural, &candidate.structural);

    let generation_diff = gs.generations_count.abs_diff(cs.generations_count);
    let generation_points = match generation_diff {
        0 => 0.0,
        1 => GENERATION_OFF_BY_ONE,
        _ => GENERATION_OFF_BY_MORE,
    };
    ledger.charge(tier, "generations_count", generation_diff, generation_points);

    let levels: BTreeSet<LevelKey> = gs
        .nodes_per_level
        .keys()
        .chain(cs.nodes_per_level.keys())
        .copied()
        .collect();
    let total = total_levels(&levels);
    for key in &levels {
        let Some(level) = key.level().filter(|l| *l >= 0) else {
            continue;
        };
        let difference = gs.count_at(*key).abs_diff(cs.count_at(*key));
        let points = difference as f64 * generation_weight(level, total) * LEVEL_POPULATION_POINTS;
        ledger.charge(tier, format!("nodes_at_level_{}", level), difference, points);
    }

    let (gg, cg) = (
        &golden.gender_and_naming.gender_distribution,
        &candidate.gender_and_naming.gender_distribution,
    );
    ledger.per_unit(tier, "MALE", gg.male, cg.male, GENDER_POINTS);
    ledger.per_unit(tier, "FEMALE", gg.female, cg.female, GENDER_POINTS);
    ledger.per_unit(tier, "MISCARRIAGE", gg.miscarriage, cg.miscarriage, MISCARRIAGE_POINTS);
}

fn sibling_distribution(ledger: &mut Ledger, golden: &BasicMetrics, candidate: &BasicMetrics) {
    let tier = Tier::Relationships;
    let pairs = [
        (
            "nodes_with_no_parents_true",
            golden.nodes_with_no_parents_true,
            candidate.nodes_with_no_parents_true,
        ),
        (
            "nodes_with_one_partner",
            golden.nodes_with_one_partner,
            candidate.nodes_with_one_partner,
        ),
        (
            "nodes_with_multiple_partners",
            golden.nodes_with_multiple_partners,
            candidate.nodes_with_multiple_partners,
        ),
        (
            "nodes_with_siblings",
            golden.nodes_with_siblings,
            candidate.nodes_with_siblings,
        ),
    ];
    for (metric, g, c) in pairs {
        ledger.per_unit(tier, metric, g, c, SIBLING_SCHEME_POINTS);
    }

    const BUCKETS: [&str; 5] = [
        "nodes_with_1_sibling",
        "nodes_with_2_siblings",
        "nodes_with_3_siblings",
        "nodes_with_4_siblings",
        "nodes_with_5_or_more_siblings",
    ];
    let buckets = golden.sibling_buckets().into_iter().zip(candidate.sibling_buckets());
    for (metric, (g, c)) in BUCKETS.into_iter().zip(buckets) {
        ledger.per_unit(tier, metric, g, c, SIBLING_SCHEME_POINTS);
    }
}

fn parent_partnership(
    ledger: &mut Ledger,
    golden: &BasicMetrics,
    candidate: &BasicMetrics,
    golden_ext: &ExtendedMetrics,
    candidate_ext: &ExtendedMetrics,
) {
    let tier = Tier::Relationships;
    ledger.per_unit(
        tier,
        "nodes_with_mother",
        golden.nodes_with_mother,
        candidate.nodes_with_mother,
        PARENT_POINTS,
    );
    ledger.per_unit(
        tier,
        "nodes_with_father",
        golden.nodes_with_father,
        candidate.nodes_with_father,
        PARENT_POINTS,
    );

    let (gp, cp) = (&golden_ext.partnerships, &candidate_ext.partnerships);
    ledger.per_unit(
        tier,
        "partnerships_count",
        gp.partnerships_count,
        cp.partnerships_count,
        PARTNERSHIP_POINTS,
    );
    ledger.per_unit(
        tier,
        "divorces_count",
        gp.divorces_count,
        cp.divorces_count,
        DIVORCE_POINTS,
    );
}

fn attributes(ledger: &mut Ledger, golden: &ExtendedMetrics, candidate: &ExtendedMetrics) {
    let tier = Tier::Attributes;

    let patterns: BTreeSet<&str> = golden
        .shading
        .disease_counts
        .keys()
        .chain(candidate.shading.disease_counts.keys())
        .map(String::as_str)
        .collect();
    for pattern in patterns {
        ledger.per_unit(
            tier,
            pattern,
            golden.shading.count(pattern),
            candidate.shading.count(pattern),
            DISEASE_POINTS,
        );
    }

    for symbol in Symbol::SCORED {
        ledger.per_unit(
            tier,
            symbol.as_str(),
            golden.symbols.count(symbol),
            candidate.symbols.count(symbol),
            SYMBOL_POINTS,
        );
    }

    ledger.per_unit(
        tier,
        "dztwin_count",
        golden.edges.dztwin_count,
        candidate.edges.dztwin_count,
        TWIN_POINTS,
    );
    ledger.per_unit(
        tier,
        "mztwin_count",
        golden.edges.mztwin_count,
        candidate.edges.mztwin_count,
        TWIN_POINTS,
    );
}
