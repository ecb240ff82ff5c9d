use crate::index::PedigreeIndex;
use serde::Serialize;

/// Free-text findings for human review. Not scored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyChecks {
    pub self_references: Vec<String>,
    pub duplicate_names: Vec<String>,
    pub contradictions: Vec<String>,
    pub partner_asymmetry: Vec<String>,
    pub sibling_asymmetry: Vec<String>,
}

impl ConsistencyChecks {
    pub fn issue_count(&self) -> usize {
        self.self_references.len()
            + self.duplicate_names.len()
            + self.contradictions.len()
            + self.partner_asymmetry.len()
            + self.sibling_asymmetry.len()
    }

    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }
}

pub(super) fn compute(index: &PedigreeIndex<'_>) -> ConsistencyChecks {
    let mut checks = ConsistencyChecks::default();

    for (name, count) in index.duplicate_names() {
        checks
            .duplicate_names
            .push(format!("Duplicate name '{}' appears {} times", name, count));
    }

    for node in index.nodes() {
        let label = node.name().unwrap_or("<unnamed>");
        if let Some(name) = node.name() {
            let roles = [
                ("father", node.father.as_deref() == Some(name)),
                ("mother", node.mother.as_deref() == Some(name)),
                ("partner", node.partners.iter().any(|p| p == name)),
                ("sibling", node.siblings.iter().any(|s| s == name)),
            ];
            for (role, hit) in roles {
                if hit {
                    checks
                        .self_references
                        .push(format!("{}: self-referenced as {}", name, role));
                }
            }
        }
        if node.has_parents() {
            if node.noparents {
                checks
                    .contradictions
                    .push(format!("{}: noparents==true but has parents listed", label));
            }
            if node.top_level {
                checks
                    .contradictions
                    .push(format!("{}: top_level==true but has parents listed", label));
            }
        }
    }

    for (a, partners) in index.partner_sets() {
        for b in partners {
            let reciprocated = index.partners_of(b).is_some_and(|back| back.contains(a));
            if !reciprocated {
                checks.partner_asymmetry.push(format!(
                    "Partner asymmetry: {} lists {}, but not vice versa",
                    a, b
                ));
            }
        }
    }

    for (a, siblings) in index.sibling_sets() {
        for b in siblings {
            let reciprocated = index.siblings_of(b).is_some_and(|back| back.contains(a));
            if !reciprocated {
                checks.sibling_asymmetry.push(format!(
                    "Sibling asymmetry: {} lists {}, but not vice versa",
                    a, b
                ));
            }
        }
    }

    checks
}
