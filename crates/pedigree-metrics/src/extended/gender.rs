use pedigree_core::{PedigreeNode, Sex};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenderClass {
    Male,
    Female,
    Unknown,
    Miscarriage,
}

impl GenderClass {
    /// The miscarriage flag wins over the recorded sex.
    pub fn of(node: &PedigreeNode) -> Self {
        if node.miscarriage {
            return GenderClass::Miscarriage;
        }
        match node.sex {
            Sex::Male => GenderClass::Male,
            Sex::Female => GenderClass::Female,
            Sex::Unknown => GenderClass::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct GenderDistribution {
    pub male: usize,
    pub female: usize,
    pub unknown: usize,
    pub miscarriage: usize,
}

impl GenderDistribution {
    pub fn get(&self, class: GenderClass) -> usize {
        match class {
            GenderClass::Male => self.male,
            GenderClass::Female => self.female,
            GenderClass::Unknown => self.unknown,
            GenderClass::Miscarriage => self.miscarriage,
        }
    }

    /// Entries in report order.
    pub fn entries(&self) -> [(&'static str, usize); 4] {
        [
            ("FEMALE", self.female),
            ("MALE", self.male),
            ("MISCARRIAGE", self.miscarriage),
            ("UNKNOWN", self.unknown),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderAndNaming {
    pub gender_distribution: GenderDistribution,
}

pub(super) fn compute(nodes: &[PedigreeNode]) -> GenderAndNaming {
    let mut dist = GenderDistribution::default();
    for node in nodes {
        match GenderClass::of(node) {
            GenderClass::Male => dist.male += 1,
            GenderClass::Female => dist.female += 1,
            GenderClass::Unknown => dist.unknown += 1,
            GenderClass::Miscarriage => dist.miscarriage += 1,
        }
    }
    GenderAndNaming {
        gender_distribution: dist,
    }
}
