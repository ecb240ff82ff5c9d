use crate::value::{
    equals_one, int_like, list_len, name_like, name_list, number_array, string_or_list, truthy,
};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Recorded sex of a pedigree member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[default]
    #[serde(rename = "U")]
    Unknown,
}

impl Sex {
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("M") => Sex::Male,
            Some("F") => Sex::Female,
            _ => Sex::Unknown,
        }
    }
}

/// Generation key for per-level aggregates.
///
/// Numeric levels order ascending and `Unassigned` (no usable `level`) sorts
/// after every numeric level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LevelKey {
    Level(i64),
    Unassigned,
}

impl LevelKey {
    pub fn of(level: Option<i64>) -> Self {
        level.map_or(LevelKey::Unassigned, LevelKey::Level)
    }

    pub fn level(&self) -> Option<i64> {
        match self {
            LevelKey::Level(l) => Some(*l),
            LevelKey::Unassigned => None,
        }
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelKey::Level(l) => write!(f, "{}", l),
            LevelKey::Unassigned => f.write_str("none"),
        }
    }
}

impl Serialize for LevelKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Drawn symbol extent, corners in either order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn left(&self) -> f64 {
        self.x1.min(self.x2)
    }

    pub fn right(&self) -> f64 {
        self.x1.max(self.x2)
    }

    pub fn top(&self) -> f64 {
        self.y1.min(self.y2)
    }

    pub fn bottom(&self) -> f64 {
        self.y1.max(self.y2)
    }

    /// Touching edges count as overlap; boxes only miss when one lies
    /// strictly outside the other on some axis.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        !(self.right() < other.left()
            || other.right() < self.left()
            || self.bottom() < other.top()
            || other.bottom() < self.top())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One member of a pedigree.
///
/// Decoding never fails: each field falls back to its semantic default when
/// it is missing or has an unexpected shape. Relationships are name
/// references and are not required to resolve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct PedigreeNode {
    pub name: Option<String>,
    pub level: Option<i64>,
    pub top_level: bool,
    pub sex: Sex,
    pub miscarriage: bool,
    pub proband: bool,
    pub noparents: bool,
    pub adopted_in: bool,
    pub adopted_out: bool,
    pub status: Option<i64>,
    pub father: Option<String>,
    pub mother: Option<String>,
    /// The `father` key is present, whatever its value.
    pub has_father_key: bool,
    pub has_mother_key: bool,
    pub partners: Vec<String>,
    /// Length of the raw `partners` array before unusable entries are dropped.
    pub partners_len: usize,
    pub divorced: Vec<String>,
    pub siblings: Vec<String>,
    pub siblings_len: usize,
    pub shading: Vec<String>,
    pub dztwin: bool,
    pub mztwin: bool,
    pub coordinates: Option<BoundingBox>,
    pub center: Option<Point>,
}

impl PedigreeNode {
    pub fn from_value(value: &Value) -> Self {
        let get = |key: &str| value.get(key);
        Self {
            name: name_like(get("name")),
            level: int_like(get("level")),
            top_level: truthy(get("top_level")),
            sex: Sex::from_code(get("sex").and_then(Value::as_str)),
            miscarriage: truthy(get("miscarriage")),
            proband: truthy(get("proband")),
            noparents: truthy(get("noparents")),
            adopted_in: truthy(get("adopted_in")),
            adopted_out: truthy(get("adopted_out")),
            status: int_like(get("status")),
            father: name_like(get("father")),
            mother: name_like(get("mother")),
            has_father_key: get("father").is_some(),
            has_mother_key: get("mother").is_some(),
            partners: name_list(get("partners")),
            partners_len: list_len(get("partners")),
            divorced: name_list(get("divorced")),
            siblings: name_list(get("siblings")),
            siblings_len: list_len(get("siblings")),
            shading: string_or_list(get("shading")),
            dztwin: equals_one(get("dztwin")),
            mztwin: equals_one(get("mztwin")),
            coordinates: number_array::<4>(get("coordinates")).map(|[x1, y1, x2, y2]| {
                BoundingBox { x1, y1, x2, y2 }
            }),
            center: number_array::<2>(get("center")).map(|[x, y]| Point { x, y }),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_deceased(&self) -> bool {
        self.status == Some(1)
    }

    /// Number of parent references present (0..=2).
    pub fn parent_count(&self) -> usize {
        usize::from(self.father.is_some()) + usize::from(self.mother.is_some())
    }

    pub fn has_parents(&self) -> bool {
        self.parent_count() > 0
    }

    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.father.as_deref().into_iter().chain(self.mother.as_deref())
    }

    /// Whether this node contributes to the generation histogram. Level-0
    /// entries only count when flagged as a tree root; placeholder level-0
    /// records would otherwise inflate the top generation.
    pub fn counts_toward_generations(&self) -> bool {
        self.level != Some(0) || self.top_level
    }
}

impl From<Value> for PedigreeNode {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl From<&Value> for PedigreeNode {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}
