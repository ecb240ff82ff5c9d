//! Fixed symbol and shading vocabularies.

use once_cell::sync::Lazy;
use pedigree_core::Sex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Shading patterns the detector can emit. Only these are counted.
pub const DISEASE_PATTERNS: [&str; 28] = [
    "CIRCLE_BOTTOM_HALF_FILLED",
    "CIRCLE_CHECKERED",
    "CIRCLE_CROSS_FILLED",
    "CIRCLE_DIAGONAL_CHECKERED",
    "CIRCLE_DIAGONAL_STROKES",
    "CIRCLE_FILLED",
    "CIRCLE_HORIZONTAL_STROKES",
    "CIRCLE_LEFT_HALF_FILLED",
    "CIRCLE_RIGHT_HALF_FILLED",
    "CIRCLE_TOP_HALF_FILLED",
    "CIRCLE_TOP_HALF_STROKES",
    "CIRCLE_TOP_LEFT_QUARTER_FILLED",
    "CIRCLE_TOP_RIGHT_QUARTER_FILLED",
    "CIRCLE_VERTICAL_STROKES",
    "SQUARE_BOTTOM_HALF_FILLED",
    "SQUARE_CHECKERED",
    "SQUARE_CROSS_FILLED",
    "SQUARE_DIAGONAL_CHECKERED",
    "SQUARE_DIAGONAL_STROKES",
    "SQUARE_FILLED",
    "SQUARE_HORIZONTAL_STROKES",
    "SQUARE_LEFT_HALF_FILLED",
    "SQUARE_RIGHT_HALF_FILLED",
    "SQUARE_TOP_HALF_FILLED",
    "SQUARE_TOP_HALF_STROKES",
    "SQUARE_TOP_LEFT_QUARTER_FILLED",
    "SQUARE_TOP_RIGHT_QUARTER_FILLED",
    "SQUARE_VERTICAL_STROKES",
];

static DISEASE_PATTERN_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DISEASE_PATTERNS.iter().copied().collect());

/// Older detector output spelled the male half-fills without `HALF`.
const LEGACY_ALIASES: [(&str, &str); 2] = [
    ("SQUARE_LEFT_FILLED", "SQUARE_LEFT_HALF_FILLED"),
    ("SQUARE_RIGHT_FILLED", "SQUARE_RIGHT_HALF_FILLED"),
];

/// The vocabulary entry a token counts as, resolving legacy spellings.
pub fn canonical_pattern(token: &str) -> Option<&'static str> {
    DISEASE_PATTERN_SET.get(token).copied().or_else(|| {
        LEGACY_ALIASES
            .iter()
            .find(|(legacy, _)| *legacy == token)
            .map(|(_, canonical)| *canonical)
    })
}

/// Pedigree symbol annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(rename = "Adopted_in")]
    AdoptedIn,
    #[serde(rename = "Adopted_out")]
    AdoptedOut,
    Carrier,
    Deceased,
    Divorce,
    Patient,
}

impl Symbol {
    pub const ALL: [Symbol; 6] = [
        Symbol::AdoptedIn,
        Symbol::AdoptedOut,
        Symbol::Carrier,
        Symbol::Deceased,
        Symbol::Divorce,
        Symbol::Patient,
    ];

    /// Symbols that contribute to the attribute tier of the score.
    pub const SCORED: [Symbol; 3] = [Symbol::Deceased, Symbol::AdoptedIn, Symbol::AdoptedOut];

    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::AdoptedIn => "Adopted_in",
            Symbol::AdoptedOut => "Adopted_out",
            Symbol::Carrier => "Carrier",
            Symbol::Deceased => "Deceased",
            Symbol::Divorce => "Divorce",
            Symbol::Patient => "Patient",
        }
    }
}

/// Symbol outline implied by sex: squares for males, circles for females.
pub fn shape_for(sex: Sex) -> Option<&'static str> {
    match sex {
        Sex::Male => Some("SQUARE"),
        Sex::Female => Some("CIRCLE"),
        Sex::Unknown => None,
    }
}

/// Build the candidate token for a shading string, e.g. `"cross-hatch"` on
/// a male node becomes `SQUARE_CROSS_HATCH`. The token may still fall
/// outside the recognized vocabulary.
pub fn shading_token(shape: &str, raw: &str) -> String {
    let trimmed = raw.trim();
    let without_suffix = match trimmed.len().checked_sub(" female".len()) {
        Some(cut)
            if trimmed.is_char_boundary(cut)
                && trimmed[cut..].eq_ignore_ascii_case(" female") =>
        {
            &trimmed[..cut]
        }
        _ => trimmed,
    };
    let pattern: String = without_suffix
        .to_uppercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect();
    format!("{}_{}", shape, pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_is_symmetric_between_shapes() {
        let circles: Vec<_> = DISEASE_PATTERNS
            .iter()
            .filter_map(|p| p.strip_prefix("CIRCLE_"))
            .collect();
        let squares: Vec<_> = DISEASE_PATTERNS
            .iter()
            .filter_map(|p| p.strip_prefix("SQUARE_"))
            .collect();
        assert_eq!(circles.len(), 14);
        assert_eq!(circles, squares);
    }

    #[test]
    fn shading_normalization_is_format_insensitive() {
        for raw in ["cross-hatch", "CROSS_HATCH", "cross hatch", " Cross-Hatch "] {
            assert_eq!(shading_token("SQUARE", raw), "SQUARE_CROSS_HATCH");
        }
        assert_eq!(canonical_pattern("SQUARE_CROSS_HATCH"), None);
    }

    #[test]
    fn female_suffix_is_stripped() {
        assert_eq!(shading_token("CIRCLE", "left-half-filled female"), "CIRCLE_LEFT_HALF_FILLED");
        assert!(canonical_pattern(&shading_token("CIRCLE", "filled female")).is_some());
    }

    #[test]
    fn legacy_square_half_fills_resolve_to_vocabulary() {
        assert_eq!(
            canonical_pattern(&shading_token("SQUARE", "left-filled")),
            Some("SQUARE_LEFT_HALF_FILLED")
        );
        assert_eq!(canonical_pattern("SQUARE_RIGHT_FILLED"), Some("SQUARE_RIGHT_HALF_FILLED"));
        assert_eq!(canonical_pattern("SQUARE_FILLED"), Some("SQUARE_FILLED"));
        assert_eq!(canonical_pattern("CIRCLE_LEFT_FILLED"), None);
    }

    #[test]
    fn symbols_serialize_with_report_names() {
        let names: Vec<_> = Symbol::ALL.iter().map(Symbol::as_str).collect();
        assert_eq!(
            names,
            ["Adopted_in", "Adopted_out", "Carrier", "Deceased", "Divorce", "Patient"]
        );
        assert_eq!(serde_json::to_string(&Symbol::AdoptedIn).unwrap(), "\"Adopted_in\"");
    }
}
