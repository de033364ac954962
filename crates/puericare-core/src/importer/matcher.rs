//! Practitioner resolution for imported rows.

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::models::Practitioner;

/// Minimum similarity before a near-miss is offered as a suggestion.
const SUGGESTION_FLOOR: f64 = 0.5;

/// How a row's practitioner reference was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchMethod {
    /// The row named a practitioner and a substring match found them.
    Named,
    /// No usable name, or no match: the first practitioner was assigned.
    /// When the row did name someone, `suggestion` carries the closest
    /// registered name by fuzzy similarity.
    Fallback { suggestion: Option<String> },
}

/// Outcome of resolving one row's practitioner reference.
#[derive(Debug, Clone, PartialEq)]
pub struct PractitionerMatch {
    pub practitioner_id: String,
    pub method: MatchMethod,
}

/// Resolve a row's free-text practitioner name.
///
/// The name matches case-insensitively as a substring of a registered
/// practitioner's name; the first match wins. Anything else falls back
/// to the first practitioner. The fuzzy suggestion never affects the
/// assignment. `practitioners` must be non-empty (the importer rejects
/// empty lists before resolving rows).
pub fn match_practitioner(
    raw_name: Option<&str>,
    practitioners: &[Practitioner],
) -> PractitionerMatch {
    let needle = raw_name
        .map(|name| name.trim().to_lowercase())
        .unwrap_or_default();

    if !needle.is_empty() {
        if let Some(hit) = practitioners
            .iter()
            .find(|p| p.name.to_lowercase().contains(&needle))
        {
            return PractitionerMatch {
                practitioner_id: hit.id.clone(),
                method: MatchMethod::Named,
            };
        }
    }

    let suggestion = if needle.is_empty() {
        None
    } else {
        closest_name(&needle, practitioners)
    };

    PractitionerMatch {
        practitioner_id: practitioners[0].id.clone(),
        method: MatchMethod::Fallback { suggestion },
    }
}

/// Best fuzzy match for an unmatched name, if any is close enough.
fn closest_name(needle: &str, practitioners: &[Practitioner]) -> Option<String> {
    practitioners
        .iter()
        .map(|p| (fuzzy_match(needle, &p.name.to_lowercase()), &p.name))
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .filter(|(score, _)| *score >= SUGGESTION_FLOOR)
        .map(|(_, name)| name.clone())
}

/// Combined similarity metric, weighted toward prefix agreement.
fn fuzzy_match(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}
