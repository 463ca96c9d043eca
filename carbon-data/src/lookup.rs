//! Product carbon-footprint lookup with tiered fuzzy matching.
//!
//! Emission factors are kilograms of CO2-equivalent per declared unit,
//! extracted from the Carbon Catalogue product dataset. The table is
//! embedded at compile time and parsed once; it is never mutated at
//! runtime.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Products at or above this many kg CO2e per unit are not considered
/// eco-friendly. The comparison is strict: exactly 5.0 fails.
pub const ECO_FRIENDLY_THRESHOLD: f64 = 5.0;

/// Known carbon cost of one product or product category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmissionRecord {
    /// Kilograms of CO2-equivalent per declared unit.
    pub co2e: f64,
    /// Measurement basis ("kg", "item", "liter", ...). Units are not
    /// convertible between records.
    pub unit: String,
    /// Display-only grouping label.
    pub category: String,
    /// Lower-impact substitutes, ordered by presentation priority.
    pub alternatives: Vec<String>,
}

/// Outcome of a single [`search`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    /// Whether a table entry matched with confidence.
    pub found: bool,
    /// The matched table key, or the original query when unmatched.
    pub product: String,
    pub co2e: f64,
    pub unit: String,
    pub category: String,
    pub is_eco_friendly: bool,
    pub alternatives: Vec<String>,
    /// Guidance for the unmatched case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// =============================================================================
// Data loading
// =============================================================================

/// One row of the embedded data file.
#[derive(Deserialize)]
struct TableEntry {
    name: String,
    #[serde(flatten)]
    record: EmissionRecord,
}

/// Emission-factor table keyed by lowercase, trimmed product name.
///
/// `entries` preserves authoring order (the partial-match tie-break
/// depends on it); `index` gives O(1) exact lookup. Keys are unique;
/// a duplicated key keeps its original position but takes the last
/// definition's record.
struct CarbonTable {
    entries: Vec<(String, EmissionRecord)>,
    index: HashMap<String, usize>,
}

static CARBON_JSON: &str = include_str!("data/carbon.json");

static TABLE: LazyLock<CarbonTable> = LazyLock::new(|| {
    let raw: Vec<TableEntry> =
        serde_json::from_str(CARBON_JSON).expect("carbon.json should be valid JSON");

    let mut entries: Vec<(String, EmissionRecord)> = Vec::with_capacity(raw.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(raw.len());

    for entry in raw {
        let key = entry.name.trim().to_lowercase();
        match index.get(&key) {
            Some(&i) => entries[i].1 = entry.record,
            None => {
                index.insert(key.clone(), entries.len());
                entries.push((key, entry.record));
            }
        }
    }

    CarbonTable { entries, index }
});

/// Exact-match lookup by normalized key. Absence is a normal outcome.
pub fn get(key: &str) -> Option<&'static EmissionRecord> {
    TABLE.index.get(key).map(|&i| &TABLE.entries[i].1)
}

// =============================================================================
// Heuristic fallback
// =============================================================================

/// Category-indicating words checked when nothing in the table matches.
/// A query containing one of these still gets a generic estimate; anything
/// else is treated as not being a product at all.
const HEURISTIC_TERMS: &[&str] = &[
    "bottle", "bag", "car", "phone", "laptop", "food", "drink", "plastic", "paper", "metal",
    "wood", "cloth", "shirt", "shoe", "jean",
];

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whole-word containment: `needle` must not be flanked by word characters.
fn contains_word(haystack: &str, needle: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let at = start + pos;
        let end = at + needle.len();
        let before_ok = haystack[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c));
        if before_ok && after_ok {
            return true;
        }
        start = end;
    }
    false
}

// =============================================================================
// Search
// =============================================================================

/// Resolve a free-text product query against the emission-factor table.
///
/// Tiers, first hit wins:
/// 1. lowercase + trim the query
/// 2. exact key match
/// 3. partial match: any key that contains the query or is contained by it;
///    shortest key wins, ties broken by table authoring order
/// 4. heuristic fallback: generic 5.0 kg estimate if the query mentions a
///    product-ish word, otherwise a "not a product" result
///
/// Empty and whitespace-only queries skip straight to the "not a product"
/// branch (every key trivially contains the empty string, so tier 3 would
/// otherwise return an arbitrary short key).
///
/// Pure function of the table and the query; never fails.
pub fn search(query: &str) -> LookupResult {
    let normalized = query.trim().to_lowercase();

    if normalized.is_empty() {
        return not_a_product(query);
    }

    if let Some(&i) = TABLE.index.get(normalized.as_str()) {
        return matched(&TABLE.entries[i]);
    }

    let mut candidates: Vec<&(String, EmissionRecord)> = TABLE
        .entries
        .iter()
        .filter(|(key, _)| key.contains(&normalized) || normalized.contains(key.as_str()))
        .collect();

    if !candidates.is_empty() {
        // Stable sort: equal-length keys keep authoring order.
        candidates.sort_by_key(|(key, _)| key.len());
        return matched(candidates[0]);
    }

    if HEURISTIC_TERMS.iter().any(|term| contains_word(&normalized, term)) {
        generic_estimate(query)
    } else {
        not_a_product(query)
    }
}

fn matched(entry: &(String, EmissionRecord)) -> LookupResult {
    let (key, record) = entry;
    LookupResult {
        found: true,
        product: key.clone(),
        co2e: record.co2e,
        unit: record.unit.clone(),
        category: record.category.clone(),
        is_eco_friendly: record.co2e < ECO_FRIENDLY_THRESHOLD,
        alternatives: record.alternatives.clone(),
        message: None,
    }
}

fn not_a_product(query: &str) -> LookupResult {
    LookupResult {
        found: false,
        product: query.to_string(),
        co2e: 0.0,
        unit: "kg".to_string(),
        category: "Not a product".to_string(),
        is_eco_friendly: true,
        alternatives: vec![
            "Try searching for products like: beef, apple, laptop, jeans, plastic bottle"
                .to_string(),
        ],
        message: Some(format!(
            "\"{query}\" doesn't appear to be a product. Try searching for items like food, electronics, or materials."
        )),
    }
}

fn generic_estimate(query: &str) -> LookupResult {
    LookupResult {
        found: false,
        product: query.to_string(),
        co2e: 5.0,
        unit: "kg".to_string(),
        category: "Unknown product".to_string(),
        is_eco_friendly: false,
        alternatives: vec![
            "Try a more specific search".to_string(),
            "Check spelling".to_string(),
        ],
        message: Some(
            "Product not found in database. Showing generic estimate for unknown products."
                .to_string(),
        ),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_exact_key() {
        let record = get("beef").expect("beef should be in the table");
        assert_eq!(record.co2e, 27.0);
        assert_eq!(record.category, "Food & Beverage");
        assert_eq!(record.unit, "kg");
    }

    #[test]
    fn test_get_unknown_key() {
        assert!(get("unicorn tears").is_none());
    }

    #[test]
    fn test_search_exact_match() {
        let result = search("beef");
        assert!(result.found);
        assert_eq!(result.product, "beef");
        assert_eq!(result.co2e, 27.0);
        assert_eq!(result.category, "Food & Beverage");
        assert!(!result.is_eco_friendly);
        assert!(result.message.is_none());
    }

    #[test]
    fn test_search_normalization_invariance() {
        assert_eq!(search(" BEEF "), search("beef"));
        assert_eq!(search("Plastic Bottle"), search("plastic bottle"));
    }

    #[test]
    fn test_search_exact_beats_shorter_partial() {
        // "plastic" (7 chars) would win tier 3, but "plastic bottle" is an
        // exact key so tier 2 takes it first.
        let result = search("plastic bottle");
        assert_eq!(result.product, "plastic bottle");
        assert_eq!(result.co2e, 0.5);
    }

    #[test]
    fn test_search_partial_shortest_key_wins() {
        // Both "plastic" and "plastic bottle" are substrings of the query;
        // the shorter key is treated as the more specific concept.
        let result = search("a used plastic bottle today");
        assert!(result.found);
        assert_eq!(result.product, "plastic");
        assert_eq!(result.co2e, 6.0);
    }

    #[test]
    fn test_search_partial_query_inside_key() {
        // "frosted" matches no key exactly but is a substring of
        // "frosted flakes".
        let result = search("frosted");
        assert!(result.found);
        assert_eq!(result.product, "frosted flakes");
        assert_eq!(result.co2e, 2.67);
    }

    #[test]
    fn test_search_partial_tie_broken_by_table_order() {
        // "cereal" and "cheese" are both 6 chars and both present in the
        // query; "cereal" is authored first.
        let result = search("cereal cheese");
        assert_eq!(result.product, "cereal");
    }

    #[test]
    fn test_search_empty_query() {
        for query in ["", "   ", "\t"] {
            let result = search(query);
            assert!(!result.found, "query {query:?} must not match");
            assert_eq!(result.co2e, 0.0);
            assert!(result.is_eco_friendly);
            assert_eq!(result.category, "Not a product");
            assert!(result
                .message
                .as_deref()
                .unwrap()
                .contains("doesn't appear to be a product"));
        }
    }

    #[test]
    fn test_search_unmatched_keeps_original_query() {
        let result = search("Quantum Flux");
        assert!(!result.found);
        assert_eq!(result.product, "Quantum Flux");
    }

    #[test]
    fn test_eco_friendly_threshold_is_strict() {
        // cement: 1.1 kg, well under the threshold
        assert!(search("cement").is_eco_friendly);
        // eggs: 4.8 kg, just under
        assert!(search("eggs").is_eco_friendly);
        // tea: 6.3 kg, over
        assert!(!search("tea").is_eco_friendly);
        // the generic estimate sits exactly at 5.0 and must NOT be friendly
        let generic = search("random car thing");
        assert_eq!(generic.co2e, 5.0);
        assert!(!generic.is_eco_friendly);
    }

    #[test]
    fn test_search_is_idempotent() {
        let first = search("a used plastic bottle today");
        let second = search("a used plastic bottle today");
        assert_eq!(first, second);
    }

    #[test]
    fn test_heuristic_fallback_with_product_word() {
        let result = search("random car thing");
        assert!(!result.found);
        assert_eq!(result.co2e, 5.0);
        assert_eq!(result.category, "Unknown product");
        assert!(result.message.as_deref().unwrap().contains("generic estimate"));
    }

    #[test]
    fn test_heuristic_fallback_without_product_word() {
        let result = search("xyz123");
        assert!(!result.found);
        assert_eq!(result.co2e, 0.0);
        assert!(result.is_eco_friendly);
        assert!(result
            .message
            .as_deref()
            .unwrap()
            .contains("doesn't appear to be a product"));
    }

    #[test]
    fn test_heuristic_requires_word_boundary() {
        // "carpet" contains "car" mid-word only, so it is not product-ish.
        let result = search("vintage carpet");
        assert_eq!(result.category, "Not a product");
        // "my car" has the word on its own.
        let result = search("my car");
        assert_eq!(result.category, "Unknown product");
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("my car broke", "car"));
        assert!(contains_word("car", "car"));
        assert!(!contains_word("carpet", "car"));
        assert!(!contains_word("scar", "car"));
        assert!(!contains_word("race_car_x", "car"));
        assert!(contains_word("race-car!", "car"));
    }
}
