// src/extractors/field.rs

// --- Imports ---
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Serialize, Serializer};

// --- CSS Selectors (Lazy Static) ---
// The site renders every field name and field value as a <label> element.
static LABEL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("label").expect("Failed to compile LABEL_SELECTOR")
});

/// The result of a single field lookup: the extracted text, or the
/// `NotFound` sentinel when no match exists or extraction failed.
/// Distinct from an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Found(String),
    NotFound,
}

impl FieldValue {
    pub fn is_found(&self) -> bool {
        matches!(self, FieldValue::Found(_))
    }

    /// Text as written into the report. The sentinel renders as "Not Found".
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Found(value) => value,
            FieldValue::NotFound => "Not Found",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_text())
    }
}

/// How a configured label is matched against rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum MatchStrategy {
    /// Rendered text must equal the label exactly.
    Exact,
    /// Case-insensitive substring match.
    CaseInsensitive,
    /// The label is compiled as a case-insensitive regex and searched for
    /// within the rendered text. Matches the source site's conventions and
    /// is the default.
    Pattern,
}

enum LabelMatcher<'a> {
    Exact(&'a str),
    Substring(String),
    Regex(Regex),
}

impl MatchStrategy {
    fn compile<'a>(&self, label: &'a str) -> Option<LabelMatcher<'a>> {
        match self {
            MatchStrategy::Exact => Some(LabelMatcher::Exact(label)),
            MatchStrategy::CaseInsensitive => Some(LabelMatcher::Substring(label.to_lowercase())),
            MatchStrategy::Pattern => Regex::new(&format!("(?i){label}"))
                .ok()
                .map(LabelMatcher::Regex),
        }
    }
}

impl LabelMatcher<'_> {
    fn is_match(&self, text: &str) -> bool {
        match self {
            LabelMatcher::Exact(label) => text == *label,
            LabelMatcher::Substring(needle) => text.to_lowercase().contains(needle),
            LabelMatcher::Regex(re) => re.is_match(text),
        }
    }
}

// --- Main Extractor Structure ---
pub struct FieldExtractor {
    strategy: MatchStrategy,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(MatchStrategy::Pattern)
    }
}

impl FieldExtractor {
    pub fn new(strategy: MatchStrategy) -> Self {
        Self { strategy }
    }

    /// Extracts the value for `label` from a rendered document snapshot.
    ///
    /// The markup ties a value to its label only by proximity: the first
    /// <label> whose text matches is located, then its nearest <div>
    /// ancestor is taken as the label/value group, and the second <label>
    /// under that group holds the value. Every failure mode degrades to
    /// `NotFound`; this never returns an error and never panics.
    pub fn extract(&self, document: &Html, label: &str) -> FieldValue {
        match self.locate(document, label) {
            Some(value) => FieldValue::Found(value),
            None => FieldValue::NotFound,
        }
    }

    fn locate(&self, document: &Html, label: &str) -> Option<String> {
        let Some(matcher) = self.strategy.compile(label) else {
            tracing::debug!("Label pattern failed to compile: '{}'", label);
            return None;
        };

        let Some(label_element) = document
            .select(&LABEL_SELECTOR)
            .find(|el| matcher.is_match(element_text(el).trim()))
        else {
            tracing::debug!("No element matched label '{}'", label);
            return None;
        };

        let Some(group) = nearest_group(label_element) else {
            tracing::debug!("No grouping ancestor for label '{}'", label);
            return None;
        };

        // First <label> under the group is the field name, the second its value.
        let mut pair = group.select(&LABEL_SELECTOR);
        pair.next()?;
        let Some(value_element) = pair.next() else {
            tracing::debug!("No paired value element for label '{}'", label);
            return None;
        };

        Some(element_text(&value_element).trim().to_string())
    }
}

/// Nearest <div> ancestor grouping a label with its value.
fn nearest_group(element: ElementRef) -> Option<ElementRef> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "div")
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect()
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str, label: &str) -> FieldValue {
        let document = Html::parse_document(html);
        FieldExtractor::default().extract(&document, label)
    }

    #[test]
    fn extracts_second_label_text_trimmed() {
        let html = r#"
            <html><body>
            <div class="field-row"><label>Year Built</label><label> 1998 </label></div>
            </body></html>
        "#;
        assert_eq!(extract(html, "Year Built"), FieldValue::Found("1998".to_string()));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let html = r#"<div><label>Beds</label><label>3</label></div>"#;
        assert_eq!(extract(html, "beds"), FieldValue::Found("3".to_string()));
    }

    #[test]
    fn picks_first_matching_label_in_document_order() {
        let html = r#"
            <div><label>Sale Price</label><label>$450,000</label></div>
            <div><label>Sale Price</label><label>$999,999</label></div>
        "#;
        assert_eq!(extract(html, "Sale Price"), FieldValue::Found("$450,000".to_string()));
    }

    #[test]
    fn value_may_carry_nested_markup() {
        let html = r#"
            <div><label><span>Lot</span> <span>Acres</span></label><label><b>0.25</b></label></div>
        "#;
        assert_eq!(extract(html, "Lot Acres"), FieldValue::Found("0.25".to_string()));
    }

    #[test]
    fn group_is_nearest_div_ancestor() {
        // The label sits inside a <span>; the pairing group is the div above it.
        let html = r#"
            <div class="row"><span><label>County</label></span><label>Alameda</label></div>
        "#;
        assert_eq!(extract(html, "County"), FieldValue::Found("Alameda".to_string()));
    }

    #[test]
    fn missing_label_yields_not_found() {
        let html = r#"<div><label>Beds</label><label>3</label></div>"#;
        assert_eq!(extract(html, "Baths"), FieldValue::NotFound);
    }

    #[test]
    fn lone_label_without_value_yields_not_found() {
        let html = r#"<div><label>Pool</label></div>"#;
        assert_eq!(extract(html, "Pool"), FieldValue::NotFound);
    }

    #[test]
    fn label_outside_any_div_yields_not_found() {
        let html = r#"<html><body><label>Zoning</label><label>R-1</label></body></html>"#;
        assert_eq!(extract(html, "Zoning"), FieldValue::NotFound);
    }

    #[test]
    fn empty_snapshot_yields_not_found() {
        assert_eq!(extract("", "Beds"), FieldValue::NotFound);
    }

    #[test]
    fn malformed_snapshot_yields_not_found() {
        let html = "<div><label>Beds</div></label><<<>>";
        assert_eq!(extract(html, "Baths"), FieldValue::NotFound);
    }

    #[test]
    fn unparseable_label_pattern_yields_not_found() {
        // "(" is an invalid regex under the Pattern strategy.
        let html = r#"<div><label>(</label><label>oops</label></div>"#;
        assert_eq!(extract(html, "("), FieldValue::NotFound);
    }

    #[test]
    fn extraction_is_idempotent_over_a_snapshot() {
        let html = r#"<div><label>Stories</label><label>2</label></div>"#;
        let document = Html::parse_document(html);
        let extractor = FieldExtractor::default();
        let first = extractor.extract(&document, "Stories");
        let second = extractor.extract(&document, "Stories");
        assert_eq!(first, second);
        assert_eq!(first, FieldValue::Found("2".to_string()));
    }

    #[test]
    fn exact_strategy_requires_full_match() {
        let html = r#"<div><label>Beds Total</label><label>3</label></div>"#;
        let document = Html::parse_document(html);
        let exact = FieldExtractor::new(MatchStrategy::Exact);
        assert_eq!(exact.extract(&document, "Beds"), FieldValue::NotFound);
        assert_eq!(
            exact.extract(&document, "Beds Total"),
            FieldValue::Found("3".to_string())
        );
    }

    #[test]
    fn substring_strategy_matches_within_text() {
        let html = r#"<div><label>Total Beds</label><label>4</label></div>"#;
        let document = Html::parse_document(html);
        let substring = FieldExtractor::new(MatchStrategy::CaseInsensitive);
        assert_eq!(
            substring.extract(&document, "beds"),
            FieldValue::Found("4".to_string())
        );
    }

    #[test]
    fn sentinel_renders_as_not_found_text() {
        assert_eq!(FieldValue::NotFound.as_text(), "Not Found");
        assert_ne!(FieldValue::NotFound, FieldValue::Found(String::new()));
    }
}
