// src/extractors/tab.rs
use std::path::PathBuf;

use scraper::Html;
use serde::Serialize;

use crate::extractors::field::{FieldExtractor, FieldValue};
use crate::schema::Tab;
use crate::session::Session;
use crate::utils::error::SessionError;

/// One extracted (label, value) pair, in schema order.
#[derive(Debug, Clone, Serialize)]
pub struct FieldRecord {
    pub label: &'static str,
    pub value: FieldValue,
}

/// All fields extracted for one tab visit. Contains exactly one entry per
/// schema label, in schema order; never mutated after assembly.
#[derive(Debug, Clone, Serialize)]
pub struct TabResult {
    #[serde(serialize_with = "serialize_tab_name")]
    pub tab: Tab,
    pub fields: Vec<FieldRecord>,
}

fn serialize_tab_name<S: serde::Serializer>(tab: &Tab, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tab.name())
}

impl TabResult {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn found_count(&self) -> usize {
        self.fields.iter().filter(|f| f.value.is_found()).count()
    }
}

/// The full record for one invocation: one result per tab, in tab order.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub record_id: String,
    pub tabs: Vec<TabResult>,
}

impl Report {
    pub fn new(record_id: impl Into<String>) -> Self {
        Self { record_id: record_id.into(), tabs: Vec::new() }
    }

    pub fn push(&mut self, result: TabResult) {
        self.tabs.push(result);
    }
}

/// Visits tabs over a live session and assembles their results.
pub struct TabScraper<'a> {
    session: &'a Session,
    extractor: &'a FieldExtractor,
    debug_dir: Option<PathBuf>,
}

impl<'a> TabScraper<'a> {
    pub fn new(session: &'a Session, extractor: &'a FieldExtractor) -> Self {
        Self { session, extractor, debug_dir: None }
    }

    /// Save each tab's raw page source under `dir` for offline diagnosis.
    pub fn with_debug_dir(mut self, dir: PathBuf) -> Self {
        self.debug_dir = Some(dir);
        self
    }

    /// Navigates to `tab`, waits out the settle delay, snapshots the
    /// rendered page, and extracts every schema field. Navigation failure
    /// is fatal; field-level failures degrade to the sentinel.
    pub async fn scrape_tab(&self, tab: Tab) -> Result<TabResult, SessionError> {
        tracing::info!("Navigating to the '{}' tab...", tab.name());
        self.session.activate_tab(&tab.nav_xpath()).await?;

        let source = self.session.page_source().await?;

        if let Some(dir) = &self.debug_dir {
            let path = dir.join(format!("{}_page.html", sanitize_name(tab.name())));
            match std::fs::create_dir_all(dir).and_then(|_| std::fs::write(&path, &source)) {
                Ok(()) => tracing::info!("Saved raw page source to: {}", path.display()),
                Err(e) => tracing::warn!("Failed to save raw page source: {}", e),
            }
        }

        Ok(collect_tab_fields(&source, tab, self.extractor))
    }
}

/// Pure extraction over an already-rendered page source. Always yields
/// exactly one entry per schema label, in schema order.
pub fn collect_tab_fields(page_source: &str, tab: Tab, extractor: &FieldExtractor) -> TabResult {
    let document = Html::parse_document(page_source);
    let fields = tab
        .fields()
        .iter()
        .map(|label| FieldRecord {
            label,
            value: extractor.extract(&document, label),
        })
        .collect();
    TabResult { tab, fields }
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}
