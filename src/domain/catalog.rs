//! Catalog domain model: sections, items, search hits and service statistics.
//!
//! These types mirror the JSON documents served by the content service. They
//! are immutable snapshots on the client side: sections are replaced wholesale
//! on reload, items are fetched fresh on every open.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for sections and items.
///
/// The service emits section ids as strings and item ids as integers. Both are
/// kept as text so they can be echoed back into request paths unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Creates an identifier from any textual value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

fn default_icon() -> String {
    "📂".to_string()
}

fn default_category() -> String {
    "أخرى".to_string()
}

/// A named, browsable group of items.
///
/// `count` is a display hint reported by the service; it is never checked
/// against the number of items actually returned for the section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: Id,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default = "default_category")]
    pub category: String,
}

/// A single content entry: a title plus an opaque payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Response document of the section detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionDetail {
    pub items: Vec<Item>,
}

/// One search hit: the originating section and the matching item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub section: Id,
    pub item: Item,
}

/// Service-wide counters shown in the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_sections: u64,
    pub total_items: u64,
    pub sections_with_content: u64,
    /// ISO-8601 timestamp of the snapshot, when the service provides one.
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Stats {
    /// Counter targets in header order.
    #[must_use]
    pub const fn targets(&self) -> [u64; 3] {
        [self.total_sections, self.total_items, self.sections_with_content]
    }

    /// Formats `last_updated` for display, if present and parseable.
    ///
    /// ```
    /// use maktaba::domain::Stats;
    ///
    /// let stats = Stats {
    ///     total_sections: 1,
    ///     total_items: 2,
    ///     sections_with_content: 1,
    ///     last_updated: Some("2024-03-01T09:30:12.123456".to_string()),
    /// };
    /// assert_eq!(stats.updated_label().as_deref(), Some("2024-03-01 09:30"));
    /// ```
    #[must_use]
    pub fn updated_label(&self) -> Option<String> {
        let raw = self.last_updated.as_deref()?;
        let parsed = raw
            .parse::<chrono::DateTime<chrono::FixedOffset>>()
            .map(|dt| dt.naive_local())
            .or_else(|_| raw.parse::<chrono::NaiveDateTime>())
            .ok()?;
        Some(parsed.format("%Y-%m-%d %H:%M").to_string())
    }
}

/// Active category filter for the section grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterState {
    /// Sentinel: every section is visible.
    #[default]
    All,
    /// Only sections whose category equals this value are visible.
    Category(String),
}

impl FilterState {
    /// Whether a section passes this filter.
    #[must_use]
    pub fn admits(&self, section: &Section) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => section.category == *category,
        }
    }

    /// Label used in the filter bar.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Category(category) => category,
        }
    }
}

/// Returns the sections visible under `filter`, in catalog order.
///
/// Always evaluated from the full list; no state survives between calls.
#[must_use]
pub fn filter_sections<'a>(sections: &'a [Section], filter: &FilterState) -> Vec<&'a Section> {
    sections.iter().filter(|section| filter.admits(section)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, category: &str) -> Section {
        Section {
            id: Id::new(id),
            name: id.to_uppercase(),
            icon: "📚".to_string(),
            count: 1,
            category: category.to_string(),
        }
    }

    #[test]
    fn ids_accept_strings_and_numbers() {
        let items: Vec<Item> = serde_json::from_str(
            r#"[{"id": 7, "title": "a", "content": "x"}, {"id": "i8", "title": "b"}]"#,
        )
        .unwrap();
        assert_eq!(items[0].id.as_str(), "7");
        assert_eq!(items[1].id.as_str(), "i8");
        assert_eq!(items[1].content, "");
    }

    #[test]
    fn section_defaults_follow_service_fallbacks() {
        let section: Section = serde_json::from_str(r#"{"id": "X", "name": "X"}"#).unwrap();
        assert_eq!(section.icon, "📂");
        assert_eq!(section.category, "أخرى");
        assert_eq!(section.count, 0);
    }

    #[test]
    fn filter_matches_literal_predicate() {
        let sections = vec![section("a", "edu"), section("b", "sports"), section("c", "edu")];
        let filters = [
            FilterState::All,
            FilterState::Category("edu".into()),
            FilterState::Category("sports".into()),
            FilterState::Category("missing".into()),
        ];

        for filter in &filters {
            let expected: Vec<&Section> = sections
                .iter()
                .filter(|s| *filter == FilterState::All || FilterState::Category(s.category.clone()) == *filter)
                .collect();
            assert_eq!(filter_sections(&sections, filter), expected, "{filter:?}");
        }
    }

    #[test]
    fn switching_filters_leaves_no_residue() {
        let sections = vec![section("a", "edu"), section("b", "sports")];
        let narrowed = filter_sections(&sections, &FilterState::Category("sports".into()));
        assert_eq!(narrowed.len(), 1);
        let widened = filter_sections(&sections, &FilterState::All);
        assert_eq!(widened.len(), 2);
    }

    #[test]
    fn updated_label_handles_missing_and_garbage() {
        let mut stats = Stats {
            total_sections: 0,
            total_items: 0,
            sections_with_content: 0,
            last_updated: None,
        };
        assert_eq!(stats.updated_label(), None);
        stats.last_updated = Some("yesterday".into());
        assert_eq!(stats.updated_label(), None);
        stats.last_updated = Some("2024-03-01T09:30:12+03:00".into());
        assert_eq!(stats.updated_label().as_deref(), Some("2024-03-01 09:30"));
    }
}
