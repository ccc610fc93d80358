//! Components and alias groups.
//!
//! A [`Component`] holds the distinct-looking offerings of one course
//! requirement. Offerings whose full time signature duplicates an earlier
//! offering are kept out of the search and recorded in the [`AliasMap`]
//! under the representative's id, so the caller can disclose
//! interchangeable sections at display time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Offering;

/// The mutually exclusive offering set for one course requirement.
///
/// Exactly one offering of each component appears in any schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Owning course id (e.g. "CMPUT 174").
    pub course_id: String,
    /// Component kind (e.g. "LAB").
    pub kind: String,
    /// Representative offerings, in first-seen order.
    pub offerings: Vec<Offering>,
}

impl Component {
    /// Creates an empty component.
    pub fn new(course_id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            kind: kind.into(),
            offerings: Vec::new(),
        }
    }

    /// Number of representative offerings.
    #[inline]
    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    /// Requirement label, e.g. "CMPUT 174 LAB".
    pub fn label(&self) -> String {
        format!("{} {}", self.course_id, self.kind)
    }
}

/// An offering hidden behind a schedule-identical representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Sibling offering id.
    pub id: String,
    /// Sibling section label.
    pub section: String,
}

/// Representative offering id → schedule-identical siblings.
///
/// Only representatives with at least one sibling have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasMap {
    entries: BTreeMap<String, Vec<AliasEntry>>,
}

impl AliasMap {
    /// Creates an empty alias map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `alias` as a sibling of `representative_id`.
    pub fn add(&mut self, representative_id: impl Into<String>, alias: &Offering) {
        self.entries
            .entry(representative_id.into())
            .or_default()
            .push(AliasEntry {
                id: alias.id.clone(),
                section: alias.section.clone(),
            });
    }

    /// Siblings of a representative (empty if none).
    pub fn aliases_of(&self, representative_id: &str) -> &[AliasEntry] {
        self.entries
            .get(representative_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `offering_id` was hidden as an alias.
    pub fn is_alias(&self, offering_id: &str) -> bool {
        self.entries
            .values()
            .any(|siblings| siblings.iter().any(|a| a.id == offering_id))
    }

    /// Number of representatives with siblings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of hidden siblings.
    pub fn alias_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Iterates `(representative id, siblings)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AliasEntry])> {
        self.entries
            .iter()
            .map(|(id, siblings)| (id.as_str(), siblings.as_slice()))
    }
}
