//! Explainability for match results
//!
//! Serializable views of a [`MatchOutcome`] that show how the distance was
//! computed, one weighted term per spec field.

use crate::distance::contributions;
use crate::matcher::MatchOutcome;
use crate::query::MatchQuery;
use mobidex_core::DeviceRecord;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Nearest,
    None,
}

/// A match outcome with its per-field distance breakdown
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedMatch {
    pub kind: MatchKind,
    /// Catalog position of the matched record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Image to show; the placeholder when nothing matched
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<DeviceRecord>,
    /// Weighted distance term per spec field, keyed by column name
    pub explain: BTreeMap<String, f64>,
}

impl ExplainedMatch {
    pub fn from_outcome(outcome: &MatchOutcome<'_>, query: &MatchQuery, placeholder: &str) -> Self {
        let kind = match outcome {
            MatchOutcome::Exact { .. } => MatchKind::Exact,
            MatchOutcome::Nearest { .. } => MatchKind::Nearest,
            MatchOutcome::NoMatch => MatchKind::None,
        };

        let explain: BTreeMap<String, f64> = outcome
            .record()
            .and_then(DeviceRecord::specs)
            .map(|specs| {
                contributions(&specs, &query.target)
                    .into_iter()
                    .map(|(field, term)| (field.to_string(), term))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            kind,
            index: outcome.index(),
            distance: outcome.distance(),
            image: outcome.image_or(placeholder).to_string(),
            record: outcome.record().cloned(),
            explain,
        }
    }

    /// Field contributing the most to the distance, if any is non-zero
    pub fn dominant_field(&self) -> Option<&str> {
        self.explain
            .iter()
            .filter(|(_, term)| **term > 0.0)
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(name, _)| name.as_str())
    }
}
