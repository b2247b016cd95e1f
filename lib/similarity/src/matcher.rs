//! Exact-then-nearest device matching
//!
//! Picks the one catalog record that best illustrates a set of target specs.
//! An exact match on every spec wins; otherwise the record with the smallest
//! weighted distance among those satisfying the categorical constraints.

use crate::distance::{specs_equal, weighted_distance};
use crate::query::MatchQuery;
use mobidex_core::{Catalog, DeviceRecord, Result};
use std::sync::Arc;

/// Result of a match query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchOutcome<'a> {
    Exact {
        index: usize,
        record: &'a DeviceRecord,
    },
    Nearest {
        index: usize,
        record: &'a DeviceRecord,
        distance: f64,
    },
    NoMatch,
}

impl<'a> MatchOutcome<'a> {
    pub fn record(&self) -> Option<&'a DeviceRecord> {
        match self {
            MatchOutcome::Exact { record, .. } | MatchOutcome::Nearest { record, .. } => {
                Some(*record)
            }
            MatchOutcome::NoMatch => None,
        }
    }

    /// Catalog position of the matched record
    pub fn index(&self) -> Option<usize> {
        match self {
            MatchOutcome::Exact { index, .. } | MatchOutcome::Nearest { index, .. } => Some(*index),
            MatchOutcome::NoMatch => None,
        }
    }

    pub fn distance(&self) -> Option<f64> {
        match self {
            MatchOutcome::Exact { .. } => Some(0.0),
            MatchOutcome::Nearest { distance, .. } => Some(*distance),
            MatchOutcome::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, MatchOutcome::NoMatch)
    }

    /// Image of the matched record, or `placeholder` when there is none
    pub fn image_or<'p>(&self, placeholder: &'p str) -> &'p str
    where
        'a: 'p,
    {
        self.record()
            .and_then(DeviceRecord::image_url)
            .unwrap_or(placeholder)
    }
}

/// Match engine over a shared catalog snapshot
#[derive(Debug, Clone)]
pub struct MatchEngine {
    catalog: Arc<Catalog>,
}

impl MatchEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn find(&self, query: &MatchQuery) -> Result<MatchOutcome<'_>> {
        query.validate()?;

        if let Some(outcome) = self.find_exact(query) {
            return Ok(outcome);
        }
        Ok(self.find_nearest(query))
    }

    /// First record with an image that equals the target on every field
    pub fn find_exact(&self, query: &MatchQuery) -> Option<MatchOutcome<'_>> {
        self.catalog
            .iter()
            .enumerate()
            .filter(|(_, record)| Self::is_candidate(record, query))
            .find(|(_, record)| {
                record
                    .specs()
                    .map(|specs| specs_equal(&specs, &query.target))
                    .unwrap_or(false)
            })
            .map(|(index, record)| MatchOutcome::Exact { index, record })
    }

    /// Record with the smallest weighted distance; ties keep the earliest
    pub fn find_nearest(&self, query: &MatchQuery) -> MatchOutcome<'_> {
        let mut best = MatchOutcome::NoMatch;
        let mut best_distance = f64::INFINITY;

        let candidates = self
            .catalog
            .iter()
            .enumerate()
            .filter(|(_, record)| Self::is_candidate(record, query));

        for (index, record) in candidates {
            let Some(specs) = record.specs() else {
                continue;
            };
            let distance = weighted_distance(&specs, &query.target);
            // strict comparison keeps the first of equals
            if distance < best_distance {
                best_distance = distance;
                best = MatchOutcome::Nearest {
                    index,
                    record,
                    distance,
                };
            }
        }

        best
    }

    /// Number of records eligible for nearest matching
    pub fn candidate_count(&self, query: &MatchQuery) -> usize {
        self.catalog
            .iter()
            .filter(|record| Self::is_candidate(record, query) && record.specs().is_some())
            .count()
    }

    fn is_candidate(record: &DeviceRecord, query: &MatchQuery) -> bool {
        record.has_image() && query.satisfies_constraints(record)
    }
}
