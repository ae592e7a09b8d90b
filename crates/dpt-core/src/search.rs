//! Search layer: validates a request, runs the filter engine over the loaded
//! records, scores the results and records the action in the history log.
//!
//! [`SearchSession`] owns the state a search needs: the record collection
//! handed over by a record source, the [`SearchHistory`], and the
//! [`MatchScorer`]. All of it is injected at construction.

use crate::error::{DateError, SearchError, ValidationError};
use crate::filter::filter_with_report;
use crate::history::{HistoryEntry, NewHistoryEntry, SearchHistory};
use crate::score::{apply_scores, MatchScorer, NoScore};
use crate::store::KeyValueStore;
use crate::types::{FilterCriteria, Record, SearchMode};
use std::path::PathBuf;

/// Default number of records returned by [`SearchSession::similar`].
pub const DEFAULT_SIMILAR_LIMIT: usize = 3;

/// A search as submitted by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub criteria: FilterCriteria,
    pub mode: SearchMode,
    /// Reference image attached to the search. It counts as input for
    /// validation; matching on it is not supported.
    pub reference_image: Option<PathBuf>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn reference_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_image = Some(path.into());
        self
    }

    /// Reject a request with no text, no filters and no image.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.query.trim().is_empty()
            && self.criteria.is_empty()
            && self.reference_image.is_none()
        {
            return Err(ValidationError::EmptyRequest);
        }
        Ok(())
    }

    /// Trim the query and drop blank criteria so equivalent requests filter
    /// and deduplicate identically.
    pub fn normalized(self) -> Self {
        Self {
            query: self.query.trim().to_string(),
            criteria: self.criteria.normalized(),
            mode: self.mode,
            reference_image: self.reference_image,
        }
    }
}

impl From<&HistoryEntry> for SearchRequest {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            query: entry.query.clone(),
            criteria: entry.criteria.clone(),
            mode: entry.mode,
            reference_image: None,
        }
    }
}

/// Result of [`SearchSession::perform`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub results: Vec<Record>,
    /// The history entry recorded for this search.
    pub entry: HistoryEntry,
    /// Records left out because their filing date could not be compared.
    pub date_errors: Vec<DateError>,
}

pub struct SearchSession<S> {
    records: Vec<Record>,
    history: SearchHistory<S>,
    scorer: Box<dyn MatchScorer>,
}

impl<S: KeyValueStore> SearchSession<S> {
    pub fn new(records: Vec<Record>, history: SearchHistory<S>) -> Self {
        Self {
            records,
            history,
            scorer: Box::new(NoScore),
        }
    }

    pub fn with_scorer(mut self, scorer: Box<dyn MatchScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn history(&self) -> &SearchHistory<S> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut SearchHistory<S> {
        &mut self.history
    }

    /// Validate, filter, score and log a search.
    ///
    /// An empty request fails with [`ValidationError::EmptyRequest`] before
    /// the filter engine runs. A failure to persist the history is logged; the
    /// search itself still succeeds.
    pub fn perform(&mut self, request: SearchRequest) -> Result<SearchOutcome, SearchError> {
        let request = request.normalized();
        request.validate()?;

        let report = filter_with_report(&self.records, &request.query, &request.criteria);
        let results = apply_scores(report.matches, self.scorer.as_ref());
        tracing::info!(
            query = %request.query,
            mode = %request.mode,
            results = results.len(),
            "search: performed"
        );

        let new_entry = NewHistoryEntry {
            query: request.query,
            criteria: request.criteria,
            result_count: results.len(),
            mode: request.mode,
        };
        let entry = match self.history.add(new_entry) {
            Ok(entry) => entry,
            // The entry is in the in-memory log even though it was not saved.
            Err(e) => {
                tracing::warn!(error = %e, "search: history entry not persisted");
                self.history.entries()[0].clone()
            }
        };

        Ok(SearchOutcome {
            results,
            entry,
            date_errors: report.date_errors,
        })
    }

    /// Run the search recorded in history entry `id` again.
    pub fn rerun(&mut self, id: &str) -> Result<SearchOutcome, SearchError> {
        let request = self
            .history
            .get(id)
            .map(SearchRequest::from)
            .ok_or_else(|| SearchError::UnknownHistoryEntry(id.to_string()))?;
        self.perform(request)
    }

    /// Up to `limit` other records to show next to `record_id`, in catalog
    /// order and scored by the session scorer.
    pub fn similar(&self, record_id: &str, limit: usize) -> Result<Vec<Record>, SearchError> {
        if self.record(record_id).is_none() {
            return Err(SearchError::UnknownRecord(record_id.to_string()));
        }
        let others = self
            .records
            .iter()
            .filter(|r| r.id != record_id)
            .take(limit)
            .cloned()
            .collect();
        Ok(apply_scores(others, self.scorer.as_ref()))
    }
}
