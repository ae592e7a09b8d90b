//! Match scoring applied to search results after filtering.
//!
//! There is no similarity model behind the score yet. [`NoScore`] leaves the
//! field empty and [`FixedScore`] stamps a constant, so results stay
//! deterministic either way.

use crate::config::{ScoreMode, SearchConfig};
use crate::types::Record;

pub trait MatchScorer {
    /// Score for `record` in percent, or `None` to leave it unscored.
    fn score(&self, record: &Record) -> Option<u8>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoScore;

impl MatchScorer for NoScore {
    fn score(&self, _record: &Record) -> Option<u8> {
        None
    }
}

/// Every record gets the same score, capped at 100.
#[derive(Debug, Clone, Copy)]
pub struct FixedScore(pub u8);

impl MatchScorer for FixedScore {
    fn score(&self, _record: &Record) -> Option<u8> {
        Some(self.0.min(100))
    }
}

/// Build the scorer selected by the `[search]` config section.
pub fn scorer_from_config(cfg: &SearchConfig) -> Box<dyn MatchScorer> {
    match cfg.score {
        ScoreMode::None => Box::new(NoScore),
        ScoreMode::Fixed => Box::new(FixedScore(cfg.fixed_score)),
    }
}

/// Stamp each record with the scorer's verdict.
pub fn apply_scores(records: Vec<Record>, scorer: &dyn MatchScorer) -> Vec<Record> {
    records
        .into_iter()
        .map(|mut record| {
            record.score = scorer.score(&record);
            record
        })
        .collect()
}
