//! Filter engine: narrows a record collection by free-text query and
//! structured [`FilterCriteria`].
//!
//! # Matching
//!
//! 1. A non-blank query keeps records whose title, organization, description
//!    or any inventor name contains it (case-insensitive, Unicode folding).
//! 2. Each present criterion then applies as an AND filter:
//!    - organization / inventor / external id: case-insensitive substring
//!    - category / status / country: exact match
//!    - date range: `from <= filing_date <= to`, both bounds inclusive
//! 3. Absent or blank criteria do not constrain anything.
//!
//! The engine has no precondition; rejecting empty requests is the caller's
//! job (see [`SearchRequest::validate`](crate::search::SearchRequest::validate)).
//!
//! A date that cannot be parsed is a per-record comparison failure: the record
//! is left out of the result, the failure is logged and reported through
//! [`FilterReport::date_errors`], and the pass continues.

use crate::error::DateError;
use crate::types::{DateRange, FilterCriteria, Record, RecordStatus};
use chrono::{DateTime, NaiveDate};

/// Result of a filter pass together with the dates it could not compare.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterReport {
    pub matches: Vec<Record>,
    pub date_errors: Vec<DateError>,
}

/// Return the records matching `query` and `criteria`, in input order.
pub fn filter(records: &[Record], query: &str, criteria: &FilterCriteria) -> Vec<Record> {
    filter_with_report(records, query, criteria).matches
}

/// Like [`filter`], but also returns the per-record date comparison failures.
pub fn filter_with_report(records: &[Record], query: &str, criteria: &FilterCriteria) -> FilterReport {
    let matcher = Matcher::new(query, criteria);
    let mut report = FilterReport::default();

    // A malformed bound fails every comparison; report it once.
    if let Some(Err(e)) = &matcher.range {
        tracing::warn!(error = %e, "filter: date bound rejected, range matches nothing");
        report.date_errors.push(e.clone());
    }

    for record in records {
        match matcher.matches(record) {
            Ok(true) => report.matches.push(record.clone()),
            Ok(false) => {}
            Err(DateError::Bound { .. }) => {}
            Err(e) => {
                tracing::warn!(record = %record.id, error = %e, "filter: record excluded from date range");
                report.date_errors.push(e);
            }
        }
    }

    tracing::debug!(
        total = records.len(),
        matched = report.matches.len(),
        date_errors = report.date_errors.len(),
        "filter: pass complete"
    );
    report
}

/// Parse a date the way record sources and filter forms supply them: a plain
/// `YYYY-MM-DD`, or a full RFC 3339 timestamp reduced to its date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// Query and criteria prepared once per pass: needles lowercased, blanks
/// dropped, date bounds parsed.
#[derive(Debug)]
struct Matcher<'a> {
    query: Option<String>,
    organization: Option<String>,
    inventor: Option<String>,
    external_id: Option<String>,
    category: Option<&'a str>,
    status: Option<RecordStatus>,
    country: Option<&'a str>,
    range: Option<Result<DateBounds, DateError>>,
}

impl<'a> Matcher<'a> {
    fn new(query: &str, criteria: &'a FilterCriteria) -> Self {
        Self {
            query: needle(Some(query)),
            organization: needle(criteria.organization.as_deref()),
            inventor: needle(criteria.inventor.as_deref()),
            external_id: needle(criteria.external_id.as_deref()),
            category: present(criteria.category.as_deref()),
            status: criteria.status,
            country: present(criteria.country.as_deref()),
            range: criteria
                .date_range
                .as_ref()
                .filter(|r| !r.is_empty())
                .map(DateBounds::parse),
        }
    }

    fn matches(&self, record: &Record) -> Result<bool, DateError> {
        if let Some(q) = &self.query {
            let hit = contains_folded(&record.title, q)
                || contains_folded(&record.organization, q)
                || contains_folded(&record.description, q)
                || record.inventors.iter().any(|i| contains_folded(i, q));
            if !hit {
                return Ok(false);
            }
        }

        if let Some(org) = &self.organization {
            if !contains_folded(&record.organization, org) {
                return Ok(false);
            }
        }
        if let Some(inventor) = &self.inventor {
            if !record.inventors.iter().any(|i| contains_folded(i, inventor)) {
                return Ok(false);
            }
        }
        if let Some(number) = &self.external_id {
            // A record without a number never matches a number filter.
            match &record.external_id {
                Some(id) if contains_folded(id, number) => {}
                _ => return Ok(false),
            }
        }
        if self.category.is_some_and(|c| c != record.category) {
            return Ok(false);
        }
        if self.status.is_some_and(|s| s != record.status) {
            return Ok(false);
        }
        if self.country.is_some_and(|c| c != record.country) {
            return Ok(false);
        }

        match &self.range {
            None => Ok(true),
            Some(Err(e)) => Err(e.clone()),
            Some(Ok(bounds)) => {
                let filed = parse_date(&record.filing_date).ok_or_else(|| DateError::FilingDate {
                    record_id: record.id.clone(),
                    value: record.filing_date.clone(),
                })?;
                Ok(bounds.contains(filed))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateBounds {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateBounds {
    fn parse(range: &DateRange) -> Result<Self, DateError> {
        Ok(Self {
            from: parse_bound(range.from.as_deref())?,
            to: parse_bound(range.to.as_deref())?,
        })
    }

    fn contains(&self, date: NaiveDate) -> bool {
        let above_from = self.from.map_or(true, |from| date >= from);
        let below_to = self.to.map_or(true, |to| date <= to);
        above_from && below_to
    }
}

fn parse_bound(value: Option<&str>) -> Result<Option<NaiveDate>, DateError> {
    match present(value) {
        None => Ok(None),
        Some(v) => parse_date(v).map(Some).ok_or_else(|| DateError::Bound {
            value: v.to_string(),
        }),
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn needle(value: Option<&str>) -> Option<String> {
    present(value).map(str::to_lowercase)
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
