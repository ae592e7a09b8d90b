//! Catalog statistics for the dashboard and analytics views.

use crate::filter::parse_date;
use crate::types::{Record, RecordStatus};
use chrono::Datelike;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogStats {
    pub total: usize,
    pub by_status: BTreeMap<RecordStatus, usize>,
    pub by_country: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    /// Filings per calendar year.
    pub by_year: BTreeMap<i32, usize>,
    /// Records whose filing date could not be parsed.
    pub undated: usize,
    /// Organizations by record count, descending; ties broken by name.
    pub top_organizations: Vec<(String, usize)>,
}

impl CatalogStats {
    pub fn from_records(records: &[Record]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Default::default()
        };
        let mut orgs: HashMap<&str, usize> = HashMap::new();

        for r in records {
            *stats.by_status.entry(r.status).or_default() += 1;
            *stats.by_country.entry(r.country.clone()).or_default() += 1;
            *stats.by_category.entry(r.category.clone()).or_default() += 1;
            *orgs.entry(r.organization.as_str()).or_default() += 1;
            match parse_date(&r.filing_date) {
                Some(date) => *stats.by_year.entry(date.year()).or_default() += 1,
                None => stats.undated += 1,
            }
        }

        let mut top: Vec<(String, usize)> = orgs
            .into_iter()
            .map(|(name, n)| (name.to_string(), n))
            .collect();
        top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        stats.top_organizations = top;
        stats
    }

    /// Count of records with `status`.
    pub fn status_count(&self, status: RecordStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}
