//! Static record corpora and stored-payload fixtures used across harnesses.

use super::builders::RecordBuilder;
use dpt_core::{Record, RecordStatus};

/// The two-record collection from the product's worked examples.
pub fn chair_and_phone() -> Vec<Record> {
    vec![
        RecordBuilder::new("1", "Smartphone Design")
            .organization("TechCorp")
            .status(RecordStatus::Granted)
            .country("US")
            .filed("2024-01-15")
            .inventor("John Smith")
            .build(),
        RecordBuilder::new("2", "Office Chair")
            .organization("FurniDesign")
            .status(RecordStatus::Pending)
            .country("US")
            .filed("2024-02-20")
            .inventor("Mike Johnson")
            .build(),
    ]
}

/// The built-in sample catalog.
pub fn sample_catalog() -> Vec<Record> {
    dpt_catalog::SampleCatalog::records()
}

/// Build a corpus of `n` records cycling through statuses, countries and
/// filing months.
pub fn build_corpus(n: usize) -> Vec<Record> {
    const COUNTRIES: &[&str] = &["US", "EP", "JP", "CN"];
    const STATUSES: &[RecordStatus] = &[
        RecordStatus::Pending,
        RecordStatus::Granted,
        RecordStatus::Abandoned,
    ];
    (0..n)
        .map(|i| {
            RecordBuilder::new(i.to_string(), format!("Design {i}"))
                .organization(format!("Org {}", i % 7))
                .status(STATUSES[i % STATUSES.len()])
                .country(COUNTRIES[i % COUNTRIES.len()])
                .filed(format!("2024-{:02}-{:02}", i % 12 + 1, i % 28 + 1))
                .inventor(format!("Inventor {}", i % 5))
                .build()
        })
        .collect()
}

/// Stored history values that must load as an empty log.
pub const CORRUPT_HISTORY: &[&str] = &[
    "",
    "not json",
    "{\"id\":\"1\"}",
    "[{\"id\":\"1\"}]",
    "[1, 2, 3]",
];
