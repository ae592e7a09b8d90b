//! Domain-specific assertion macros for dpt harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! records or history entries were involved.

/// Assert that a record slice has exactly the given ids, in order.
///
/// ```rust
/// assert_ids!(results, ["2"]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($records:expr, [$($id:expr),* $(,)?]) => {{
        let records: &[dpt_core::Record] = &$records;
        let actual: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<&str> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "record ids differ");
    }};
}

/// Assert that the history log holds entries with the given queries, newest
/// first.
#[macro_export]
macro_rules! assert_history_queries {
    ($history:expr, [$($q:expr),* $(,)?]) => {{
        let history = &$history;
        let actual: Vec<&str> = history.entries().iter().map(|e| e.query.as_str()).collect();
        let expected: Vec<&str> = vec![$($q),*];
        pretty_assertions::assert_eq!(actual, expected, "history order differs");
    }};
}

/// Assert that every record in a result set satisfies a predicate.
///
/// ```rust
/// assert_results_all!(results, |r| r.status == RecordStatus::Granted);
/// ```
#[macro_export]
macro_rules! assert_results_all {
    ($results:expr, $pred:expr) => {{
        let results: &[dpt_core::Record] = &$results;
        let pred = $pred;
        let failing: Vec<&str> = results
            .iter()
            .filter(|r| !pred(r))
            .map(|r| r.id.as_str())
            .collect();
        if !failing.is_empty() {
            panic!(
                "assert_results_all! failed: {} of {} records did not satisfy predicate: {:?}",
                failing.len(),
                results.len(),
                failing
            );
        }
    }};
}
