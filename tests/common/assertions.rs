//! Domain-specific assertion macros for bulletin harnesses.
//!
//! These add context-rich failure messages that make it clear *what*
//! search invariant was violated and *which* rows were involved.

// ---------------------------------------------------------------------------
// Result-set assertions
// ---------------------------------------------------------------------------

/// Assert that a result set contains a row with the given course number.
///
/// ```rust
/// assert_has_course!(results, "4780");
/// ```
#[macro_export]
macro_rules! assert_has_course {
    ($results:expr, $number:expr) => {{
        let results: &[bulletin_core::CourseRow] = &$results;
        let number: &str = $number;
        if !results.iter().any(|r| r.number == number) {
            panic!(
                "assert_has_course! failed: no row with course number {:?}.\n  Present: {:?}",
                number,
                results.iter().map(|r| r.number.as_str()).collect::<Vec<_>>()
            );
        }
    }};
}

/// Assert that a result set does NOT contain a row with the given number.
#[macro_export]
macro_rules! assert_no_course {
    ($results:expr, $number:expr) => {{
        let results: &[bulletin_core::CourseRow] = &$results;
        let number: &str = $number;
        if results.iter().any(|r| r.number == number) {
            panic!(
                "assert_no_course! failed: course number {:?} unexpectedly present.",
                number
            );
        }
    }};
}

/// Assert that every row in a result set satisfies a predicate.
///
/// ```rust
/// assert_results_all!(results, |r| r.level == "GR");
/// ```
#[macro_export]
macro_rules! assert_results_all {
    ($results:expr, $pred:expr) => {{
        let results: &[bulletin_core::CourseRow] = &$results;
        let pred = $pred;
        let failing: Vec<_> = results.iter().filter(|r| !pred(r)).collect();
        if !failing.is_empty() {
            panic!(
                "assert_results_all! failed: {} of {} rows did not satisfy the predicate.\n  First failing: {:?}",
                failing.len(),
                results.len(),
                failing[0]
            );
        }
    }};
}

/// Assert the exact course numbers of a result set, in order.
///
/// Result ordering is part of the query contract (subject, then number),
/// so harnesses assert it explicitly.
#[macro_export]
macro_rules! assert_result_numbers {
    ($results:expr, $numbers:expr) => {{
        let results: &[bulletin_core::CourseRow] = &$results;
        let expected: &[&str] = &$numbers;
        let actual: Vec<&str> = results.iter().map(|r| r.number.as_str()).collect();
        pretty_assertions::assert_eq!(actual, expected.to_vec());
    }};
}
