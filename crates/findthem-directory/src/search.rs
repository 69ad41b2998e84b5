//! Client-side browsing helpers over fetched reports.
//!
//! The directory returns reports in relay order. Narrowing by kind, text
//! search and recency ordering are applied afterwards by the caller.

use findthem_types::{Report, ReportKind};

/// Keeps reports of the given kind; `None` keeps everything.
pub fn filter_by_kind(reports: &[Report], kind: Option<ReportKind>) -> Vec<&Report> {
    reports
        .iter()
        .filter(|report| kind.map_or(true, |k| report.kind() == k))
        .collect()
}

/// Case-insensitive substring match over name, description and location.
///
/// A blank query matches nothing.
pub fn matches_text(report: &Report, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    [report.name(), report.description(), report.location()]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Reports matching `query`, in their input order.
pub fn search<'a>(reports: &'a [Report], query: &str) -> Vec<&'a Report> {
    reports
        .iter()
        .filter(|report| matches_text(report, query))
        .collect()
}

/// Sorts by `created_at`, newest first. Equal timestamps keep their order.
pub fn sort_newest_first(reports: &mut [Report]) {
    reports.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}
