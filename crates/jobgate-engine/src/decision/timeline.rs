//! Best-effort timeline hints pulled from listing titles. Display aid only.

use std::sync::LazyLock;

use regex::Regex;

use jobgate_core::job::Job;

static URGENT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)urgent|asap|immediately").ok());
static WEEKS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)([0-9]+)\s*week").ok());
static MONTHS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)\s*month").ok());

pub const URGENT_TIMELINE: &str = "urgent";
pub const UNSPECIFIED: &str = "unspecified";

fn capture_number<'t>(re: &LazyLock<Option<Regex>>, text: &'t str) -> Option<&'t str> {
    re.as_ref()?
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Timeline text for a title: `urgent`, `<n> weeks`, `<n> months`, or
/// `unspecified`, checked in that order.
pub fn extract_timeline(title: &str) -> String {
    if URGENT.as_ref().is_some_and(|re| re.is_match(title)) {
        return URGENT_TIMELINE.to_string();
    }
    if let Some(n) = capture_number(&WEEKS, title) {
        return format!("{n} weeks");
    }
    if let Some(n) = capture_number(&MONTHS, title) {
        return format!("{n} months");
    }
    UNSPECIFIED.to_string()
}

/// Budget text for a record context.
pub fn budget_label(job: &Job) -> String {
    match job.ehr_twd {
        Some(rate) => format!("TWD {rate}/hr"),
        None => UNSPECIFIED.to_string(),
    }
}
