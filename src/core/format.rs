//! # Result Formatter
//!
//! Turns an [`AnalysisResult`] into a Markdown message body. Pure and
//! deterministic: same input, same string. Only a bounded prefix of the
//! result is read.
//!
//! ```text
//! **📊 Analysis complete: FEB-S-2024**
//!
//! <narrative>
//!
//! ---
//!
//! **#1 Thunder Bay** · Score: 87.5
//! - Matched: Dirt 1600m · win rate 42% · record 5/12
//! - Matched: ...
//! ```

use crate::service::types::{AnalysisResult, Condition, RankedEntry};

/// Ranked entries shown per analysis.
pub const MAX_RANKED_ENTRIES: usize = 5;
/// Conditions shown per entry.
pub const MAX_CONDITIONS_PER_ENTRY: usize = 2;

const HEADER: &str = "📊 Analysis complete";

/// Formats an analysis result for the message log.
pub fn format_analysis(result: &AnalysisResult) -> String {
    let mut out = match &result.race_event_id {
        Some(race) => format!("**{HEADER}: {race}**"),
        None => format!("**{HEADER}**"),
    };
    out.push_str("\n\n");
    out.push_str(&result.narrative);

    if result.ranked_entries.is_empty() {
        return out;
    }

    // Blank line first: `---` right under a text line would turn it into a heading.
    out.push_str("\n\n---\n");
    for entry in result.ranked_entries.iter().take(MAX_RANKED_ENTRIES) {
        out.push('\n');
        out.push_str(&format_entry(entry));
        out.push('\n');
    }
    out
}

fn format_entry(entry: &RankedEntry) -> String {
    let mut out = format!("**#{} {}** · Score: {}", entry.rank, entry.name, entry.score);
    for condition in entry
        .matched_conditions
        .iter()
        .take(MAX_CONDITIONS_PER_ENTRY)
    {
        out.push('\n');
        out.push_str(&format_condition(condition));
    }
    out
}

fn format_condition(condition: &Condition) -> String {
    format!(
        "- Matched: {} · win rate {}% · record {}/{}",
        condition.name,
        percent(condition.success_rate),
        condition.support_count,
        condition.sample_size
    )
}

/// `rate` in `[0, 1]` as a whole percentage, rounding half up.
pub fn percent(rate: f64) -> i64 {
    (rate * 100.0 + 0.5).floor() as i64
}
