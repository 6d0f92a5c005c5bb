//! Plain-text and JSON rendering of scoring results.

use crossterm::style::Stylize;
use itertools::Itertools;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::alignment::{AlignmentResult, AlignmentSegment, Feedback};
use crate::error::Result;
use crate::practice::SessionSummary;

const NOTHING_HEARD: &str = "(nothing recognized)";

/// Renders the alignment as a single line. With color, heard characters are
/// green and mismatched ones red and underlined; without, mismatches are
/// bracketed.
pub fn render_alignment(segments: &[AlignmentSegment], color: bool) -> String {
    segments
        .iter()
        .filter_map(|seg| {
            let c = seg.target_char()?;
            Some(match (seg.is_equal(), color) {
                (true, true) => c.to_string().green().bold().to_string(),
                (true, false) => c.to_string(),
                (false, true) => c.to_string().red().bold().underlined().to_string(),
                (false, false) => format!("[{c}]"),
            })
        })
        .join("")
}

fn feedback_label(feedback: Feedback, color: bool) -> String {
    match (feedback, color) {
        (Feedback::Good, true) => feedback.to_string().green().to_string(),
        (Feedback::NeedsPractice, true) => feedback.to_string().yellow().to_string(),
        (_, false) => feedback.to_string(),
    }
}

/// Left-aligned `label: value` rows with values in one column.
fn key_values(rows: &[(&str, String)]) -> String {
    let width = rows
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|(label, value)| {
            let pad = " ".repeat(width - label.width());
            format!("{label}:{pad} {value}")
        })
        .join("\n")
}

pub fn render_result(result: &AlignmentResult, color: bool) -> String {
    let heard = if result.recognized_text.is_empty() {
        NOTHING_HEARD.to_string()
    } else {
        result.recognized_text.clone()
    };

    key_values(&[
        ("Target", result.target_word.clone()),
        ("Heard", heard),
        ("Accuracy", format!("{}%", result.score)),
        ("Feedback", feedback_label(result.feedback, color)),
        ("Alignment", render_alignment(&result.segments, color)),
    ])
}

pub fn render_summary(summary: &SessionSummary) -> String {
    let mut rows = vec![
        ("Attempted", summary.attempted.to_string()),
        ("Skipped", summary.skipped.to_string()),
        (
            "Mean score",
            format!("{:.1} (sd {:.1})", summary.mean_score, summary.score_std_dev),
        ),
        ("Good", format!("{}/{}", summary.good_count, summary.attempted)),
    ];
    if !summary.weakest.is_empty() {
        rows.push((
            "Practice",
            summary
                .weakest
                .iter()
                .map(|w| format!("{} ({}%)", w.word, w.score))
                .join(", "),
        ));
    }
    key_values(&rows)
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
