//! Character-level pronunciation alignment.
//!
//! [`align`] compares a target word with the transcript a speech recognizer
//! produced for the learner's attempt. Both sides are trimmed and lower-cased,
//! a longest-common-subsequence table is built over their characters, and the
//! table is walked backwards to decide which target characters were heard.
//!
//! Characters the learner produced that have no counterpart in the target are
//! consumed silently: the walk never emits [`AlignmentSegment::Insert`]. When
//! the two sides differ, every unmatched target character is reported as a
//! [`AlignmentSegment::Replace`] carrying [`MISMATCH_MARKER`], whether it was
//! substituted or dropped.

use log::trace;
use serde::Serialize;
use strum_macros::Display;

/// Recognized-side annotation attached to every mismatched target character.
pub const MISMATCH_MARKER: &str = "wrong/missing sound";

/// Similarity strictly above this counts as [`Feedback::Good`].
pub const GOOD_THRESHOLD: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// One character-level verdict of an alignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum AlignmentSegment {
    /// Target character was heard.
    Equal { target: char },
    /// Target character was heard as something else (or not at all).
    Replace { target: char, recognized: String },
    /// Target character had no counterpart in the transcript.
    Delete { target: char },
    /// Extra recognized content with no target counterpart. Never produced by
    /// [`align`]; kept so renderers can match exhaustively.
    Insert { recognized: String },
}

impl AlignmentSegment {
    pub fn operation(&self) -> Operation {
        match self {
            AlignmentSegment::Equal { .. } => Operation::Equal,
            AlignmentSegment::Replace { .. } => Operation::Replace,
            AlignmentSegment::Delete { .. } => Operation::Delete,
            AlignmentSegment::Insert { .. } => Operation::Insert,
        }
    }

    pub fn target_char(&self) -> Option<char> {
        match self {
            AlignmentSegment::Equal { target }
            | AlignmentSegment::Replace { target, .. }
            | AlignmentSegment::Delete { target } => Some(*target),
            AlignmentSegment::Insert { .. } => None,
        }
    }

    pub fn recognized_text(&self) -> Option<&str> {
        match self {
            AlignmentSegment::Replace { recognized, .. }
            | AlignmentSegment::Insert { recognized } => Some(recognized),
            AlignmentSegment::Equal { .. } | AlignmentSegment::Delete { .. } => None,
        }
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, AlignmentSegment::Equal { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    #[strum(serialize = "good")]
    Good,
    #[strum(serialize = "needs practice")]
    NeedsPractice,
}

impl Feedback {
    pub fn from_similarity(similarity: f64) -> Self {
        if similarity > GOOD_THRESHOLD {
            Feedback::Good
        } else {
            Feedback::NeedsPractice
        }
    }
}

/// Outcome of scoring one recognized transcript against one target.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlignmentResult {
    pub target_word: String,
    pub recognized_text: String,
    pub segments: Vec<AlignmentSegment>,
    pub correct_count: usize,
    pub similarity: f64,
    pub score: u8,
    pub feedback: Feedback,
}

impl AlignmentResult {
    fn new(target_word: String, recognized_text: String, segments: Vec<AlignmentSegment>) -> Self {
        let target_len = target_word.chars().count();
        let correct_count = segments.iter().filter(|s| s.is_equal()).count();
        let similarity = if target_len == 0 {
            0.0
        } else {
            correct_count as f64 / target_len as f64
        };

        Self {
            target_word,
            recognized_text,
            segments,
            correct_count,
            similarity,
            score: (similarity * 100.0).round() as u8,
            feedback: Feedback::from_similarity(similarity),
        }
    }

    /// True when every target character was heard.
    pub fn is_perfect(&self) -> bool {
        !self.segments.is_empty() && self.segments.iter().all(AlignmentSegment::is_equal)
    }

    /// Target positions (in characters) the learner got wrong.
    pub fn mismatch_positions(&self) -> Vec<usize> {
        self.segments
            .iter()
            .filter(|s| s.target_char().is_some())
            .enumerate()
            .filter(|(_, s)| !s.is_equal())
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Trim and lower-case, the way both sides are compared.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

/// Align `recognized` against `target` and score it.
///
/// Total over all inputs: an empty target yields no segments and a zero
/// score, an empty transcript marks every target character as mismatched.
pub fn align(target: &str, recognized: &str) -> AlignmentResult {
    let target_word = normalize(target);
    let recognized_text = normalize(recognized);

    let target_chars: Vec<char> = target_word.chars().collect();
    let recognized_chars: Vec<char> = recognized_text.chars().collect();

    let raw = raw_alignment(&target_chars, &recognized_chars);
    let segments = if target_word == recognized_text {
        raw
    } else {
        raw.into_iter().map(mark_mismatch).collect()
    };

    let result = AlignmentResult::new(target_word, recognized_text, segments);
    trace!(
        "aligned {:?} against {:?}: {}/{} correct",
        result.target_word,
        result.recognized_text,
        result.correct_count,
        target_chars.len()
    );
    result
}

fn mark_mismatch(segment: AlignmentSegment) -> AlignmentSegment {
    match segment {
        AlignmentSegment::Delete { target } | AlignmentSegment::Replace { target, .. } => {
            AlignmentSegment::Replace {
                target,
                recognized: MISMATCH_MARKER.to_string(),
            }
        }
        other => other,
    }
}

/// Backward walk over the LCS table, producing only `Equal` and `Delete`.
fn raw_alignment(target: &[char], recognized: &[char]) -> Vec<AlignmentSegment> {
    if target.is_empty() {
        return Vec::new();
    }
    if recognized.is_empty() {
        return target
            .iter()
            .map(|&c| AlignmentSegment::Delete { target: c })
            .collect();
    }

    let table = LcsTable::build(target, recognized);
    let mut segments = Vec::with_capacity(target.len());
    let (mut i, mut j) = (target.len(), recognized.len());

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && target[i - 1] == recognized[j - 1] {
            segments.push(AlignmentSegment::Equal {
                target: target[i - 1],
            });
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table.get(i, j - 1) >= table.get(i - 1, j)) {
            // extra recognized sound, not attributed to any target char
            j -= 1;
        } else {
            segments.push(AlignmentSegment::Delete {
                target: target[i - 1],
            });
            i -= 1;
        }
    }

    segments.reverse();
    segments
}

/// `(n + 1) x (m + 1)` longest-common-subsequence lengths, row-major.
struct LcsTable {
    cols: usize,
    cells: Vec<usize>,
}

impl LcsTable {
    fn build(target: &[char], recognized: &[char]) -> Self {
        let cols = recognized.len() + 1;
        let mut cells = vec![0; (target.len() + 1) * cols];

        for i in 1..=target.len() {
            for j in 1..=recognized.len() {
                cells[i * cols + j] = if target[i - 1] == recognized[j - 1] {
                    cells[(i - 1) * cols + (j - 1)] + 1
                } else {
                    cells[(i - 1) * cols + j].max(cells[i * cols + (j - 1)])
                };
            }
        }

        Self { cols, cells }
    }

    fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j]
    }
}
