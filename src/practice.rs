//! A run through a list of target words, one recognized attempt per word.

use chrono::{DateTime, Local};
use itertools::Itertools;
use log::{debug, info, warn};
use serde::Serialize;

use crate::alignment::{align, AlignmentResult, Feedback};
use crate::error::Result;
use crate::recognizer::{Recognition, SpeechRecognizer};
use crate::util::{mean, scores_as_f64, std_dev};

#[derive(Debug, Clone, Serialize)]
pub struct Attempt {
    pub result: AlignmentResult,
    pub attempted_at: DateTime<Local>,
}

impl Attempt {
    pub fn new(result: AlignmentResult) -> Self {
        Self {
            result,
            attempted_at: Local::now(),
        }
    }
}

/// Progress notifications emitted while a session runs.
#[derive(Debug, Clone, Copy)]
pub enum PracticeEvent<'a> {
    /// About to listen for `word`.
    Prompt { word: &'a str, index: usize, total: usize },
    Scored(&'a Attempt),
    /// Nothing was heard; another listen follows.
    NoSpeech { word: &'a str, retries_left: usize },
    /// Nothing was heard and retries are exhausted.
    Skipped { word: &'a str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeakWord {
    pub word: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub attempted: usize,
    pub skipped: usize,
    pub mean_score: f64,
    pub score_std_dev: f64,
    pub good_count: usize,
    /// Words scored as needing practice, lowest score first.
    pub weakest: Vec<WeakWord>,
}

#[derive(Debug, Clone)]
pub struct PracticeSession {
    words: Vec<String>,
    retries_on_no_speech: usize,
    attempts: Vec<Attempt>,
    skipped: Vec<String>,
}

impl PracticeSession {
    /// Blank words are dropped; there is nothing to pronounce.
    pub fn new<I, S>(words: I, retries_on_no_speech: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words
            .into_iter()
            .map(Into::into)
            .filter(|w: &String| {
                let keep = !w.trim().is_empty();
                if !keep {
                    warn!("practice: dropping blank target word");
                }
                keep
            })
            .collect();

        Self {
            words,
            retries_on_no_speech,
            attempts: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn is_finished(&self) -> bool {
        self.attempts.len() + self.skipped.len() >= self.words.len()
    }

    /// Listen for every remaining word. Stops early when the recognizer
    /// reports [`Recognition::Closed`]; recognizer errors are propagated.
    pub fn run_with<S, F>(&mut self, recognizer: &mut S, mut on_event: F) -> Result<()>
    where
        S: SpeechRecognizer + ?Sized,
        F: FnMut(PracticeEvent<'_>),
    {
        let total = self.words.len();
        let start = self.attempts.len() + self.skipped.len();

        for index in start..total {
            let word = self.words[index].clone();
            on_event(PracticeEvent::Prompt {
                word: &word,
                index,
                total,
            });

            let mut retries_left = self.retries_on_no_speech;
            loop {
                match recognizer.recognize(&word)? {
                    Recognition::Heard(text) => {
                        let attempt = Attempt::new(align(&word, &text));
                        debug!(
                            "practice: {:?} heard as {:?}, score {}",
                            word, attempt.result.recognized_text, attempt.result.score
                        );
                        on_event(PracticeEvent::Scored(&attempt));
                        self.attempts.push(attempt);
                        break;
                    }
                    Recognition::NoSpeech if retries_left > 0 => {
                        retries_left -= 1;
                        on_event(PracticeEvent::NoSpeech {
                            word: &word,
                            retries_left,
                        });
                    }
                    Recognition::NoSpeech => {
                        warn!("practice: no speech for {word:?}, skipping");
                        on_event(PracticeEvent::Skipped { word: &word });
                        self.skipped.push(word);
                        break;
                    }
                    Recognition::Closed => {
                        info!(
                            "practice: recognizer closed after {} of {} words",
                            index, total
                        );
                        return Ok(());
                    }
                }
            }
        }

        Ok(())
    }

    pub fn summary(&self) -> SessionSummary {
        let scores = scores_as_f64(self.attempts.iter().map(|a| a.result.score));

        let weakest = self
            .attempts
            .iter()
            .filter(|a| a.result.feedback == Feedback::NeedsPractice)
            .map(|a| WeakWord {
                word: a.result.target_word.clone(),
                score: a.result.score,
            })
            .sorted_by(|a, b| a.score.cmp(&b.score).then_with(|| a.word.cmp(&b.word)))
            .collect();

        SessionSummary {
            attempted: self.attempts.len(),
            skipped: self.skipped.len(),
            mean_score: mean(&scores).unwrap_or(0.0),
            score_std_dev: std_dev(&scores).unwrap_or(0.0),
            good_count: self
                .attempts
                .iter()
                .filter(|a| a.result.feedback == Feedback::Good)
                .count(),
            weakest,
        }
    }
}
