//! Interfaces standing in for the speech and audio collaborators.
//!
//! The scoring code never reaches for a global recognizer: callers inject a
//! [`SpeechRecognizer`]. [`LineRecognizer`] reads transcripts from any
//! `BufRead` (stdin in the CLI), [`ScriptedRecognizer`] replays a fixed queue,
//! and [`RecordingRecognizer`] composes an [`AudioRecorder`] with a
//! [`Transcriber`] for real capture backends.

use std::collections::VecDeque;
use std::io::BufRead;

use log::debug;

use crate::error::Result;

/// What a single listen produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition {
    Heard(String),
    /// Listening finished without any speech.
    NoSpeech,
    /// The source has nothing more to give; stop asking.
    Closed,
}

pub trait SpeechRecognizer {
    /// Listen for one attempt at saying `target`.
    fn recognize(&mut self, target: &str) -> Result<Recognition>;
}

impl<S: SpeechRecognizer + ?Sized> SpeechRecognizer for Box<S> {
    fn recognize(&mut self, target: &str) -> Result<Recognition> {
        (**self).recognize(target)
    }
}

/// One transcript per line. Blank lines count as silence, EOF closes.
pub struct LineRecognizer<R: BufRead> {
    reader: R,
}

impl<R: BufRead> LineRecognizer<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> SpeechRecognizer for LineRecognizer<R> {
    fn recognize(&mut self, target: &str) -> Result<Recognition> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            debug!("recognizer: input closed while waiting for {target:?}");
            return Ok(Recognition::Closed);
        }

        let heard = line.trim_end_matches(&['\r', '\n'][..]);
        if heard.trim().is_empty() {
            Ok(Recognition::NoSpeech)
        } else {
            Ok(Recognition::Heard(heard.to_string()))
        }
    }
}

/// Replays canned recognitions, then reports [`Recognition::Closed`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedRecognizer {
    queue: VecDeque<Recognition>,
}

impl ScriptedRecognizer {
    pub fn new<I: IntoIterator<Item = Recognition>>(script: I) -> Self {
        Self {
            queue: script.into_iter().collect(),
        }
    }

    /// Convenience for scripts made only of heard transcripts.
    pub fn heard<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            transcripts
                .into_iter()
                .map(|t| Recognition::Heard(t.into())),
        )
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn recognize(&mut self, _target: &str) -> Result<Recognition> {
        Ok(self.queue.pop_front().unwrap_or(Recognition::Closed))
    }
}

/// Mono PCM captured by an [`AudioRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Clip {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Start/stop audio capture.
pub trait AudioRecorder {
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<Clip>;
}

/// Turns a captured clip into text.
pub trait Transcriber {
    fn transcribe(&self, clip: &Clip) -> Result<String>;
}

/// Records one clip per attempt and hands it to a transcriber.
pub struct RecordingRecognizer<A: AudioRecorder, T: Transcriber> {
    recorder: A,
    transcriber: T,
}

impl<A: AudioRecorder, T: Transcriber> RecordingRecognizer<A, T> {
    pub fn new(recorder: A, transcriber: T) -> Self {
        Self {
            recorder,
            transcriber,
        }
    }

    pub fn into_parts(self) -> (A, T) {
        (self.recorder, self.transcriber)
    }
}

impl<A: AudioRecorder, T: Transcriber> SpeechRecognizer for RecordingRecognizer<A, T> {
    fn recognize(&mut self, target: &str) -> Result<Recognition> {
        self.recorder.start()?;
        let clip = self.recorder.stop()?;
        debug!(
            "recognizer: captured {:.2}s for {target:?}",
            clip.duration_secs()
        );

        if clip.is_empty() {
            return Ok(Recognition::NoSpeech);
        }

        let text = self.transcriber.transcribe(&clip)?;
        if text.trim().is_empty() {
            Ok(Recognition::NoSpeech)
        } else {
            Ok(Recognition::Heard(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use assert_matches::assert_matches;
    use std::io::Cursor;

    #[test]
    fn line_recognizer_reads_until_eof() {
        let mut rec = LineRecognizer::new(Cursor::new("apple\n\n  Banana \r\n"));
        assert_eq!(
            rec.recognize("apple").unwrap(),
            Recognition::Heard("apple".into())
        );
        assert_eq!(rec.recognize("pear").unwrap(), Recognition::NoSpeech);
        assert_eq!(
            rec.recognize("banana").unwrap(),
            Recognition::Heard("  Banana ".into())
        );
        assert_eq!(rec.recognize("kiwi").unwrap(), Recognition::Closed);
    }

    #[test]
    fn scripted_recognizer_closes_when_exhausted() {
        let mut rec = ScriptedRecognizer::new([Recognition::NoSpeech]);
        assert_eq!(rec.remaining(), 1);
        assert_eq!(rec.recognize("a").unwrap(), Recognition::NoSpeech);
        assert_eq!(rec.recognize("a").unwrap(), Recognition::Closed);
    }

    struct FakeRecorder {
        clips: VecDeque<Clip>,
        started: usize,
    }

    impl AudioRecorder for FakeRecorder {
        fn start(&mut self) -> Result<()> {
            self.started += 1;
            Ok(())
        }

        fn stop(&mut self) -> Result<Clip> {
            self.clips
                .pop_front()
                .ok_or_else(|| Error::Recorder("no microphone".into()))
        }
    }

    struct EchoLength;

    impl Transcriber for EchoLength {
        fn transcribe(&self, clip: &Clip) -> Result<String> {
            if clip.samples.iter().all(|s| *s == 0.0) {
                Ok(String::new())
            } else {
                Ok(format!("{} samples", clip.samples.len()))
            }
        }
    }

    #[test]
    fn recording_recognizer_composes_recorder_and_transcriber() {
        let recorder = FakeRecorder {
            clips: VecDeque::from(vec![
                Clip::new(vec![0.1; 4], 16_000),
                Clip::new(vec![], 16_000),
                Clip::new(vec![0.0; 8], 16_000),
            ]),
            started: 0,
        };
        let mut rec = RecordingRecognizer::new(recorder, EchoLength);

        assert_eq!(
            rec.recognize("cat").unwrap(),
            Recognition::Heard("4 samples".into())
        );
        assert_eq!(rec.recognize("cat").unwrap(), Recognition::NoSpeech);
        assert_eq!(rec.recognize("cat").unwrap(), Recognition::NoSpeech);
        assert_matches!(rec.recognize("cat"), Err(Error::Recorder(_)));

        let (recorder, _) = rec.into_parts();
        assert_eq!(recorder.started, 4);
    }

    #[test]
    fn clip_duration() {
        assert_eq!(Clip::new(vec![0.0; 8_000], 16_000).duration_secs(), 0.5);
        assert_eq!(Clip::new(vec![0.0; 10], 0).duration_secs(), 0.0);
    }
}
