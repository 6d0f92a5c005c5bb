// Library surface shared by the binary and the integration tests.
pub mod alignment;
pub mod config;
pub mod error;
pub mod practice;
pub mod recognizer;
pub mod report;
pub mod util;
pub mod words;

pub use alignment::{align, AlignmentResult, AlignmentSegment, Feedback, Operation};
pub use error::{Error, Result};
