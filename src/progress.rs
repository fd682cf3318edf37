// src/progress.rs
use std::fmt;

/// The five round trips of one ISODISTORT session, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    Upload,
    Method,
    Subgroup,
    Distort,
    Display,
}

impl Step {
    pub const ALL: [Step; 5] = [Step::Upload, Step::Method, Step::Subgroup, Step::Distort, Step::Display];

    pub fn number(&self) -> usize {
        match self {
            Step::Upload => 1,
            Step::Method => 2,
            Step::Subgroup => 3,
            Step::Distort => 4,
            Step::Display => 5,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Upload => "upload parent",
            Step::Method => "select method",
            Step::Subgroup => "select distortion",
            Step::Distort => "select output format",
            Step::Display => "download output",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.number(), self.title())
    }
}

/// Lightweight progress reporting for a pipeline run.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of steps that will run.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one step's response has been read.
    fn step_done(&mut self, _step: Step) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
