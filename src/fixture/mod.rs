//! Fixture files: one ordered scope of recorded HTTP calls per test.

pub mod format;
pub mod normalize;
pub mod recorder;
pub mod replayer;

pub use format::{Fixture, Scope};
pub use recorder::FixtureRecorder;
pub use replayer::FixtureReplayer;
