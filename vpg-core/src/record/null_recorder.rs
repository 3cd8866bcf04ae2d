//! A recorder that discards all records.
use super::{Record, Recorder};

/// Discards all records. Useful for tests.
pub struct NullRecorder {}

impl Recorder for NullRecorder {
    fn write(&mut self, _record: Record) {}

    fn store(&mut self, _record: Record) {}

    fn flush(&mut self, _step: i64) {}
}
