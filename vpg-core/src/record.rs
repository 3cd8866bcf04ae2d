//! Types and traits for recording training metrics.
//!
//! A [`Record`] is a key-value container of metrics produced during
//! training and evaluation (loss, mean return, render values). A
//! [`Recorder`] receives records from the training loop, while
//! [`RecordStorage`] aggregates stored scalars on flush. [`NullRecorder`]
//! discards everything and is useful for tests.
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;
mod storage;
pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
pub use storage::RecordStorage;
