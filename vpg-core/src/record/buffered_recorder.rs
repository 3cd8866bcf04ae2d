//! A recorder aggregating stored records in memory.
use super::{Record, RecordStorage, Recorder, RecordValue};
use log::info;

/// Buffers stored records and writes their aggregation on flush.
///
/// Aggregated scalars are written through the `log` facade at info level,
/// one line per flush, which is the console-printable per-epoch summary of
/// the training loop.
pub struct BufferedRecorder {
    storage: RecordStorage,
    /// Flushed records, in flush order. Retained for inspection after
    /// training, e.g. handing a metric sequence to plotting.
    history: Vec<(i64, Record)>,
}

impl BufferedRecorder {
    /// Creates a recorder with empty storage.
    pub fn new() -> Self {
        Self {
            storage: RecordStorage::new(),
            history: Vec::new(),
        }
    }

    /// The flushed records with their steps, in flush order.
    pub fn history(&self) -> &[(i64, Record)] {
        &self.history
    }

    /// The sequence of values of a scalar metric over the flushed records.
    pub fn scalar_series(&self, key: &str) -> Vec<f32> {
        self.history
            .iter()
            .filter_map(|(_, r)| r.get_scalar(key).ok())
            .collect()
    }
}

impl Default for BufferedRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder for BufferedRecorder {
    fn write(&mut self, record: Record) {
        for (k, v) in record.iter() {
            if let RecordValue::Scalar(v) = v {
                info!("{}: {}", k, v);
            }
        }
    }

    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, step: i64) {
        let record = self.storage.aggregate();
        self.history.push((step, record));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_keeps_a_metric_series() {
        let mut recorder = BufferedRecorder::new();
        for (i, loss) in [0.5, 0.25].iter().enumerate() {
            recorder.store(Record::from_scalar("loss", *loss));
            recorder.flush(i as i64);
        }

        assert_eq!(recorder.scalar_series("loss"), vec![0.5, 0.25]);
        assert_eq!(recorder.history().len(), 2);
    }
}
