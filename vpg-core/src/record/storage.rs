//! Record storage and aggregation.
use super::{Record, RecordValue};
use std::collections::HashSet;

/// Stores records and aggregates them on demand.
///
/// Scalar values are aggregated to their mean over the stored records;
/// other value types keep their most recent occurrence.
pub struct RecordStorage {
    data: Vec<Record>,
}

fn mean(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().sum::<f32>() / vs.len() as f32)
}

impl RecordStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Stores a record.
    pub fn store(&mut self, record: Record) {
        self.data.push(record);
    }

    /// Aggregates the stored records into a single record and clears the
    /// storage.
    pub fn aggregate(&mut self) -> Record {
        let mut keys = HashSet::new();
        for record in self.data.iter() {
            for k in record.keys() {
                keys.insert(k.clone());
            }
        }

        let mut aggregated = Record::empty();
        for key in keys {
            let mut scalars = Vec::new();
            let mut last = None;
            for record in self.data.iter() {
                match record.get(&key) {
                    Some(RecordValue::Scalar(v)) => scalars.push(*v),
                    Some(v) => last = Some(v.clone()),
                    None => {}
                }
            }
            if !scalars.is_empty() {
                aggregated.insert(key, mean(&scalars));
            } else if let Some(v) = last {
                aggregated.insert(key, v);
            }
        }

        self.data.clear();
        aggregated
    }
}

impl Default for RecordStorage {
    fn default() -> Self {
        Self::new()
    }
}
