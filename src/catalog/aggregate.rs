//! Aggregation of topic sources into one ordered collection.

use crate::domain::Record;

/// One topic's worth of records, as authored in a single file
#[derive(Debug, Clone)]
pub struct TopicSource<R> {
    /// Where the records came from (pack-relative path, or a label)
    pub name: String,

    /// Records in intended display order
    pub records: Vec<R>,
}

impl<R: Record> TopicSource<R> {
    /// Create a topic source
    pub fn new(name: impl Into<String>, records: Vec<R>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Concatenate sources in the order given.
///
/// Nothing is sorted or deduplicated: the result is every record of the
/// first source, then every record of the second, and so on.
pub fn aggregate<R: Record>(sources: Vec<TopicSource<R>>) -> Vec<R> {
    let total = sources.iter().map(TopicSource::len).sum();
    let mut records = Vec::with_capacity(total);

    for source in sources {
        records.extend(source.records);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Lesson;

    fn lesson(id: &str, order: u32) -> Lesson {
        Lesson::new(id, "CFP-GEN", format!("Lesson {}", id), order).with_area("GEN-1")
    }

    #[test]
    fn test_aggregate_preserves_source_then_record_order() {
        let sources = vec![
            TopicSource::new("b.yaml", vec![lesson("B-2", 2), lesson("B-1", 1)]),
            TopicSource::new("a.yaml", vec![lesson("A-1", 1)]),
        ];

        let ids: Vec<String> = aggregate(sources)
            .iter()
            .map(|l| l.id.to_string())
            .collect();

        // Not sorted by id or order
        assert_eq!(ids, vec!["B-2", "B-1", "A-1"]);
    }

    #[test]
    fn test_aggregate_empty_sources() {
        let sources: Vec<TopicSource<Lesson>> = vec![TopicSource::new("empty.yaml", Vec::new())];
        assert!(aggregate(sources).is_empty());
    }
}
