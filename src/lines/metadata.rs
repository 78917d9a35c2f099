//! Unified line-metadata table
//!
//! Merges per-line tag sets from every source into the single lookup the
//! host runtime stores, one space-joined string per line.

use indexmap::IndexMap;

use super::{is_line_id_tag, LineMetadataRecord};

/// Builder for the merged line ID → tag set table.
///
/// A later record for the same ID replaces the whole tag set; tag sets
/// from different records are never unioned. Tags restating the line's
/// own ID (`line:` prefix) are filtered before storage. Tag order within
/// a set is insertion order from the winning record.
#[derive(Clone, Debug, Default)]
pub struct MetadataTableBuilder {
    entries: IndexMap<String, Vec<String>>,
}

impl MetadataTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one metadata source.
    pub fn add_records(&mut self, records: &[LineMetadataRecord]) -> &mut Self {
        for record in records {
            let tags: Vec<String> = record
                .tags
                .iter()
                .filter(|tag| !is_line_id_tag(tag))
                .cloned()
                .collect();
            self.entries.insert(record.id.clone(), tags);
        }
        self
    }

    /// The merged table, tag order preserved from the winning record.
    pub fn build(self) -> IndexMap<String, Vec<String>> {
        self.entries
    }

    /// The merged table in the space-joined form the host runtime stores.
    pub fn build_joined(self) -> IndexMap<String, String> {
        self.entries
            .into_iter()
            .map(|(id, tags)| (id, tags.join(" ")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: &str, tags: &[&str]) -> LineMetadataRecord {
        LineMetadataRecord {
            id: id.to_string(),
            node: String::new(),
            line_number: 0,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    #[test]
    fn test_line_id_tags_are_filtered() {
        let mut builder = MetadataTableBuilder::new();
        builder.add_records(&[record("line1", &["line:01f8b99", "exit"])]);

        let table = builder.build();
        assert_eq!(table["line1"], vec!["exit".to_string()]);
    }

    #[test]
    fn test_later_record_replaces_whole_set() {
        let mut builder = MetadataTableBuilder::new();
        builder.add_records(&[record("line1", &["exit", "whisper"])]);
        builder.add_records(&[record("line1", &["shout"])]);

        let table = builder.build();
        assert_eq!(table["line1"], vec!["shout".to_string()]);
    }

    #[test]
    fn test_tag_order_is_preserved() {
        let mut builder = MetadataTableBuilder::new();
        builder.add_records(&[record("line1", &["b", "line:x", "a", "c"])]);

        let table = builder.build();
        assert_eq!(table["line1"], vec!["b", "a", "c"]);
    }

    #[test]
    fn test_joined_form() {
        let mut builder = MetadataTableBuilder::new();
        builder.add_records(&[
            record("line1", &["exit", "whisper"]),
            record("line2", &["line:abc"]),
        ]);

        let joined = builder.build_joined();
        assert_eq!(joined["line1"], "exit whisper");
        // A set emptied by filtering is still stored.
        assert_eq!(joined["line2"], "");
    }
}
