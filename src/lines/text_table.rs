//! Unified line-text table
//!
//! Builds the single ID → text lookup handed to the host runtime.
//! Fallback text comes from compiled units and exists unconditionally;
//! localized rows override it whenever the active locale supplies one.

use indexmap::IndexMap;

use super::{LineRecord, LocalizedRecord};

/// Two-tier builder for the merged line-text table.
///
/// Within each tier, later sources overwrite earlier ones per line ID.
/// A localized entry beats a fallback entry for the same ID no matter
/// the order the two tiers were fed in.
///
/// Rebuild from scratch whenever the active locale changes: an ID with
/// no row in the new locale must revert to its fallback text, which an
/// incremental patch cannot express.
#[derive(Clone, Debug, Default)]
pub struct TextTableBuilder {
    fallback: IndexMap<String, String>,
    localized: IndexMap<String, String>,
}

impl TextTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one fallback source (line rows from a compiled unit).
    pub fn add_fallback_lines(&mut self, lines: &[LineRecord]) -> &mut Self {
        for line in lines {
            self.fallback.insert(line.id.clone(), line.text.clone());
        }
        self
    }

    /// Apply one fallback source given as a raw ID → text mapping.
    pub fn add_fallback_entries<I>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (id, text) in entries {
            self.fallback.insert(id, text);
        }
        self
    }

    /// Apply one localized source.
    ///
    /// Rows with a blank ID are skipped; they are malformed but not worth
    /// failing a whole locale over.
    pub fn add_localized_records(&mut self, records: &[LocalizedRecord]) -> &mut Self {
        for record in records {
            if record.id.is_empty() {
                continue;
            }
            self.localized
                .insert(record.id.clone(), record.display_text());
        }
        self
    }

    /// Resolve the two tiers into the final table.
    pub fn build(self) -> IndexMap<String, String> {
        let mut table = self.fallback;
        for (id, text) in self.localized {
            table.insert(id, text);
        }
        table
    }
}

/// Text for `id`, or a bracketed placeholder when the table has no entry.
///
/// Hosts that would otherwise display nothing for a missing line can show
/// the raw ID instead of crashing or blanking the dialogue box.
pub fn text_or_placeholder(table: &IndexMap<String, String>, id: &str) -> String {
    table
        .get(id)
        .cloned()
        .unwrap_or_else(|| format!("[{id}]"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn line(id: &str, text: &str) -> LineRecord {
        LineRecord {
            id: id.to_string(),
            text: text.to_string(),
            file: String::new(),
            node: String::new(),
            line_number: 0,
        }
    }

    fn localized(id: &str, character: Option<&str>, text: &str) -> LocalizedRecord {
        LocalizedRecord {
            id: id.to_string(),
            character: character.map(str::to_string),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_localized_wins_over_fallback() {
        let mut builder = TextTableBuilder::new();
        builder.add_fallback_lines(&[line("line1", "Hello")]);
        builder.add_localized_records(&[localized("line1", None, "Bonjour")]);
        // A later, silent localized source does not undo the override.
        builder.add_localized_records(&[]);

        let table = builder.build();
        assert_eq!(table["line1"], "Bonjour");
    }

    #[test]
    fn test_localized_wins_regardless_of_tier_order() {
        let mut builder = TextTableBuilder::new();
        builder.add_localized_records(&[localized("line1", None, "Bonjour")]);
        builder.add_fallback_lines(&[line("line1", "Hello")]);

        let table = builder.build();
        assert_eq!(table["line1"], "Bonjour");
    }

    #[test]
    fn test_later_source_wins_within_a_tier() {
        let mut builder = TextTableBuilder::new();
        builder.add_fallback_lines(&[line("line1", "Hello")]);
        builder.add_fallback_lines(&[line("line1", "Hello again")]);

        let table = builder.build();
        assert_eq!(table["line1"], "Hello again");
    }

    #[test]
    fn test_blank_id_rows_are_skipped() {
        let mut builder = TextTableBuilder::new();
        builder.add_localized_records(&[localized("", None, "orphan"), localized("line1", None, "ok")]);

        let table = builder.build();
        assert_eq!(table.len(), 1);
        assert_eq!(table["line1"], "ok");
    }

    #[test]
    fn test_speaker_formatting_is_applied() {
        let mut builder = TextTableBuilder::new();
        builder.add_localized_records(&[
            localized("line2", Some("Bob"), "Hi"),
            localized("line3", Some(""), "Hi"),
        ]);

        let table = builder.build();
        assert_eq!(table["line2"], "Bob: Hi");
        assert_eq!(table["line3"], "Hi");
    }

    #[test]
    fn test_rebuild_reverts_to_fallback_when_locale_drops_a_line() {
        let fallback = [line("line1", "Hello"), line("line2", "Bye")];

        // First locale overrides both lines.
        let mut builder = TextTableBuilder::new();
        builder.add_fallback_lines(&fallback);
        builder.add_localized_records(&[
            localized("line1", None, "Bonjour"),
            localized("line2", None, "Au revoir"),
        ]);
        let table = builder.build();
        assert_eq!(table["line1"], "Bonjour");

        // The new locale only covers line2; line1 must revert.
        let mut builder = TextTableBuilder::new();
        builder.add_fallback_lines(&fallback);
        builder.add_localized_records(&[localized("line2", None, "Tschuss")]);
        let table = builder.build();
        assert_eq!(table["line1"], "Hello");
        assert_eq!(table["line2"], "Tschuss");
    }

    #[test]
    fn test_placeholder_for_missing_id() {
        let table = TextTableBuilder::new().build();
        assert_eq!(text_or_placeholder(&table, "line9"), "[line9]");
    }
}
