//! The `remapping` module contains the remapping table the preprocessor uses to rewrite
//! import paths.  The table comes from a flat text file (conventionally `remappings.txt`)
//! with one `find=replace` pair per line.

use crate::error::SolremapError;
use std::path::Path;

/// A single remapping entry: rewrite occurrences of `find` to `replace`.
///
/// A mapping line with no `=` separator produces an entry with no replacement text.
/// The table keeps such entries so callers can report them, but the preprocessor
/// skips them.
#[derive(Debug, Clone, PartialEq)]
pub struct Remapping {
    /// The text to search for.
    pub find: String,

    /// The replacement text, absent when the mapping line had no `=`.
    pub replace: Option<String>,
}

impl Remapping {
    /// Parse one trimmed mapping line into an entry by splitting on the first `=`.
    /// Returns `None` for a line that is empty after trimming.
    fn from_line(line: &str) -> Option<Remapping> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        match trimmed.split_once('=') {
            Some((find, replace)) => Some(Remapping {
                find: String::from(find),
                replace: Some(String::from(replace)),
            }),
            None => Some(Remapping {
                find: String::from(trimmed),
                replace: None,
            }),
        }
    }
}

/// An ordered sequence of remapping entries.
///
/// Order matters: the preprocessor applies entries in file order, each entry
/// operating on the output of the previous one.  The table performs no
/// deduplication.
#[derive(Debug, Clone, Default)]
pub struct RemappingTable {
    entries: Vec<Remapping>,
}

impl RemappingTable {
    /// Create an empty table.  An empty table makes the preprocessor the identity
    /// function for every input line.
    pub fn new() -> RemappingTable {
        RemappingTable {
            entries: Vec::new(),
        }
    }

    /// Parse the text of a mapping file into a table.
    ///
    /// Blank and whitespace-only lines do not produce entries.  Each remaining line
    /// is trimmed and then split on its first `=`.  Parsing never fails; a line with
    /// no `=` yields an entry with no replacement text.
    ///
    /// # Arguments
    ///
    /// * `text` - The full text of the mapping file.
    pub fn from_text(text: &str) -> RemappingTable {
        let entries: Vec<Remapping> = text.split('\n').filter_map(Remapping::from_line).collect();

        for entry in entries.iter().filter(|e| e.replace.is_none()) {
            log::warn!("Remapping entry '{}' has no '=' separator, ignoring", entry.find);
        }

        RemappingTable { entries }
    }

    /// Load and parse the mapping file at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the mapping file in the file system.
    ///
    /// # Errors
    ///
    /// Returns [`SolremapError::RemappingsFile`] when the file is missing or
    /// unreadable.  The caller should treat the error as fatal for the build step
    /// that requested preprocessing.
    pub fn load_from_file(path: &Path) -> Result<RemappingTable, SolremapError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SolremapError::RemappingsFile(String::from(path.to_string_lossy()), e)
        })?;

        log::debug!("Loaded remappings from {}", path.display());
        Ok(RemappingTable::from_text(&text))
    }

    /// Return the entries in file order.
    pub fn entries(&self) -> &[Remapping] {
        &self.entries
    }

    /// Return the number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_remapping_table_basic_parse() {
        let table = RemappingTable::from_text("@openzeppelin/=node_modules/@openzeppelin/\n");

        assert_eq!(table.len(), 1);
        let entry = &table.entries()[0];
        assert_eq!(entry.find, "@openzeppelin/");
        assert_eq!(entry.replace.as_deref(), Some("node_modules/@openzeppelin/"));
    }

    #[test]
    fn test_remapping_table_preserves_order() {
        let table = RemappingTable::from_text("b=2\na=1\nc=3\n");

        let finds: Vec<&str> = table.entries().iter().map(|e| e.find.as_str()).collect();
        assert_eq!(finds, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_remapping_table_skips_blank_lines() {
        let table = RemappingTable::from_text("\na=1\n\n   \nb=2\n\n");

        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].find, "a");
        assert_eq!(table.entries()[1].find, "b");
    }

    #[test]
    fn test_remapping_table_trims_lines() {
        let table = RemappingTable::from_text("  lib/=vendor/lib/  \n");

        assert_eq!(table.entries()[0].find, "lib/");
        assert_eq!(table.entries()[0].replace.as_deref(), Some("vendor/lib/"));
    }

    #[test]
    fn test_remapping_table_splits_on_first_equals() {
        let table = RemappingTable::from_text("a=b=c\n");

        assert_eq!(table.entries()[0].find, "a");
        assert_eq!(table.entries()[0].replace.as_deref(), Some("b=c"));
    }

    #[test]
    fn test_remapping_table_line_without_equals() {
        let table = RemappingTable::from_text("onlyfindnoequals\n");

        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].find, "onlyfindnoequals");
        assert!(table.entries()[0].replace.is_none());
    }

    #[test]
    fn test_remapping_table_empty_text() {
        let table = RemappingTable::from_text("");
        assert!(table.is_empty());

        let table = RemappingTable::from_text("\n\n   \n");
        assert!(table.is_empty());
    }

    #[test]
    fn test_remapping_table_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("remappings.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "@openzeppelin/=node_modules/@openzeppelin/").unwrap();

        let table = RemappingTable::load_from_file(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].find, "@openzeppelin/");
    }

    #[test]
    fn test_remapping_table_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_file.txt");

        let result = RemappingTable::load_from_file(&path);
        assert!(matches!(result, Err(SolremapError::RemappingsFile(_, _))));
    }
}
