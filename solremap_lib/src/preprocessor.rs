//! The `preprocessor` module provides [`ImportRemapper`], the line-oriented transform
//! that rewrites import paths in Solidity source text using a [`RemappingTable`].

use crate::remapping::RemappingTable;
use regex::Regex;

/// Pattern for an import declaration: optional leading whitespace, the literal word
/// `import`, then a space.  Case-insensitive.
static IMPORT_LINE_PATTERN: &str = r"(?i)^\s*import ";

/// A preprocessor that rewrites the import lines of a source file.
///
/// Construct one remapper per process and reuse it for every source file; the
/// remapping table and the import pattern are prepared once at construction.
pub struct ImportRemapper {
    /// The remapping entries, in file order.
    table: RemappingTable,

    /// Compiled import-declaration pattern.
    import_line: Regex,
}

impl ImportRemapper {
    /// Create a new remapper that owns `table`.
    ///
    /// # Arguments
    ///
    /// * `table` - The remapping table to apply to import lines.
    pub fn new(table: RemappingTable) -> ImportRemapper {
        ImportRemapper {
            table,
            // The pattern is a fixed literal, compilation cannot fail.
            import_line: Regex::new(IMPORT_LINE_PATTERN).unwrap(),
        }
    }

    /// Return the remapping table in use.
    pub fn table(&self) -> &RemappingTable {
        &self.table
    }

    /// Return true if `line` is an import declaration.
    pub fn is_import_line(&self, line: &str) -> bool {
        self.import_line.is_match(line)
    }

    /// Transform one line of source text.
    ///
    /// Lines that are not import declarations come back unchanged.  For an import
    /// line the remapper walks the table in order and substitutes each matching
    /// entry; substitutions are cumulative, so later entries see the output of
    /// earlier ones.  Entries with no replacement text are skipped.
    ///
    /// # Arguments
    ///
    /// * `line` - The line to transform, without its line terminator.
    pub fn transform_line(&self, line: &str) -> String {
        if !self.is_import_line(line) {
            return String::from(line);
        }

        let mut current = String::from(line);
        for entry in self.table.entries() {
            let replace = match &entry.replace {
                Some(r) => r,
                None => continue,
            };
            current = substitute_first(&current, &entry.find, replace);
        }

        current
    }

    /// Transform a complete source text line-by-line, preserving the line structure
    /// of the input (including the presence or absence of a trailing newline).
    ///
    /// # Arguments
    ///
    /// * `text` - The full source text.
    pub fn transform_source(&self, text: &str) -> String {
        let transformed: Vec<String> = text
            .split('\n')
            .map(|line| self.transform_line(line))
            .collect();

        transformed.join("\n")
    }
}

/// Replace the first occurrence of `find` anywhere in `line` with `replace`.
///
/// The match is a plain substring match over the whole line, not anchored to the
/// import path token.  A find-string appearing in a trailing comment on the same
/// line is rewritten too; callers that need path-anchored matching should swap this
/// function out.
fn substitute_first(line: &str, find: &str, replace: &str) -> String {
    line.replacen(find, replace, 1)
}
