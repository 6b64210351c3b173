//! The `remappings_info` module provides code to output the parsed remapping table and
//! to check the remappings file for malformed entries.

use crate::RemappingsCLArgs;
use solremap_lib::error::SolremapError;
use solremap_lib::remapping::RemappingTable;
use std::path::Path;

/// Display information about the remapping table or check it for problems.
///
/// # Arguments
///
/// * `params` - The [`RemappingsCLArgs`] object.
pub fn display_remappings_info(params: RemappingsCLArgs) -> Result<(), SolremapError> {
    let table = RemappingTable::load_from_file(Path::new(&params.remappings))?;

    if params.list {
        display_remapping_list(&table);

        // Listing the table already shows the malformed entries, do not run the
        // check output as well even if params.check is true.
        return Ok(());
    }

    if params.check {
        check_remapping_table(&params.remappings, &table);
    }

    Ok(())
}

/// Print the table entries in file order, one per line.
fn display_remapping_list(table: &RemappingTable) {
    if table.is_empty() {
        println!("No remapping entries");
        return;
    }

    for entry in table.entries() {
        match &entry.replace {
            Some(replace) => println!("{} => {}", entry.find, replace),
            None => println!("{} => (no replacement, entry ignored)", entry.find),
        }
    }
}

/// Report entries that have no replacement text.
fn check_remapping_table(file_name: &str, table: &RemappingTable) {
    let malformed: Vec<&str> = table
        .entries()
        .iter()
        .filter(|e| e.replace.is_none())
        .map(|e| e.find.as_str())
        .collect();

    if malformed.is_empty() {
        println!(
            "{}: {} entries, all well-formed",
            file_name,
            table.len()
        );
        return;
    }

    println!(
        "{}: {} entries, {} without an '=' separator:",
        file_name,
        table.len(),
        malformed.len()
    );
    for find in malformed {
        println!("  {}", find);
    }
}
