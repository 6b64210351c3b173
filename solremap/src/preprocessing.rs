//! The `preprocessing` module provides the driver that applies the remapping table to
//! each input source file.  The remapping table loads once per invocation; every file
//! shares the same [`ImportRemapper`].

use crate::PreprocessCLArgs;
use solremap_lib::config::ProjectConfig;
use solremap_lib::error::SolremapError;
use solremap_lib::remapping::RemappingTable;
use solremap_lib::ImportRemapper;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Iterate through the files in the args.file_names vector and preprocess each file.
///
/// # Arguments
///
/// * `args` - The [`PreprocessCLArgs`] object.
pub fn preprocess_files(args: PreprocessCLArgs) -> Result<(), SolremapError> {
    let remappings_path = remappings_path_from_args(&args)?;

    let table = RemappingTable::load_from_file(&remappings_path)?;
    log::info!(
        "Loaded {} remapping entries from {}",
        table.len(),
        remappings_path.display()
    );

    let remapper = ImportRemapper::new(table);

    for file_name in &args.file_names {
        if args.stdout {
            let mut stdout = std::io::stdout();
            match preprocess_file_to_stream(file_name, &mut stdout, &remapper) {
                Ok(_) => continue,
                Err(e) => println!("Unable to preprocess {}: {}", file_name, e),
            }
        } else {
            match preprocess_file(file_name, &args.output_directory, &remapper) {
                Ok(output_file) => log::info!(
                    "Preprocessed {} to {}",
                    file_name,
                    output_file.display()
                ),
                Err(e) => println!("Unable to preprocess {}: {}", file_name, e),
            }
        }
    }

    Ok(())
}

/// Determine the remappings file path from the command-line arguments.
///
/// `--remappings` wins when given; otherwise the path comes from the configuration
/// file named by `--config`; otherwise the conventional `remappings.txt`.
fn remappings_path_from_args(args: &PreprocessCLArgs) -> Result<PathBuf, SolremapError> {
    if let Some(remappings) = &args.remappings {
        return Ok(PathBuf::from(remappings));
    }

    if let Some(config_file) = &args.config {
        let config = ProjectConfig::new_from_file(config_file)?;
        return Ok(config.remappings_file);
    }

    Ok(PathBuf::from("remappings.txt"))
}

/// Preprocess an individual file and write the result into `output_directory`.
///
/// # Arguments
///
/// * `file_name` - The path to the file to preprocess in the file system.
/// * `output_directory` - The path to the location to save the preprocessed file.
/// * `remapper` - The [`ImportRemapper`] shared by all files.
fn preprocess_file(
    file_name: &str,
    output_directory: &str,
    remapper: &ImportRemapper,
) -> Result<PathBuf, SolremapError> {
    let input_path = PathBuf::from(file_name);
    let base_file_name = match input_path.file_name() {
        Some(name) => name,
        None => {
            return Err(SolremapError::IO(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{file_name} does not name a file"),
            )))
        }
    };

    let out_dir = PathBuf::from(output_directory);
    std::fs::create_dir_all(&out_dir)?;

    let output_path = out_dir.join(base_file_name);

    let mut output = std::fs::File::create(&output_path)?;
    preprocess_file_to_stream(file_name, &mut output, remapper)?;

    Ok(output_path)
}

/// Preprocess an individual file and write the result to `stream`.
///
/// # Arguments
///
/// * `file_name` - The path to the file to preprocess in the file system.
/// * `stream` - The stream that will receive the preprocessed text.
/// * `remapper` - The [`ImportRemapper`] shared by all files.
fn preprocess_file_to_stream(
    file_name: &str,
    stream: &mut dyn Write,
    remapper: &ImportRemapper,
) -> Result<(), SolremapError> {
    let source = std::fs::read_to_string(Path::new(file_name))?;
    let transformed = remapper.transform_source(&source);

    stream.write_all(transformed.as_bytes())?;

    Ok(())
}
