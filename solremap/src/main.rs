//! The main module contains the code to process the command line for the solremap program
//! and run the requested preprocessing or configuration service.

mod config_info;
mod preprocessing;
mod remappings_info;

use crate::config_info::display_config_info;
use crate::preprocessing::preprocess_files;
use crate::remappings_info::display_remappings_info;
use chrono::Local;
use clap::{ArgGroup, Args, Parser, Subcommand};
use env_logger::TimestampPrecision;
use std::io::Write;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "Import-remapping preprocessor and configuration checker for Solidity projects.")]
#[command(propagate_version = true)]
struct SolremapCommand {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    Preprocess(PreprocessCLArgs),
    Remappings(RemappingsCLArgs),
    Config(ConfigCLArgs),
}

/// Arguments for preprocessing source files with the remapping table.
#[derive(Args, Debug, Clone)]
pub struct PreprocessCLArgs {
    /// Directory to store preprocessed sources
    #[arg(short, long, default_value = "preprocessed")]
    pub output_directory: String,

    /// Input file(s) to preprocess
    #[arg(short, long, required = true)]
    pub file_names: Vec<String>,

    /// Remappings file (overrides the path from the configuration file)
    #[arg(long)]
    pub remappings: Option<String>,

    /// Project configuration file supplying the remappings path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Write output to stdout instead of the directory given in `output_directory`.
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for inspecting the remapping table.
#[derive(Args, Debug, Clone)]
#[command(group(
ArgGroup::new("info")
.required(true)
.args(["list", "check"]),
))]
pub struct RemappingsCLArgs {
    /// List the parsed remapping entries in file order
    #[arg(short, long)]
    pub list: bool,

    /// Check the remappings file for malformed entries
    #[arg(short, long)]
    pub check: bool,

    /// Remappings file
    #[arg(long, default_value = "remappings.txt")]
    pub remappings: String,
}

/// Arguments for showing and checking the project configuration.
#[derive(Args, Debug, Clone)]
#[command(group(
ArgGroup::new("info")
.required(true)
.args(["show", "check"]),
))]
pub struct ConfigCLArgs {
    /// Project configuration file
    #[arg(short, long, default_value = "solremap.json")]
    pub config: String,

    /// Print the loaded configuration as JSON
    #[arg(short, long)]
    pub show: bool,

    /// Resolve a network against the environment and report problems
    #[arg(long)]
    pub check: bool,

    /// Network to check, defaults to the configuration's default network
    #[arg(short, long)]
    pub network: Option<String>,
}

fn main() {
    let _ = env_logger::builder()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .format_timestamp(Some(TimestampPrecision::Seconds))
        .try_init();

    let solremap_command = SolremapCommand::parse();
    match &solremap_command.command {
        Commands::Preprocess(preprocess_args) => {
            if let Err(e) = preprocess_files(preprocess_args.clone()) {
                println!("Unable to preprocess sources: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Remappings(remappings_args) => {
            if let Err(e) = display_remappings_info(remappings_args.clone()) {
                println!("Unable to inspect remappings: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Config(config_args) => {
            if let Err(e) = display_config_info(config_args.clone()) {
                println!("Configuration error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
