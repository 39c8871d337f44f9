//! Command-line surface

use crate::config::{ExtractConfig, FileConfig, DEFAULT_INPUT};
use crate::error::ExtractError;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Build the `oscal-extract` command
#[must_use]
pub fn command() -> Command {
    Command::new("oscal-extract")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract specific controls from an OSCAL catalog JSON file")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_parser(value_parser!(PathBuf))
                .help(format!("Input catalog JSON file path (default: {DEFAULT_INPUT})")),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(value_parser!(PathBuf))
                .help("Output file path for filtered controls (default: <input stem>-filtered.json)"),
        )
        .arg(
            Arg::new("controls")
                .short('c')
                .long("controls")
                .num_args(0..)
                .value_delimiter(',')
                .action(ArgAction::Append)
                .help("Custom list of control IDs to extract (overrides default list)"),
        )
        .arg(
            Arg::new("summary")
                .short('s')
                .long("summary")
                .action(ArgAction::SetTrue)
                .help("Print summary of extracted controls"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("TOML file with input, output, controls and summary settings"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging (RUST_LOG takes precedence)"),
        )
}

/// Resolve the run configuration: defaults, then `--config`, then flags
///
/// An empty `--controls` keeps whatever list the lower layers provide.
///
/// # Errors
/// `ExtractError::Config` if the config file cannot be loaded.
pub fn config_from_matches(matches: &ArgMatches) -> Result<ExtractConfig, ExtractError> {
    let mut config = ExtractConfig::default();

    if let Some(path) = matches.get_one::<PathBuf>("config") {
        config = config.merge_file(FileConfig::load(path)?);
    }

    if let Some(input) = matches.get_one::<PathBuf>("input") {
        config = config.with_input(input.clone());
    }
    if let Some(output) = matches.get_one::<PathBuf>("output") {
        config = config.with_output(output.clone());
    }

    let controls: Vec<String> = matches
        .get_many::<String>("controls")
        .into_iter()
        .flatten()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    if !controls.is_empty() {
        config = config.with_control_ids(controls);
    }

    if matches.get_flag("summary") {
        config = config.with_summary(true);
    }

    Ok(config)
}
