use clap::{App, AppSettings, Arg, SubCommand};
use log::LevelFilter;
use serde::de::DeserializeOwned;

mod command_action;
mod command_assemble;
mod command_tally;
mod config;
mod rest;

use command_action::*;
use command_assemble::*;
use command_tally::*;
use config::Config;

#[tokio::main]
async fn main() {
    let matches = App::new("Vote Aggregator CLI")
        .version("0.1")
        .author("Patrick Hayes <patrick.d.hayes@gmail.com>")
        .about("Assembles partial vote transactions into a single transaction")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity"),
        )
        .subcommand(
            SubCommand::with_name("assemble")
                .about("Merge partial transactions into the vote cell")
                .arg(
                    Arg::with_name("QUERY")
                        .index(1)
                        .required(true)
                        .help("Search key locating the vote cell, JSON file"),
                )
                .arg(
                    Arg::with_name("FRAGMENTS")
                        .index(2)
                        .required(true)
                        .help("Partial transactions, JSON file holding an array"),
                )
                .arg(
                    Arg::with_name("indexer")
                        .long("indexer")
                        .takes_value(true)
                        .help("Set the indexer RPC uri - can also be set with VOTE_AGGREGATOR_INDEXER_URI"),
                )
                .arg(
                    Arg::with_name("cells")
                        .long("cells")
                        .takes_value(true)
                        .conflicts_with("indexer")
                        .help("Look up the vote cell in a JSON file of live cells instead of the indexer"),
                ),
        )
        .subcommand(
            SubCommand::with_name("tally")
                .about("Encode or decode vote cell data")
                .setting(AppSettings::SubcommandRequiredElseHelp)
                .subcommand(
                    SubCommand::with_name("decode")
                        .about("Print the counts held in vote cell data")
                        .arg(
                            Arg::with_name("DATA")
                                .index(1)
                                .required(true)
                                .help("Vote cell data, 0x-prefixed hex"),
                        ),
                )
                .subcommand(
                    SubCommand::with_name("encode")
                        .about("Print vote cell data for the given counts")
                        .arg(
                            Arg::with_name("COUNTS")
                                .index(1)
                                .multiple(true)
                                .help("One count per candidate"),
                        ),
                ),
        )
        .subcommand(
            SubCommand::with_name("action")
                .about("Print a witness casting one vote, for use as a fragment's first witness")
                .arg(
                    Arg::with_name("INDEX")
                        .index(1)
                        .required(true)
                        .help("Candidate index"),
                ),
        )
        .get_matches();

    let level = match matches.occurrences_of("v") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = Config::from_env();

    // Subcommands
    if let Some(matches) = matches.subcommand_matches("assemble") {
        command_assemble(matches, &config).await;
    }
    if let Some(matches) = matches.subcommand_matches("tally") {
        command_tally(matches);
    }
    if let Some(matches) = matches.subcommand_matches("action") {
        command_action(matches);
    }
}

pub fn expand(filename: &str) -> String {
    shellexpand::full(filename)
        .map(|expanded| expanded.into_owned())
        .unwrap_or_else(|_| filename.to_owned())
}

/// Read and parse a JSON file, exiting on failure
pub fn read_json<T: DeserializeOwned>(command: &str, filename: &str) -> T {
    let filename = expand(filename);

    let file_bytes = match std::fs::read(&filename) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("vote-aggregator {}: unable to read {}: {}", command, &filename, e);
            std::process::exit(1);
        }
    };

    serde_json::from_slice(&file_bytes).unwrap_or_else(|e| {
        eprintln!("vote-aggregator {}: unable to parse {}: {}", command, &filename, e);
        std::process::exit(1);
    })
}
