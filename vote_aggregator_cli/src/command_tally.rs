use std::str::FromStr;
use vote_aggregator::{Error, JsonBytes, VoteTally};

pub fn command_tally(matches: &clap::ArgMatches) {
    if let Some(matches) = matches.subcommand_matches("decode") {
        let data = matches.value_of("DATA").unwrap_or_default();
        match decode_tally(data) {
            Ok(tally) => println!("{}", serde_json::json!(tally)),
            Err(e) => {
                eprintln!("vote-aggregator tally decode: {}", e);
                std::process::exit(1);
            }
        }
    }

    if let Some(matches) = matches.subcommand_matches("encode") {
        let counts: Vec<&str> = matches.values_of("COUNTS").into_iter().flatten().collect();
        match encode_tally(&counts) {
            Ok(data) => println!("{}", data),
            Err(e) => {
                eprintln!("vote-aggregator tally encode: {}", e);
                std::process::exit(1);
            }
        }
    }
}

pub fn decode_tally(data: &str) -> Result<VoteTally, Error> {
    let bytes = JsonBytes::from_str(data.trim())?;
    VoteTally::from_bytes(bytes.as_bytes())
}

pub fn encode_tally(counts: &[&str]) -> Result<JsonBytes, String> {
    let counts = counts
        .iter()
        .map(|count| {
            count
                .parse::<u32>()
                .map_err(|e| format!("invalid count {}: {}", count, e))
        })
        .collect::<Result<Vec<u32>, String>>()?;
    Ok(JsonBytes(VoteTally::new(counts).to_bytes()))
}
