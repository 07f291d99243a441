use vote_aggregator::{Action, JsonBytes, WitnessArgs};

pub fn command_action(matches: &clap::ArgMatches) {
    let index = matches.value_of("INDEX").unwrap_or_default();
    match action_witness(index) {
        Ok(witness) => println!("{}", witness),
        Err(e) => {
            eprintln!("vote-aggregator action: {}", e);
            std::process::exit(1);
        }
    }
}

/// Witness args whose `input_type` votes for candidate `index`
pub fn action_witness(index: &str) -> Result<JsonBytes, String> {
    let index: u32 = index
        .parse()
        .map_err(|e| format!("invalid candidate index {}: {}", index, e))?;
    WitnessArgs::for_action(Action::new(index))
        .to_bytes()
        .map(JsonBytes)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_witness() {
        assert_eq!(
            action_witness("1").unwrap().to_string(),
            "0x180000001000000010000000180000000400000001000000"
        );
        assert!(action_witness("one").is_err());
    }
}
