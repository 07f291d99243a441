use std::env::var;

pub const DEFAULT_INDEXER_URI: &str = "http://127.0.0.1:9115/indexer_rpc";

pub struct Config {
    pub indexer_uri: String,
}

impl Config {
    pub fn from_env() -> Self {
        let indexer_uri: String = match var("VOTE_AGGREGATOR_INDEXER_URI") {
            Ok(val) => val,
            Err(_e) => DEFAULT_INDEXER_URI.to_owned(),
        };

        Config { indexer_uri }
    }
}
