use crate::config::Config;
use crate::rest::IndexerRpc;
use vote_aggregator::{assemble, LiveCell, MemLookup, PartialTransaction, SearchKey};

pub async fn command_assemble(matches: &clap::ArgMatches<'_>, config: &Config) {
    let search_key: SearchKey =
        crate::read_json("assemble", matches.value_of("QUERY").unwrap_or_default());
    let fragments: Vec<PartialTransaction> =
        crate::read_json("assemble", matches.value_of("FRAGMENTS").unwrap_or_default());

    let result = match matches.value_of("cells") {
        Some(filename) => {
            let cells: Vec<LiveCell> = crate::read_json("assemble", filename);
            let lookup = MemLookup::from(cells);
            assemble(&lookup, &search_key, &fragments).await
        }
        None => {
            let uri = matches
                .value_of("indexer")
                .unwrap_or_else(|| config.indexer_uri.as_str());
            let lookup = IndexerRpc::new(uri);
            assemble(&lookup, &search_key, &fragments).await
        }
    };

    let tx = result.unwrap_or_else(|e| {
        eprintln!("vote-aggregator assemble: {} (code {})", e, e.code());
        std::process::exit(1);
    });

    match serde_json::to_string_pretty(&tx) {
        Ok(tx_json) => println!("{}", tx_json),
        Err(e) => {
            eprintln!("vote-aggregator assemble: unable to serialize transaction: {}", e);
            std::process::exit(1);
        }
    }
}
