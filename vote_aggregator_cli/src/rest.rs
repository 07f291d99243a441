use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use vote_aggregator::{CellLookup, Error, LiveCell, SearchKey, Uint32};

#[derive(Serialize, Debug)]
struct RpcRequest<'a> {
    id: u64,
    jsonrpc: &'static str,
    method: &'static str,
    params: (&'a SearchKey, &'static str, Uint32),
}

#[derive(Deserialize, Debug)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Deserialize, Debug)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Deserialize, Debug)]
struct Pagination {
    objects: Vec<LiveCell>,
}

/// Cell lookup backed by the chain indexer's `get_cells` JSON-RPC method
pub struct IndexerRpc {
    uri: String,
    client: reqwest::Client,
}

impl IndexerRpc {
    pub fn new(uri: &str) -> Self {
        IndexerRpc {
            uri: uri.to_owned(),
            client: reqwest::Client::new(),
        }
    }
}

fn get_cells_request(search_key: &SearchKey, limit: usize) -> RpcRequest {
    RpcRequest {
        id: 2,
        jsonrpc: "2.0",
        method: "get_cells",
        params: (
            search_key,
            "desc",
            Uint32(u32::try_from(limit).unwrap_or(u32::MAX)),
        ),
    }
}

fn lookup_error(e: reqwest::Error) -> Error {
    Error::Lookup(e.to_string())
}

#[async_trait]
impl CellLookup for IndexerRpc {
    async fn get_cells(&self, search_key: &SearchKey, limit: usize) -> Result<Vec<LiveCell>, Error> {
        let request = get_cells_request(search_key, limit);
        debug!("indexer {}: get_cells limit {}", self.uri, limit);

        let response: RpcResponse<Pagination> = self
            .client
            .post(&self.uri)
            .json(&request)
            .send()
            .await
            .map_err(lookup_error)?
            .error_for_status()
            .map_err(lookup_error)?
            .json()
            .await
            .map_err(lookup_error)?;

        match response {
            RpcResponse {
                error: Some(err), ..
            } => Err(Error::Lookup(format!(
                "indexer error {}: {}",
                err.code, err.message
            ))),
            RpcResponse {
                result: Some(page), ..
            } => Ok(page.objects),
            _ => Err(Error::Lookup("indexer returned an empty response".to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vote_aggregator::{JsonBytes, Script, ScriptHashType, ScriptType, H256};

    #[test]
    fn test_get_cells_request() {
        let search_key = SearchKey {
            script: Script {
                code_hash: H256([0x51; 32]),
                hash_type: ScriptHashType::Type,
                args: JsonBytes(vec![0xee]),
            },
            script_type: ScriptType::Type,
        };

        let request = serde_json::to_value(get_cells_request(&search_key, 2)).unwrap();
        assert_eq!(request["method"], "get_cells");
        assert_eq!(request["jsonrpc"], "2.0");
        assert_eq!(request["params"][0]["script_type"], "type");
        assert_eq!(request["params"][0]["script"]["args"], "0xee");
        assert_eq!(request["params"][1], "desc");
        assert_eq!(request["params"][2], "0x2");
    }

    #[test]
    fn test_get_cells_response() {
        let body = serde_json::json!({
            "id": 2,
            "jsonrpc": "2.0",
            "result": {
                "last_cursor": "0x00",
                "objects": [{
                    "block_number": "0x5",
                    "out_point": {
                        "tx_hash": format!("0x{}", "cc".repeat(32)),
                        "index": "0x0"
                    },
                    "output": {
                        "capacity": "0x2e90edd000",
                        "lock": {
                            "code_hash": format!("0x{}", "9b".repeat(32)),
                            "hash_type": "type",
                            "args": "0x"
                        },
                        "type": null
                    },
                    "output_data": "0x0200000005000000020000000",
                    "tx_index": "0x1"
                }]
            }
        });

        // Odd-length data is not valid hex
        assert!(serde_json::from_value::<RpcResponse<Pagination>>(body.clone()).is_err());

        let mut body = body;
        body["result"]["objects"][0]["output_data"] = "0x020000000500000002000000".into();
        let response: RpcResponse<Pagination> = serde_json::from_value(body).unwrap();
        let page = response.result.unwrap();
        assert_eq!(page.objects.len(), 1);
        assert_eq!(page.objects[0].output_data.len(), 12);

        let error: RpcResponse<Pagination> = serde_json::from_value(serde_json::json!({
            "id": 2,
            "jsonrpc": "2.0",
            "error": { "code": -32602, "message": "Invalid params" }
        }))
        .unwrap();
        assert!(error.result.is_none());
        assert_eq!(error.error.unwrap().code, -32602);
    }
}
