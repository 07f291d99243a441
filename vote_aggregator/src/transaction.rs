use crate::*;

/// Transaction version emitted by the assembler
pub const TX_VERSION: u32 = 0;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScriptHashType {
    Data,
    Type,
    Data1,
    Data2,
}

/// A lock or type script
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Script {
    pub code_hash: H256,
    pub hash_type: ScriptHashType,
    pub args: JsonBytes,
}

/// Reference to a transaction output
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OutPoint {
    pub tx_hash: H256,
    pub index: Uint32,
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DepType {
    Code,
    DepGroup,
}

/// A cell dependency
///
/// Two dependencies are the same dependency when every field is equal after parsing,
/// so `0x01` and `0x1` as an index name the same cell.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellDep {
    pub out_point: OutPoint,
    pub dep_type: DepType,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellInput {
    pub previous_output: OutPoint,
    pub since: Uint64,
}

impl CellInput {
    /// Consume a cell with no time lock
    pub fn new(previous_output: OutPoint) -> Self {
        CellInput {
            previous_output,
            since: Uint64(0),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellOutput {
    pub capacity: Uint64,
    pub lock: Script,

    #[serde(rename = "type", default)]
    pub type_: Option<Script>,
}

/// A fragment of a transaction submitted by a single voter.
///
/// `witnesses[i]` belongs to `inputs[i]`; the first witness carries the voter's action.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialTransaction {
    #[serde(default)]
    pub cell_deps: Vec<CellDep>,

    /// Accepted but never carried into the assembled transaction
    #[serde(default)]
    pub header_deps: Vec<H256>,

    pub inputs: Vec<CellInput>,
    pub outputs: Vec<CellOutput>,

    #[serde(default)]
    pub outputs_data: Vec<JsonBytes>,

    pub witnesses: Vec<JsonBytes>,
}

/// The combined transaction.
///
/// Input 0, output 0 and witness 0 belong to the vote cell; everything after them comes
/// from the fragments, in request order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AssembledTransaction {
    pub version: Uint32,
    pub cell_deps: Vec<CellDep>,
    pub header_deps: Vec<H256>,
    pub inputs: Vec<CellInput>,
    pub outputs: Vec<CellOutput>,
    pub outputs_data: Vec<JsonBytes>,
    pub witnesses: Vec<JsonBytes>,
}

impl AssembledTransaction {
    /// Decode the updated tally carried by the vote cell output
    pub fn vote_tally(&self) -> Result<VoteTally, Error> {
        let data = self
            .outputs_data
            .first()
            .ok_or(Error::MalformedTally(0))?;
        VoteTally::from_bytes(data.as_bytes())
    }
}
