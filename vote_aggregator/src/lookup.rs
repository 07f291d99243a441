use crate::*;
use async_trait::async_trait;

/// Which script of a cell output a search key matches against
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScriptType {
    Lock,
    Type,
}

/// Query locating the vote cell, in the shape the chain indexer expects
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SearchKey {
    pub script: Script,
    pub script_type: ScriptType,
}

impl SearchKey {
    pub fn matches(&self, output: &CellOutput) -> bool {
        match self.script_type {
            ScriptType::Lock => output.lock == self.script,
            ScriptType::Type => output.type_.as_ref() == Some(&self.script),
        }
    }
}

/// A live cell as returned by a lookup. The vote cell is one of these.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LiveCell {
    pub out_point: OutPoint,
    pub output: CellOutput,
    pub output_data: JsonBytes,
}

/// Source of live cells.
///
/// Implementations only need `get_cells`. The assembler calls `fetch_vote_cell`, which
/// requires the query to resolve to exactly one cell.
#[async_trait]
pub trait CellLookup: Send + Sync {
    /// Fetch at most `limit` live cells matching `search_key`, newest first
    async fn get_cells(&self, search_key: &SearchKey, limit: usize) -> Result<Vec<LiveCell>, Error>;

    /// Fetch the single cell matching `search_key`
    async fn fetch_vote_cell(&self, search_key: &SearchKey) -> Result<LiveCell, Error> {
        // Two results are enough to tell a unique match from an ambiguous one
        let mut cells = self.get_cells(search_key, 2).await?;
        match cells.len() {
            0 => Err(Error::NotFound),
            1 => Ok(cells.remove(0)),
            n => Err(Error::AmbiguousLookup(n)),
        }
    }
}

/// A simple lookup over an in-memory list of cells
#[derive(Default, Clone, Debug)]
pub struct MemLookup {
    cells: Vec<LiveCell>,
}

impl MemLookup {
    pub fn insert(&mut self, cell: LiveCell) {
        self.cells.push(cell);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[async_trait]
impl CellLookup for MemLookup {
    async fn get_cells(&self, search_key: &SearchKey, limit: usize) -> Result<Vec<LiveCell>, Error> {
        // Later inserts count as newer
        Ok(self
            .cells
            .iter()
            .rev()
            .filter(|cell| search_key.matches(&cell.output))
            .take(limit)
            .cloned()
            .collect())
    }
}

impl From<Vec<LiveCell>> for MemLookup {
    fn from(cells: Vec<LiveCell>) -> Self {
        MemLookup { cells }
    }
}
