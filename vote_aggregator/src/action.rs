use crate::*;
use std::convert::TryInto;

/// Encoded length of an action
pub const ACTION_LEN: usize = 4;

/// A single voter's instruction, carried in the `input_type` field of a fragment's first witness.
///
/// Byte layout: `| index: u32 little-endian |`. The vote weight is not encoded and is always 1.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct Action {
    /// Candidate slot in the vote tally
    pub index: u32,

    /// Votes added to the candidate
    pub votes: u32,
}

impl Action {
    pub fn new(index: u32) -> Self {
        Action { index, votes: 1 }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let raw: [u8; ACTION_LEN] = bytes
            .try_into()
            .map_err(|_| Error::MalformedAction(bytes.len()))?;
        Ok(Action::new(u32::from_le_bytes(raw)))
    }

    pub fn to_bytes(&self) -> [u8; ACTION_LEN] {
        self.index.to_le_bytes()
    }
}
