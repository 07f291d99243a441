use crate::*;
use std::convert::TryInto;

/// Width in bytes of the count header and of every counter
const WORD: usize = 4;

/// Vote counts held in the vote cell, one counter per candidate.
///
/// Byte layout (all little-endian):
///
/// ```text
/// | count: u32 | counts[0]: u32 | ... | counts[count - 1]: u32 |
/// ```
///
/// The encoded length is always exactly `4 + 4 * count`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct VoteTally {
    counts: Vec<u32>,
}

impl VoteTally {
    pub fn new(counts: Vec<u32>) -> Self {
        VoteTally { counts }
    }

    /// Decode a tally from vote cell data
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < WORD || bytes.len() % WORD != 0 {
            return Err(Error::MalformedTally(bytes.len()));
        }

        let count = u32::from_le_bytes(read_word(bytes));
        let expected = (count as usize)
            .checked_mul(WORD)
            .and_then(|len| len.checked_add(WORD));
        if expected != Some(bytes.len()) {
            return Err(Error::MalformedTally(bytes.len()));
        }

        let counts = bytes[WORD..]
            .chunks_exact(WORD)
            .map(|chunk| u32::from_le_bytes(read_word(chunk)))
            .collect();

        Ok(VoteTally { counts })
    }

    /// Encode the tally as vote cell data
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(WORD + WORD * self.counts.len());
        bytes.extend_from_slice(&(self.counts.len() as u32).to_le_bytes());
        for count in &self.counts {
            bytes.extend_from_slice(&count.to_le_bytes());
        }
        bytes
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn get(&self, index: u32) -> Option<u32> {
        self.counts.get(index as usize).copied()
    }

    /// Whether `index` names an existing candidate
    pub fn contains(&self, index: u32) -> bool {
        (index as usize) < self.counts.len()
    }

    /// Add an action's votes to its candidate.
    ///
    /// Returns false and leaves the tally untouched when the index is out of range.
    ///
    /// Counters wrap at `u32::MAX`, the same value the 32-bit cell encoding would hold.
    // TODO: decide between rejecting, saturating or wrapping on overflow
    pub fn apply(&mut self, action: &Action) -> bool {
        match self.counts.get_mut(action.index as usize) {
            Some(count) => {
                *count = count.wrapping_add(action.votes);
                true
            }
            None => false,
        }
    }
}

impl From<Vec<u32>> for VoteTally {
    fn from(counts: Vec<u32>) -> Self {
        VoteTally::new(counts)
    }
}

// Callers guarantee at least WORD bytes
fn read_word(bytes: &[u8]) -> [u8; WORD] {
    bytes[..WORD].try_into().unwrap_or([0; WORD])
}
