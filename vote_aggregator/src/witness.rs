use crate::*;

/// The standard witness structure, encoded as a molecule table:
///
/// ```text
/// table WitnessArgs {
///     lock:        BytesOpt,
///     input_type:  BytesOpt,
///     output_type: BytesOpt,
/// }
/// ```
///
/// A vote fragment's first witness carries its encoded [`Action`] in `input_type`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct WitnessArgs {
    pub lock: Option<Vec<u8>>,
    pub input_type: Option<Vec<u8>>,
    pub output_type: Option<Vec<u8>>,
}

impl WitnessArgs {
    /// Witness args casting a single action
    pub fn for_action(action: Action) -> Self {
        WitnessArgs {
            input_type: Some(action.to_bytes().to_vec()),
            ..Default::default()
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        serde_molecule::from_slice(bytes, false).map_err(|e| Error::Witness(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        serde_molecule::to_vec(self, false).map_err(|e| Error::Witness(e.to_string()))
    }

    /// Decode the action in `input_type`, if there is one
    pub fn action(&self) -> Option<Result<Action, Error>> {
        self.input_type.as_deref().map(Action::from_bytes)
    }
}
