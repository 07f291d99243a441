use crate::*;
use indexmap::IndexSet;
use log::{debug, info, warn};

/// Check a single fragment against the current tally and extract its action.
///
/// Checks run in order: input/witness arity, outputs data count, presence and decoding of
/// the action in the first witness, then the candidate bounds.
pub fn validate_fragment(
    fragment: usize,
    tx: &PartialTransaction,
    tally: &VoteTally,
) -> Result<Action, ValidationError> {
    if tx.inputs.len() != tx.witnesses.len() {
        return Err(ValidationError::ArityMismatch {
            fragment,
            inputs: tx.inputs.len(),
            witnesses: tx.witnesses.len(),
        });
    }
    if tx.outputs_data.len() > tx.outputs.len() {
        return Err(ValidationError::OutputsDataMismatch {
            fragment,
            outputs: tx.outputs.len(),
            outputs_data: tx.outputs_data.len(),
        });
    }

    let witness = tx
        .witnesses
        .first()
        .ok_or(ValidationError::MissingAction { fragment })?;
    let witness = WitnessArgs::from_slice(witness.as_bytes())
        .map_err(|_| ValidationError::MalformedWitness { fragment })?;
    let action = match witness.action() {
        Some(Ok(action)) => action,
        Some(Err(_)) => {
            let len = witness.input_type.as_ref().map_or(0, Vec::len);
            return Err(ValidationError::MalformedAction { fragment, len });
        }
        None => return Err(ValidationError::MissingAction { fragment }),
    };

    if !tally.contains(action.index) {
        return Err(ValidationError::IndexOutOfRange {
            fragment,
            index: action.index,
            candidates: tally.len(),
        });
    }

    Ok(action)
}

/// Combine the vote cell and every fragment into a single transaction.
///
/// All fragments are validated before anything is merged, so a failure never exposes a
/// partially updated tally.
pub fn merge(
    vote_cell: &LiveCell,
    fragments: &[PartialTransaction],
) -> Result<AssembledTransaction, Error> {
    let mut tally = VoteTally::from_bytes(vote_cell.output_data.as_bytes())?;

    let actions = fragments
        .iter()
        .enumerate()
        .map(|(i, tx)| validate_fragment(i, tx, &tally))
        .collect::<Result<Vec<Action>, ValidationError>>()
        .map_err(|e| {
            warn!("rejecting assembly request: {}", e);
            e
        })?;

    for (i, action) in actions.iter().enumerate() {
        debug!(
            "fragment {} casts {} vote(s) for candidate {}",
            i, action.votes, action.index
        );
        tally.apply(action);
    }

    let mut cell_deps: IndexSet<CellDep> = IndexSet::new();
    let mut inputs = vec![CellInput::new(vote_cell.out_point.clone())];
    let mut outputs = vec![vote_cell.output.clone()];
    let mut outputs_data = vec![JsonBytes(tally.to_bytes())];
    let mut witnesses = vec![JsonBytes::default()];

    for (i, tx) in fragments.iter().enumerate() {
        if !tx.header_deps.is_empty() {
            warn!(
                "fragment {}: dropping {} header dep(s)",
                i,
                tx.header_deps.len()
            );
        }

        cell_deps.extend(tx.cell_deps.iter().cloned());
        inputs.extend(tx.inputs.iter().cloned());
        outputs.extend(tx.outputs.iter().cloned());
        outputs_data.extend(tx.outputs_data.iter().cloned());
        outputs_data.resize(outputs.len(), JsonBytes::default());
        witnesses.extend(tx.witnesses.iter().cloned());
    }

    info!(
        "assembled {} fragment(s) over {} candidate(s)",
        fragments.len(),
        tally.len()
    );

    Ok(AssembledTransaction {
        version: Uint32(TX_VERSION),
        cell_deps: cell_deps.into_iter().collect(),
        header_deps: vec![],
        inputs,
        outputs,
        outputs_data,
        witnesses,
    })
}

/// Look up the vote cell and merge `fragments` into it
pub async fn assemble<L>(
    lookup: &L,
    search_key: &SearchKey,
    fragments: &[PartialTransaction],
) -> Result<AssembledTransaction, Error>
where
    L: CellLookup + ?Sized,
{
    let vote_cell = lookup.fetch_vote_cell(search_key).await?;
    merge(&vote_cell, fragments)
}
