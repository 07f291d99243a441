use super::*;

// Fixture builders shared by the module tests

pub fn vote_type_script() -> Script {
    Script {
        code_hash: H256([0x51; 32]),
        hash_type: ScriptHashType::Type,
        args: JsonBytes(vec![0xee; 32]),
    }
}

pub fn vote_search_key() -> SearchKey {
    SearchKey {
        script: vote_type_script(),
        script_type: ScriptType::Type,
    }
}

pub fn owner_lock() -> Script {
    Script {
        code_hash: H256([0x9b; 32]),
        hash_type: ScriptHashType::Type,
        args: JsonBytes(vec![0x36; 20]),
    }
}

pub fn vote_cell(counts: &[u32]) -> LiveCell {
    LiveCell {
        out_point: OutPoint {
            tx_hash: H256([0xcc; 32]),
            index: Uint32(0),
        },
        output: CellOutput {
            capacity: Uint64(200_000_000_000),
            lock: owner_lock(),
            type_: Some(vote_type_script()),
        },
        output_data: JsonBytes(VoteTally::new(counts.to_vec()).to_bytes()),
    }
}

pub fn dep(n: u8) -> CellDep {
    CellDep {
        out_point: OutPoint {
            tx_hash: H256([n; 32]),
            index: Uint32(0),
        },
        dep_type: DepType::Code,
    }
}

pub fn witness(args: WitnessArgs) -> JsonBytes {
    JsonBytes(args.to_bytes().unwrap())
}

/// A voter's fragment with `inputs` inputs, one output, and an action for `index`
pub fn fragment(index: u32, inputs: usize, cell_deps: &[CellDep]) -> PartialTransaction {
    let mut witnesses = vec![witness(WitnessArgs::for_action(Action::new(index)))];
    witnesses.resize(inputs.max(1), JsonBytes::default());

    PartialTransaction {
        cell_deps: cell_deps.to_vec(),
        header_deps: vec![],
        inputs: (0..inputs.max(1))
            .map(|i| {
                CellInput::new(OutPoint {
                    tx_hash: H256([index as u8 + 100; 32]),
                    index: Uint32(i as u32),
                })
            })
            .collect(),
        outputs: vec![CellOutput {
            capacity: Uint64(6_100_000_000),
            lock: owner_lock(),
            type_: None,
        }],
        outputs_data: vec![],
        witnesses,
    }
}

#[tokio::test]
async fn end_to_end_assembly() {
    // The vote cell lives among unrelated cells
    let mut lookup = MemLookup::default();
    let mut unrelated = vote_cell(&[]);
    unrelated.out_point.tx_hash = H256([0xdd; 32]);
    unrelated.output.type_ = None;
    lookup.insert(unrelated);
    lookup.insert(vote_cell(&[5, 2]));

    // Two voters each vote for candidate 1 and share a dependency
    let fragments = vec![fragment(1, 1, &[dep(1)]), fragment(1, 2, &[dep(1)])];

    let tx = assemble(&lookup, &vote_search_key(), &fragments)
        .await
        .unwrap();

    assert_eq!(tx.vote_tally().unwrap().counts(), &[5, 4]);
    assert_eq!(tx.inputs.len(), 1 + 1 + 2);
    assert_eq!(tx.witnesses.len(), 1 + 1 + 2);
    assert_eq!(tx.outputs.len(), 1 + 1 + 1);
    assert_eq!(tx.outputs_data.len(), tx.outputs.len());
    assert_eq!(tx.cell_deps, vec![dep(1)]);
    assert_eq!(tx.inputs[0].previous_output, vote_cell(&[]).out_point);
    assert_eq!(tx.inputs[0].since, Uint64(0));
    assert_eq!(tx.outputs[0], vote_cell(&[]).output);

    // Wire shape
    let json = serde_json::to_value(&tx).unwrap();
    assert_eq!(json["version"], "0x0");
    assert_eq!(json["header_deps"], serde_json::json!([]));
    assert_eq!(json["witnesses"][0], "0x");
    assert_eq!(json["outputs_data"][0], "0x020000000500000004000000");
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        vec![
            "version",
            "cell_deps",
            "header_deps",
            "inputs",
            "outputs",
            "outputs_data",
            "witnesses"
        ]
    );
}

#[tokio::test]
async fn empty_assembly_keeps_tally() {
    let lookup = MemLookup::from(vec![vote_cell(&[9, 0, 1])]);
    let tx = assemble(&lookup, &vote_search_key(), &[]).await.unwrap();

    assert_eq!(tx.vote_tally().unwrap(), VoteTally::new(vec![9, 0, 1]));
    assert_eq!(tx.inputs.len(), 1);
    assert_eq!(tx.outputs.len(), 1);
    assert_eq!(tx.witnesses, vec![JsonBytes::default()]);
    assert!(tx.cell_deps.is_empty());
}

#[tokio::test]
async fn failed_fragment_aborts_assembly() {
    let lookup = MemLookup::from(vec![vote_cell(&[5, 2])]);

    let mut bad = fragment(0, 2, &[dep(2)]);
    bad.witnesses.truncate(1);
    let fragments = vec![fragment(1, 1, &[dep(1)]), bad, fragment(0, 1, &[])];

    let err = assemble(&lookup, &vote_search_key(), &fragments)
        .await
        .unwrap_err();
    match err {
        Error::Validation(ValidationError::ArityMismatch {
            fragment,
            inputs,
            witnesses,
        }) => {
            assert_eq!(fragment, 1);
            assert_eq!(inputs, 2);
            assert_eq!(witnesses, 1);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(err_code(&lookup, &fragments).await, -10);

    // Nothing from the failed request leaks into the next one
    let tx = assemble(&lookup, &vote_search_key(), &[fragment(0, 1, &[])])
        .await
        .unwrap();
    assert_eq!(tx.vote_tally().unwrap().counts(), &[6, 2]);
    assert!(tx.cell_deps.is_empty());
}

async fn err_code(lookup: &MemLookup, fragments: &[PartialTransaction]) -> i64 {
    assemble(lookup, &vote_search_key(), fragments)
        .await
        .unwrap_err()
        .code()
}

#[tokio::test]
async fn lookup_must_be_unique() {
    let empty = MemLookup::default();
    assert!(matches!(
        assemble(&empty, &vote_search_key(), &[]).await,
        Err(Error::NotFound)
    ));

    let twice = MemLookup::from(vec![vote_cell(&[1]), vote_cell(&[2])]);
    let err = assemble(&twice, &vote_search_key(), &[]).await.unwrap_err();
    assert!(matches!(err, Error::AmbiguousLookup(2)));
    assert_eq!(err.code(), -5);

    // The lookup can also be used as a trait object
    let dynamic: &dyn CellLookup = &twice;
    assert!(assemble(dynamic, &vote_search_key(), &[]).await.is_err());
}
