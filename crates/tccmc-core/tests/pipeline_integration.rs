//! End-to-end pipeline tests over the canonical example structures

use tccmc_core::{
    AtomEngine, Formula, ModelChecker, TccState, TccStructure, Vocabulary,
};

/// The canonical 6-state structure over {in=true, x=1, x=2}.
fn canonical_structure() -> TccStructure {
    let in_true = Formula::prop("in=true");
    let x1 = Formula::prop("x=1");
    let x2 = Formula::prop("x=2");
    let mut structure = TccStructure::new();
    structure.insert(
        1,
        TccState::new(vec![in_true.clone()], vec![2, 3], true),
    );
    structure.insert(
        2,
        TccState::new(vec![x2.clone(), in_true.clone()], vec![2, 3], false),
    );
    let mut state3 = TccState::new(
        vec![x2.clone(), in_true.negate()],
        vec![5, 6],
        false,
    );
    state3.normal = vec!["now2".to_string()];
    state3.temporal = vec!["t7".to_string(), "p9".to_string()];
    structure.insert(3, state3);
    structure.insert(
        4,
        TccState::new(vec![in_true.negate()], vec![5, 6], true),
    );
    structure.insert(
        5,
        TccState::new(vec![x1.clone(), in_true.clone()], vec![2, 3], false),
    );
    structure.insert(
        6,
        TccState::new(vec![x1.clone(), in_true.negate()], vec![5, 6], false),
    );
    structure
}

fn canonical_vocabulary() -> Vocabulary {
    Vocabulary::new(
        vec!["in=true", "x=1", "x=2"],
        vec![vec!["x=1".to_string(), "x=2".to_string()]],
    )
    .unwrap()
}

/// <>(in=true ^ ~o x=2)
fn drop_x2() -> Formula {
    Formula::eventually(Formula::and(
        Formula::prop("in=true"),
        Formula::not(Formula::next(Formula::prop("x=2"))),
    ))
}

/// <>(in=true ^ ~o x=1)
fn drop_x1() -> Formula {
    Formula::eventually(Formula::and(
        Formula::prop("in=true"),
        Formula::not(Formula::next(Formula::prop("x=1"))),
    ))
}

#[test]
fn canonical_atom_table_counts() {
    let checker = ModelChecker::new(canonical_vocabulary());
    let report = checker.check(&drop_x2(), &canonical_structure()).unwrap();

    assert_eq!(report.closure.len(), 14);
    assert_eq!(report.atom_count, 16);

    // Survivor counts per state, ids contiguous from 1 in state order.
    let expected = [(1, 8), (2, 4), (3, 4), (4, 8), (5, 4), (6, 4)];
    for (state, count) in expected {
        assert_eq!(
            report.atoms.state_table(state).unwrap().len(),
            count,
            "state {state}"
        );
    }
    assert_eq!(report.atoms.total_nodes(), 32);
    let ids: Vec<usize> = report.atoms.nodes().collect();
    assert_eq!(ids, (1..=32).collect::<Vec<_>>());

    // Initial nodes are exactly those of states 1 and 4.
    let initial = report.atoms.initial_nodes(&canonical_structure());
    assert_eq!(initial.len(), 16);
    assert!(initial
        .iter()
        .all(|&n| matches!(report.atoms.state_of(n), Some(1) | Some(4))));
}

#[test]
fn canonical_edges_preserve_obligations() {
    let checker = ModelChecker::new(canonical_vocabulary());
    let report = checker.check(&drop_x2(), &canonical_structure()).unwrap();
    let structure = canonical_structure();

    for (&node, successors) in &report.graph {
        let atom = report.atoms.atom(node).unwrap();
        let from_state = report.atoms.state_of(node).unwrap();
        let obligations = atom.next_obligations();
        for &succ in successors {
            // the tcc edge relation is preserved
            let to_state = report.atoms.state_of(succ).unwrap();
            assert!(structure.get(from_state).unwrap().edges.contains(&to_state));
            // and so is every next-obligation
            let succ_atom = report.atoms.atom(succ).unwrap();
            for obligation in &obligations {
                assert!(succ_atom.contains(obligation));
            }
        }
    }
}

#[test]
fn canonical_surviving_atoms_respect_stores() {
    let vocab = canonical_vocabulary();
    let checker = ModelChecker::new(vocab.clone());
    let report = checker.check(&drop_x2(), &canonical_structure()).unwrap();
    let engine = AtomEngine::new(&vocab);
    let structure = canonical_structure();

    for (&state, table) in report.atoms.states() {
        let store = &structure.get(state).unwrap().store;
        for atom in table.values() {
            for proposition in store {
                assert!(engine.consistent(proposition, atom));
                assert!(atom.contains(proposition));
            }
        }
    }
}

#[test]
fn canonical_verdicts_only_use_non_trivial_components() {
    let checker = ModelChecker::new(canonical_vocabulary());
    let report = checker.check(&drop_x2(), &canonical_structure()).unwrap();
    for verdict in &report.verdicts {
        let non_trivial = verdict.nodes.len() > 1
            || report
                .graph
                .get(&verdict.nodes[0])
                .map(|succ| succ.contains(&verdict.nodes[0]))
                .unwrap_or(false);
        assert!(non_trivial);
    }
}

#[test]
fn no_run_drops_x2_after_in() {
    // Every in=true state steps into an x=2 state, so the conjunction
    // in=true ^ ~o x=2 is never realisable and its eventuality never
    // discharges.
    let checker = ModelChecker::new(canonical_vocabulary());
    let report = checker.check(&drop_x2(), &canonical_structure()).unwrap();
    assert!(!report.witness_found);
}

#[test]
fn some_run_drops_x1_after_in() {
    // Looping on state 2 keeps in=true while the successor carries x=2.
    let checker = ModelChecker::new(canonical_vocabulary());
    let report = checker.check(&drop_x1(), &canonical_structure()).unwrap();
    assert!(report.witness_found);
}

#[test]
fn driver_rejects_drop_x2_property() {
    // The runs through ~in=true states satisfy the negation vacuously.
    let checker = ModelChecker::new(canonical_vocabulary());
    assert!(!checker
        .satisfies(&drop_x2(), &canonical_structure())
        .unwrap());
}

#[test]
fn store_proposition_holding_everywhere_is_satisfied() {
    // in=true holds in every initial store of this structure.
    let mut structure = TccStructure::new();
    structure.insert(
        1,
        TccState::new(vec![Formula::prop("in=true")], vec![2], true),
    );
    structure.insert(
        2,
        TccState::new(vec![Formula::prop("in=true")], vec![2], false),
    );
    let checker = ModelChecker::new(canonical_vocabulary());
    assert!(checker
        .satisfies(&Formula::prop("in=true"), &structure)
        .unwrap());
}

#[test]
fn box_formula_has_witness_on_constant_loop() {
    // Single-state self-loop with store {da=0}: the unique run realises
    // [](da=0).
    let vocab = Vocabulary::new(
        vec!["da=0", "da=5", "da=10", "da=15", "da=20"],
        vec![vec![
            "da=0".to_string(),
            "da=5".to_string(),
            "da=10".to_string(),
            "da=15".to_string(),
            "da=20".to_string(),
        ]],
    )
    .unwrap();
    let mut structure = TccStructure::new();
    structure.insert(
        1,
        TccState::new(vec![Formula::prop("da=0")], vec![1], true),
    );
    let checker = ModelChecker::new(vocab);
    let report = checker
        .check(&Formula::always(Formula::prop("da=0")), &structure)
        .unwrap();
    assert!(report.witness_found);
}

#[test]
fn unreachable_value_is_never_eventually_true() {
    // Two states exchanging b=1 and b=2: <> b=3 has no witness and the
    // property is reported unsatisfied.
    let vocab = Vocabulary::new(
        vec!["b=0", "b=1", "b=2", "b=3"],
        vec![vec![
            "b=0".to_string(),
            "b=1".to_string(),
            "b=2".to_string(),
            "b=3".to_string(),
        ]],
    )
    .unwrap();
    let mut structure = TccStructure::new();
    structure.insert(1, TccState::new(vec![Formula::prop("b=1")], vec![2], true));
    structure.insert(2, TccState::new(vec![Formula::prop("b=2")], vec![1], false));

    let phi = Formula::eventually(Formula::prop("b=3"));
    let checker = ModelChecker::new(vocab);
    let report = checker.check(&phi, &structure).unwrap();
    assert!(!report.witness_found);
    assert!(!checker.satisfies(&phi, &structure).unwrap());
}

#[test]
fn reports_are_reproducible() {
    let checker = ModelChecker::new(canonical_vocabulary());
    let first = checker.check(&drop_x2(), &canonical_structure()).unwrap();
    let second = checker.check(&drop_x2(), &canonical_structure()).unwrap();
    assert_eq!(first, second);
}
