//! Built-in example structures
//!
//! Two ready-made structures: the small 6-state structure over
//! {in=true, x=1, x=2} used throughout the tableau examples, and a cyclic
//! fragment of a vending-machine control system over the da/b/sm
//! vocabulary.

use tccmc_core::{Formula, TccState, TccStructure, Vocabulary};

/// A built-in structure with its vocabulary and named example properties.
pub struct Example {
    pub vocabulary: Vocabulary,
    pub structure: TccStructure,
    pub properties: Vec<(&'static str, Formula)>,
}

/// Look a built-in structure up by name.
pub fn builtin(name: &str) -> Option<Example> {
    match name {
        "canonical" => Some(canonical()),
        "machine" => Some(machine()),
        _ => None,
    }
}

pub const BUILTIN_NAMES: [&str; 2] = ["canonical", "machine"];

/// The canonical 6-state structure over {in=true, x=1, x=2}.
pub fn canonical() -> Example {
    let in_true = Formula::prop("in=true");
    let x1 = Formula::prop("x=1");
    let x2 = Formula::prop("x=2");

    let vocabulary = Vocabulary::new(
        vec!["in=true", "x=1", "x=2"],
        vec![vec!["x=1".to_string(), "x=2".to_string()]],
    )
    .expect("canonical vocabulary is well-formed");

    let mut structure = TccStructure::new();
    structure.insert(1, annotated(vec![in_true.clone()], vec![2, 3], true, &["t4", "p9"], &[]));
    structure.insert(
        2,
        annotated(vec![x2.clone(), in_true.clone()], vec![2, 3], false, &["t4", "p9"], &[]),
    );
    structure.insert(
        3,
        annotated(
            vec![x2.clone(), in_true.negate()],
            vec![5, 6],
            false,
            &["t7", "p9"],
            &["now2"],
        ),
    );
    structure.insert(
        4,
        annotated(vec![in_true.negate()], vec![5, 6], true, &["t7", "p9"], &["now2"]),
    );
    structure.insert(
        5,
        annotated(vec![x1.clone(), in_true.clone()], vec![2, 3], false, &["t4", "p9"], &[]),
    );
    structure.insert(
        6,
        annotated(
            vec![x1, in_true.negate()],
            vec![5, 6],
            false,
            &["t7", "p9"],
            &["now2"],
        ),
    );

    let drop = |value: &str| {
        Formula::eventually(Formula::and(
            Formula::prop("in=true"),
            Formula::not(Formula::next(Formula::prop(value))),
        ))
    };

    Example {
        vocabulary,
        structure,
        properties: vec![("drop-x2", drop("x=2")), ("drop-x1", drop("x=1"))],
    }
}

/// A closed 6-state fragment of the control-system example: credit `da`
/// accumulates while buttons `b` and signals `sm` cycle, and the dispensing
/// flags `dd`/`tc`/`tt`/`dc` fire along the way.
pub fn machine() -> Example {
    let vocabulary = Vocabulary::new(
        vec![
            "da=0", "da=5", "da=10", "da=15", "da=20", "b=0", "b=1", "b=2", "b=3", "sm=0",
            "sm=5", "sm=10", "tc", "tt", "dc", "dd",
        ],
        vec![
            vec![
                "da=0".to_string(),
                "da=5".to_string(),
                "da=10".to_string(),
                "da=15".to_string(),
                "da=20".to_string(),
            ],
            vec![
                "b=0".to_string(),
                "b=1".to_string(),
                "b=2".to_string(),
                "b=3".to_string(),
            ],
            vec!["sm=0".to_string(), "sm=5".to_string(), "sm=10".to_string()],
        ],
    )
    .expect("machine vocabulary is well-formed");

    let p = |name: &str| Formula::prop(name);
    let off = |name: &str| p(name).negate();
    let pair = |button: &str, signal: &str| Formula::and(p(button), p(signal));

    let mut structure = TccStructure::new();
    structure.insert(
        1,
        annotated(
            vec![p("da=0"), off("dd"), off("tc"), off("tt"), off("dc"), pair("b=1", "sm=0")],
            vec![1, 2, 3],
            true,
            &["p27"],
            &[],
        ),
    );
    structure.insert(
        2,
        annotated(
            vec![p("da=0"), off("dd"), off("tc"), off("tt"), off("dc"), pair("b=2", "sm=0")],
            vec![1, 2, 3],
            true,
            &["p31"],
            &[],
        ),
    );
    structure.insert(
        3,
        annotated(
            vec![p("da=5"), off("dd"), off("tc"), off("tt"), off("dc"), pair("b=0", "sm=5")],
            vec![4, 5],
            false,
            &["p39"],
            &[],
        ),
    );
    structure.insert(
        4,
        annotated(
            vec![p("da=5"), p("dd"), off("tc"), off("tt"), off("dc"), pair("b=1", "sm=0")],
            vec![4, 5],
            false,
            &["p53"],
            &[],
        ),
    );
    structure.insert(
        5,
        annotated(
            vec![p("da=10"), p("dd"), p("tc"), off("tt"), p("dc"), pair("b=0", "sm=10")],
            vec![6],
            false,
            &["p61"],
            &[],
        ),
    );
    structure.insert(
        6,
        annotated(
            vec![p("da=10"), p("dd"), p("tc"), p("tt"), p("dc"), pair("b=0", "sm=0")],
            vec![6],
            false,
            &["p66"],
            &[],
        ),
    );

    let dispense_keeps = |value: &str| {
        Formula::eventually(Formula::and(
            p("dd"),
            Formula::not(Formula::next(p(value))),
        ))
    };

    Example {
        vocabulary,
        structure,
        properties: vec![
            ("dd-da0", dispense_keeps("da=0")),
            ("dd-da5", dispense_keeps("da=5")),
        ],
    }
}

fn annotated(
    store: Vec<Formula>,
    edges: Vec<usize>,
    initial: bool,
    temporal: &[&str],
    normal: &[&str],
) -> TccState {
    let mut state = TccState::new(store, edges, initial);
    state.temporal = temporal.iter().map(|s| s.to_string()).collect();
    state.normal = normal.iter().map(|s| s.to_string()).collect();
    state
}
