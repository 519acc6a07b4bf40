//! tccmc - command-line driver for the tcc temporal model checker
//!
//! Loads a structure (built-in example or JSON file), resolves the formula
//! to check (named example property, inline JSON, or @file), runs the
//! tableau pipeline on the negation of the property, and reports whether
//! the structure satisfies the property. `--draw` additionally emits DOT
//! renderings of the model checking graph and every SCC subgraph.

mod examples;
mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tccmc_core::{
    CheckReport, CheckerError, Formula, ModelChecker, TccStructure, Vocabulary, VocabularyConfig,
};

#[derive(Parser)]
#[command(name = "tccmc")]
#[command(version)]
#[command(about = "Temporal model checking over tcc structures")]
#[command(long_about = "
Decides whether a tcc structure satisfies a temporal property, following
the tableau method: closure, atoms, model checking graph, and a search for
a self-fulfilling strongly connected component witnessing the negation.

STRUCTURE is a built-in example (canonical, machine) or a path to a JSON
structure file; FORMULA is a named example property, an inline JSON
formula, or @path to a JSON formula file.
")]
struct Cli {
    /// Built-in structure name or path to a JSON structure file
    structure: String,

    /// Property to check: example name, inline JSON, or @file
    formula: String,

    /// Write DOT graphs for the model checking graph and SCC subgraphs
    #[arg(long = "draw")]
    draw: bool,

    /// Directory for DOT output
    #[arg(long = "out-dir", default_value = ".")]
    out_dir: PathBuf,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    format: OutputFormat,

    /// Verdict only
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutputFormat {
    /// Human-readable report with colors
    Human,
    /// JSON report for programmatic use
    Json,
}

/// On-disk structure file: vocabulary plus states.
#[derive(Serialize, Deserialize)]
struct StructureFile {
    vocabulary: VocabularyConfig,
    states: TccStructure,
}

/// JSON output payload.
#[derive(Serialize)]
struct JsonOutput<'a> {
    property: &'a Formula,
    satisfied: bool,
    report: &'a CheckReport,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (vocabulary, structure, properties) = load_structure(&cli.structure)?;
    let property = resolve_formula(&cli.formula, &properties)?;

    let checker = ModelChecker::new(vocabulary);
    // Driver protocol: search for a run witnessing the negation; the
    // property holds exactly when none exists.
    let report = checker
        .check(&property.normalized().negate(), &structure)
        .context("model checking failed")?;
    let satisfied = !report.witness_found;

    match cli.format {
        OutputFormat::Human => print_human(&property, satisfied, &report, cli.quiet),
        OutputFormat::Json => {
            let payload = JsonOutput {
                property: &property,
                satisfied,
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    if cli.draw {
        draw(&report, &cli.out_dir)?;
    }

    Ok(())
}

fn load_structure(arg: &str) -> Result<(Vocabulary, TccStructure, Vec<(&'static str, Formula)>)> {
    if let Some(example) = examples::builtin(arg) {
        return Ok((example.vocabulary, example.structure, example.properties));
    }
    let text = fs::read_to_string(arg).with_context(|| {
        format!(
            "cannot read structure file '{}' (built-in structures: {})",
            arg,
            examples::BUILTIN_NAMES.join(", ")
        )
    })?;
    // Missing store/initial fields surface here as malformed-structure
    // errors.
    let file: StructureFile = serde_json::from_str(&text)
        .map_err(|err| CheckerError::malformed_structure(err.to_string()))
        .with_context(|| format!("cannot parse structure file '{}'", arg))?;
    let vocabulary = Vocabulary::from_config(file.vocabulary)
        .context("invalid vocabulary in structure file")?;
    Ok((vocabulary, file.states, Vec::new()))
}

fn resolve_formula(arg: &str, properties: &[(&'static str, Formula)]) -> Result<Formula> {
    if let Some((_, formula)) = properties.iter().find(|(name, _)| *name == arg) {
        return Ok(formula.clone());
    }
    if let Some(path) = arg.strip_prefix('@') {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read formula file '{}'", path))?;
        return serde_json::from_str(&text)
            .with_context(|| format!("cannot parse formula file '{}'", path));
    }
    if arg.trim_start().starts_with('{') {
        return serde_json::from_str(arg).context("cannot parse inline JSON formula");
    }
    bail!(
        "unknown property '{}'; expected a named example property, inline JSON, or @file",
        arg
    );
}

fn print_human(property: &Formula, satisfied: bool, report: &CheckReport, quiet: bool) {
    if !quiet {
        println!("{} {}", "Property:".bold(), property);
        println!("{} {}", "Checked negation:".bold(), report.formula);
        println!();
        println!("Closure: {} formulas", report.closure.len());
        println!(
            "Atoms: {} candidates, {} nodes after store filtering",
            report.atom_count,
            report.atoms.total_nodes()
        );
        for (state, table) in report.atoms.states() {
            println!("  state {}: {} atoms", state, table.len());
        }
        println!(
            "SCCs: {} total, {} non-trivial",
            report.components.len(),
            report.verdicts.len()
        );
        for verdict in &report.verdicts {
            println!(
                "  {:?}: self-fulfilling {}, entails negation {}",
                verdict.nodes,
                tick(verdict.self_fulfilling),
                tick(verdict.entails_formula)
            );
        }
        println!();
    }

    if satisfied {
        println!("{}", "✓ property satisfied".green().bold());
    } else {
        println!("{}", "✗ property NOT satisfied".red().bold());
    }
}

fn tick(flag: bool) -> ColoredString {
    if flag {
        "yes".green()
    } else {
        "no".red()
    }
}

/// Filename stem shared by all DOT output of one run: the product graph
/// goes to `<stem>.dot`, each SCC subgraph to `<stem>-scc-<i>.dot`.
const DOT_STEM: &str = "model_checking_graph";

fn draw(report: &CheckReport, out_dir: &PathBuf) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("cannot create output directory {}", out_dir.display()))?;

    let graph_path = out_dir.join(format!("{}.dot", DOT_STEM));
    fs::write(&graph_path, render::dot(&report.graph))
        .with_context(|| format!("cannot write {}", graph_path.display()))?;

    for (index, subgraph) in report.subgraphs.iter().enumerate() {
        let path = out_dir.join(format!("{}-scc-{}.dot", DOT_STEM, index + 1));
        fs::write(&path, render::dot(subgraph))
            .with_context(|| format!("cannot write {}", path.display()))?;
    }
    Ok(())
}
