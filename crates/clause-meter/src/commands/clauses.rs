//! Clauses command — inspect clause structure without scoring.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use clause_meter_core::clauses::{
    clause_depth, find_dependent_clauses, find_independent_clauses,
};
use clause_meter_core::tags::strip_tags;

use super::read_parse_tree;

/// Arguments for the `clauses` subcommand.
#[derive(Args, Debug)]
pub struct ClausesArgs {
    /// Parse tree file (JSON) to inspect.
    pub file: Utf8PathBuf,
}

#[derive(Serialize)]
struct ClauseEntry {
    text: String,
    dependent_clauses: usize,
    nesting_depths: Vec<usize>,
}

#[derive(Serialize)]
struct ClausesReport {
    independent_clauses: usize,
    dependent_clauses: usize,
    max_nesting_depth: usize,
    clauses: Vec<ClauseEntry>,
}

/// List independent clauses and their dependent-clause nesting.
#[instrument(name = "cmd_clauses", skip_all, fields(file = %args.file))]
pub fn cmd_clauses(
    args: ClausesArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing clauses command");

    let tree = read_parse_tree(&args.file, max_input_bytes)?;

    let mut clauses = Vec::new();
    for clause in find_independent_clauses(&tree) {
        let mut nesting_depths = Vec::new();
        for dependent in find_dependent_clauses(clause) {
            let depth = clause_depth(&tree, dependent)
                .context("dependent clause not reachable from root")?;
            nesting_depths.push(depth);
        }
        clauses.push(ClauseEntry {
            text: strip_tags(&clause.tagged_text()).join(" "),
            dependent_clauses: nesting_depths.len(),
            nesting_depths,
        });
    }

    let all_dependents = find_dependent_clauses(&tree);
    let max_nesting_depth = all_dependents
        .iter()
        .filter_map(|d| clause_depth(&tree, d))
        .max()
        .unwrap_or(0);

    let report = ClausesReport {
        independent_clauses: clauses.len(),
        dependent_clauses: all_dependents.len(),
        max_nesting_depth,
        clauses,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} independent, {} dependent (max depth {})",
            report.independent_clauses.bold(),
            report.dependent_clauses,
            report.max_nesting_depth,
        );
        for (idx, clause) in report.clauses.iter().enumerate() {
            if clause.nesting_depths.is_empty() {
                println!("  {}. \"{}\"", idx + 1, clause.text);
            } else {
                let depths: Vec<String> = clause
                    .nesting_depths
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                println!(
                    "  {}. \"{}\" ({} dependent, depths: {})",
                    idx + 1,
                    clause.text,
                    clause.dependent_clauses,
                    depths.join(", "),
                );
            }
        }
    }

    Ok(())
}
