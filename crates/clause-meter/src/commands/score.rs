//! Score command — Flesch baseline plus clause-structure penalty.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use clause_meter_core::flesch::FleschReadingEase;
use clause_meter_core::score::score_sentence;

use super::read_parse_tree;

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Parse tree file (JSON) to score.
    pub file: Utf8PathBuf,

    /// Minimum acceptable adjusted reading score.
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Strip part-of-speech tags before the raw whole-sentence score too
    /// (default keeps the reference behavior: raw is tagged, per-clause
    /// scores are stripped).
    #[arg(long)]
    pub strip_raw_tags: bool,
}

/// Score a sentence parse tree.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    config_strip_raw_tags: bool,
    config_min_score: Option<f64>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, min_score = ?args.min_score, "executing score command");

    let tree = read_parse_tree(&args.file, max_input_bytes)?;

    let strip_raw_tags = args.strip_raw_tags || config_strip_raw_tags;
    let min_score = args.min_score.or(config_min_score);

    let report = score_sentence(&tree, &FleschReadingEase, strip_raw_tags, min_score)
        .with_context(|| format!("failed to score {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.below_min {
        let min = report.min_score.unwrap_or(0.0);
        bail!(
            "{} scores {:.1} (min: {:.0}). Break up nested clauses or shorten the sentence.",
            args.file,
            report.adjusted_reading_score,
            min,
        );
    } else if let Some(min) = report.min_score {
        println!(
            "{} {} scores {:.1} (min: {:.0})",
            "PASS:".green(),
            args.file,
            report.adjusted_reading_score,
            min,
        );
    } else {
        println!("{:.1}", report.adjusted_reading_score);
    }

    Ok(())
}
