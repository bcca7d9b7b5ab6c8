//! Core library for clause-meter.
//!
//! Scores the readability of a single sentence from its classified parse
//! tree: a lexical Flesch baseline per independent clause, penalized by
//! dependent-clause counts and factorial-weighted nesting depths.
//!
//! # Modules
//!
//! - [`tree`] - Parse-tree model and queries
//! - [`tags`] - Part-of-speech tag stripping
//! - [`clauses`] - Clause location and nesting depth
//! - [`flesch`] - Lexical formula trait and the bundled Flesch Reading Ease
//! - [`score`] - The penalty aggregator
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use clause_meter_core::flesch::FleschReadingEase;
//! use clause_meter_core::score::score_sentence;
//! use clause_meter_core::tree::{NodeKind, ParseNode};
//!
//! let tree = ParseNode::internal(
//!     NodeKind::Sentence,
//!     vec![ParseNode::internal(
//!         NodeKind::IndependentClause,
//!         vec![
//!             ParseNode::terminal("The_DT"),
//!             ParseNode::terminal("cat_NN"),
//!             ParseNode::terminal("sat_VBD"),
//!         ],
//!     )],
//! );
//!
//! let report = score_sentence(&tree, &FleschReadingEase, false, None)
//!     .expect("valid tree");
//! assert_eq!(report.independent_clauses, 1);
//! ```
#![deny(unsafe_code)]

pub mod clauses;
pub mod config;
pub mod error;
pub mod flesch;
pub mod score;
pub mod tags;
pub mod tree;

pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use error::{ConfigError, ConfigResult, ScoreError, ScoreResult};
pub use flesch::{FleschReadingEase, LexicalFormula};
pub use score::{ClauseScore, ReadabilityReport, score_sentence};
pub use tree::{NodeKind, ParseNode};
