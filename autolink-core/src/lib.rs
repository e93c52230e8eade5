// autolink-core/src/lib.rs
//! # Autolink Core Library
//!
//! `autolink-core` rewrites chosen words and phrases in Markdown into richer
//! markup, usually links, without touching text that is already part of a link,
//! an image, or code.
//!
//! ## Modules
//!
//! * `config`: Defines `LinkRule`s and `AutolinkConfig`, with YAML/JSON loading and validation.
//! * `rules`: Compiled `Rule`s, ordered `RuleSet` snapshots and the rule compiler.
//! * `document`: The node model the rewriter walks and the Markdown adapter that builds it.
//! * `rewriter`: The traversal/splice pass and the snapshot-holding `Rewriter`.
//! * `plugin`: Host lifecycle wrapper (`AutolinkPlugin`).
//! * `headless`: One-shot convenience function.
//! * `errors`: Error types.
//!
//! ## Rule order
//!
//! Rules run in configuration order and chain: each rule scans the text the
//! previous rules produced. With `x → xy` followed by `xy → z`, the input `x`
//! becomes `z`; in the opposite order it becomes `xy`.
//!
//! ## Usage Example
//!
//! ```rust
//! use autolink_core::{headless_rewrite_string, AutolinkConfig, LinkRule};
//!
//! let config = AutolinkConfig::new(vec![LinkRule::new(
//!     "Mattermost",
//!     "[Mattermost](https://mattermost.com)",
//! )]);
//!
//! let out = headless_rewrite_string(&config, "Welcome to Mattermost! [Mattermost](https://mattermost.com)");
//! assert_eq!(
//!     out,
//!     "Welcome to [Mattermost](https://mattermost.com)! [Mattermost](https://mattermost.com)"
//! );
//! ```
//!
//! ## Error Handling
//!
//! Rewriting never fails. Rules that do not compile are dropped and reported as
//! [`AutolinkError`]; spans that no longer line up with the text are skipped and
//! reported as [`SpanIntegrityFault`]. Configuration loading returns
//! `anyhow::Result`.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod document;
pub mod errors;
pub mod headless;
pub mod plugin;
pub mod rewriter;
pub mod rules;

/// Re-exports the configuration types.
pub use config::{validate_links, AutolinkConfig, LinkRule, MAX_PATTERN_LENGTH};

/// Re-exports the error types.
pub use errors::{AutolinkError, SpanIntegrityFault};

/// Re-exports the document model and Markdown adapter.
pub use document::{parse_document, Node, NodeKind};

/// Re-exports compiled rules and the compiler.
pub use rules::{compile_rules, is_word_char, CompiledRules, Rule, RuleSet};

/// Re-exports the rewriting pass.
pub use rewriter::{rewrite, rewrite_with_report, RewriteReport, Rewriter};

/// Re-exports the host integration layer.
pub use plugin::{AutolinkPlugin, ConfigurationSource, FileConfigSource, Post};

/// Re-exports types and functions for one-shot, non-interactive use.
pub use headless::{headless_rewrite_string, headless_rewrite_with_report};
