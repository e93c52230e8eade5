// File: autolink-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for one-shot use: compile a configuration and rewrite
//! a single string with it.

use log::warn;

use crate::config::AutolinkConfig;
use crate::document::parse_document;
use crate::rewriter::{rewrite_with_report, RewriteReport};
use crate::rules::compile_rules;

/// Rewrites `content` with the rules in `config`.
///
/// Broken rules are dropped with a warning; the call itself cannot fail.
pub fn headless_rewrite_string(config: &AutolinkConfig, content: &str) -> String {
    headless_rewrite_with_report(config, content).0
}

pub fn headless_rewrite_with_report(config: &AutolinkConfig, content: &str) -> (String, RewriteReport) {
    let compiled = compile_rules(&config.links);
    if !compiled.is_clean() {
        warn!(
            "{} link rule(s) were dropped during compilation.",
            compiled.errors.len()
        );
    }
    let root = parse_document(content);
    rewrite_with_report(content, &root, &compiled.rules)
}
