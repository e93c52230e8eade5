//! The rewriting pass: walk a parsed document, rewrite eligible prose, splice
//! the result back into the text.
//!
//! Node ranges are expressed against the original text, but the output grows
//! and shrinks as spans are rewritten. Because nodes are visited in strictly
//! increasing source order and each splice only moves text at or after the
//! edited span, one running signed offset is enough to map every later range
//! into the current output.
//!
//! License: MIT OR APACHE 2.0

use std::sync::{Arc, RwLock};

use log::{debug, info, warn};

use crate::document::{parse_document, Node, NodeKind};
use crate::errors::SpanIntegrityFault;
use crate::rules::RuleSet;

/// What a single rewrite pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Plain-text spans the pass looked at.
    pub spans_visited: usize,
    /// Spans whose text changed.
    pub spans_rewritten: usize,
    /// Spans skipped because the parser's text and the live text disagreed.
    pub faults: Vec<SpanIntegrityFault>,
}

/// Rewrites `original` using the tree `root` that was parsed from it.
///
/// Never fails: a span that cannot be located is reported and left alone.
pub fn rewrite(original: &str, root: &Node, rules: &RuleSet) -> String {
    rewrite_with_report(original, root, rules).0
}

/// Like [`rewrite`], also returning what happened along the way.
pub fn rewrite_with_report(original: &str, root: &Node, rules: &RuleSet) -> (String, RewriteReport) {
    let mut pass = Pass {
        output: original.to_string(),
        offset: 0,
        rules,
        report: RewriteReport::default(),
    };
    if !rules.is_empty() {
        pass.visit(root);
    }
    debug!(
        "Rewrite pass finished: {} spans visited, {} rewritten, {} faults.",
        pass.report.spans_visited,
        pass.report.spans_rewritten,
        pass.report.faults.len()
    );
    (pass.output, pass.report)
}

struct Pass<'r> {
    output: String,
    /// Bytes added (or removed, when negative) by splices so far.
    offset: isize,
    rules: &'r RuleSet,
    report: RewriteReport,
}

impl Pass<'_> {
    fn visit(&mut self, node: &Node) {
        match &node.kind {
            // Never descend into the text content of a link or image.
            kind if kind.is_excluded() => return,
            NodeKind::PlainText { range, text } => self.rewrite_span(range.start, range.end, text),
            _ => {}
        }
        for child in &node.children {
            self.visit(child);
        }
    }

    fn rewrite_span(&mut self, start: usize, end: usize, expected: &str) {
        self.report.spans_visited += 1;

        let adjusted = shift(start, self.offset).zip(shift(end, self.offset));
        let current = adjusted
            .filter(|(s, e)| s <= e)
            .and_then(|(s, e)| self.output.get(s..e).map(|text| (s, e, text)));

        let (adj_start, adj_end, current) = match current {
            Some((s, e, text)) if text == expected => (s, e, text),
            other => {
                let fault = SpanIntegrityFault {
                    range: start..end,
                    expected: expected.to_string(),
                    found: other.map(|(_, _, t)| t.to_string()).unwrap_or_default(),
                };
                warn!("{}", fault);
                self.report.faults.push(fault);
                return;
            }
        };

        let replaced = self.rules.apply(current);
        if replaced == current {
            return;
        }

        let delta = replaced.len() as isize - current.len() as isize;
        let replaced = replaced.into_owned();
        self.output.replace_range(adj_start..adj_end, &replaced);
        self.offset += delta;
        self.report.spans_rewritten += 1;
    }
}

fn shift(position: usize, offset: isize) -> Option<usize> {
    position.checked_add_signed(offset)
}

/// Holds the active rule snapshot and rewrites messages against it.
///
/// Readers clone the current `Arc<RuleSet>` and then work without any lock;
/// reconfiguration swaps in a whole new snapshot. A rewrite in flight keeps
/// using the snapshot it started with.
#[derive(Debug, Default)]
pub struct Rewriter {
    rules: RwLock<Arc<RuleSet>>,
}

impl Rewriter {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules: RwLock::new(Arc::new(rules)),
        }
    }

    /// The rule set currently in force.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        // The lock only ever guards an `Arc` swap, so a poisoned value is still whole.
        let guard = self.rules.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Replaces the active rule set.
    pub fn replace_rules(&self, rules: RuleSet) {
        let count = rules.len();
        let next = Arc::new(rules);
        let mut guard = self.rules.write().unwrap_or_else(|e| e.into_inner());
        *guard = next;
        drop(guard);
        info!("Activated {} link rules.", count);
    }

    /// Parses `message` and rewrites it with the current rules.
    pub fn rewrite_message(&self, message: &str) -> String {
        self.rewrite_message_with_report(message).0
    }

    pub fn rewrite_message_with_report(&self, message: &str) -> (String, RewriteReport) {
        let rules = self.snapshot();
        if rules.is_empty() {
            return (message.to_string(), RewriteReport::default());
        }
        let root = parse_document(message);
        rewrite_with_report(message, &root, &rules)
    }
}
