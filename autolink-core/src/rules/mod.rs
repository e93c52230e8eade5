//! Compiled link rules.
//!
//! A [`Rule`] is the immutable, compiled form of a configured
//! [`LinkRule`](crate::config::LinkRule); a [`RuleSet`] is one ordered snapshot
//! of them. `compiler` turns configuration into a `RuleSet`, dropping (and
//! reporting) rules that fail to compile.

pub mod compiler;
pub mod rule;

pub use compiler::{compile_rules, CompiledRules};
pub use rule::{is_word_char, Rule, RuleSet};
