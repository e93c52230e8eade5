//! compiler.rs - Turns link configuration into a compiled rule snapshot.
//!
//! Compilation never fails as a whole. Each rule that cannot be compiled is
//! logged, recorded in [`CompiledRules::errors`] and left out of the snapshot;
//! every other rule keeps its configured position relative to the rest.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};

use crate::config::LinkRule;
use crate::errors::AutolinkError;
use crate::rules::rule::{Rule, RuleSet};

/// The outcome of compiling a configuration.
#[derive(Debug, Default)]
pub struct CompiledRules {
    /// Rules that compiled, in configuration order.
    pub rules: RuleSet,
    /// One error per rule that was dropped.
    pub errors: Vec<AutolinkError>,
}

impl CompiledRules {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Compiles every enabled rule, in order, skipping the ones that fail.
pub fn compile_rules(links: &[LinkRule]) -> CompiledRules {
    debug!("Starting compilation of {} link rules.", links.len());

    let mut compiled = Vec::with_capacity(links.len());
    let mut errors = Vec::new();

    for (index, link) in links.iter().enumerate() {
        if !link.enabled {
            debug!("Skipping disabled rule '{}'.", link.display_name(index));
            continue;
        }

        match Rule::from_config(link, index) {
            Ok(rule) => {
                debug!("Rule '{}' compiled successfully.", rule.name());
                compiled.push(rule);
            }
            Err(e) => {
                warn!("Error creating autolinker: {}", e);
                errors.push(e);
            }
        }
    }

    debug!(
        "Finished compiling link rules. Total compiled: {}, dropped: {}.",
        compiled.len(),
        errors.len()
    );
    CompiledRules {
        rules: RuleSet::new(compiled),
        errors,
    }
}
