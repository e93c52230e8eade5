//! Configuration management for `autolink-core`.
//!
//! This module defines the serialisable link rules and the top-level
//! configuration that a host hands to the engine. It handles loading YAML or
//! JSON configurations and provides validation helpers that report problems
//! without rejecting the whole file: a single broken rule must never prevent the
//! rest from loading.
//!
//! Rule order is significant. Rules are applied one after another to the same
//! span, so a later rule sees (and may rewrite) the output of an earlier one.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::AutolinkError;

/// Maximum allowed length for a pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

lazy_static! {
    /// Matches `$1` / `${1}` / `${name}` references inside a replacement template.
    static ref CAPTURE_REF: Regex = Regex::new(r"\$(?:(\d+)|\{(\w+)\})").unwrap();
}

/// A single pattern → replacement pair as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LinkRule {
    /// Label used in diagnostics. Unnamed rules are reported by position.
    pub name: Option<String>,
    /// Human-readable description of what the rule links.
    pub description: Option<String>,
    /// The pattern to match. Plain words are valid patterns.
    #[serde(alias = "Pattern")]
    pub pattern: String,
    /// Text inserted in place of each match.
    #[serde(alias = "template", alias = "Template")]
    pub replacement: String,
    /// If true, `$1` and `${name}` in the replacement expand to capture groups.
    pub expand_captures: bool,
    /// If true, the pattern matches regardless of letter case.
    pub case_insensitive: bool,
    /// Disabled rules are kept in the file but never compiled.
    pub enabled: bool,
}

impl Default for LinkRule {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            pattern: String::new(),
            replacement: String::new(),
            expand_captures: false,
            case_insensitive: false,
            enabled: true,
        }
    }
}

impl LinkRule {
    /// Convenience constructor for a literal pattern/replacement pair.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            ..Self::default()
        }
    }

    /// Sets the diagnostic name of this rule.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The name used in logs and error messages.
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("rule #{}", index + 1),
        }
    }
}

/// Top-level configuration: the ordered list of link rules.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct AutolinkConfig {
    #[serde(default, alias = "Links")]
    pub links: Vec<LinkRule>,
}

impl AutolinkConfig {
    pub fn new(links: Vec<LinkRule>) -> Self {
        Self { links }
    }

    /// Loads link rules from a file. `.json` files are parsed as JSON,
    /// everything else as YAML.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading link rules from: {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| AutolinkError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
        .map_err(|e| AutolinkError::ConfigParse {
            path: path.to_path_buf(),
            message: format!("{:#}", e),
        })?;

        for issue in validate_links(&config.links) {
            warn!("{}", issue);
        }
        info!("Loaded {} link rules from file {}.", config.links.len(), path.display());
        Ok(config)
    }

    /// Parses a YAML document into a configuration.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // An empty document is a valid, empty configuration.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(text).context("Failed to parse YAML link configuration")
    }

    /// Parses a JSON document into a configuration.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse JSON link configuration")
    }

    /// Disables the named rules, warning about names that do not exist.
    pub fn disable_links(&mut self, names: &[String]) {
        let known: HashSet<&str> = self.links.iter().filter_map(|l| l.name.as_deref()).collect();
        for name in names {
            if !known.contains(name.as_str()) {
                warn!("Rule '{}' in disable list does not exist.", name);
            }
        }

        let disable: HashSet<&str> = names.iter().map(String::as_str).collect();
        for link in &mut self.links {
            if link.name.as_deref().map_or(false, |n| disable.contains(n)) {
                link.enabled = false;
            }
        }
        debug!(
            "Active link rules after filtering: {}",
            self.links.iter().filter(|l| l.enabled).count()
        );
    }
}

/// Checks rule integrity and returns a human-readable issue per problem.
///
/// Pattern compilation itself is left to the compiler, which drops broken rules;
/// this only flags things that compile but are almost certainly mistakes.
pub fn validate_links(links: &[LinkRule]) -> Vec<String> {
    let mut issues = Vec::new();
    let mut names = HashSet::new();

    for (index, link) in links.iter().enumerate() {
        let display = link.display_name(index);

        if let Some(name) = &link.name {
            if !names.insert(name.as_str()) {
                issues.push(format!("Duplicate rule name found: '{}'.", name));
            }
        }

        if link.pattern.is_empty() {
            issues.push(format!("Rule '{}' has an empty `pattern` field.", display));
            continue;
        }

        if link.replacement.is_empty() {
            issues.push(format!(
                "Rule '{}' has an empty `replacement`; matches will be deleted.",
                display
            ));
        }

        if !link.expand_captures {
            continue;
        }

        // Only checkable when the pattern compiles; otherwise the compiler reports it.
        let Ok(regex) = Regex::new(&link.pattern) else {
            continue;
        };
        let group_count = regex.captures_len() - 1;
        let group_names: HashSet<&str> = regex.capture_names().flatten().collect();

        // `$$` escapes a dollar sign, so strip those before looking for references.
        let template = link.replacement.replace("$$", "");
        for cap in CAPTURE_REF.captures_iter(&template) {
            if let Some(index) = cap.get(1) {
                if let Ok(group) = index.as_str().parse::<usize>() {
                    if group > group_count {
                        issues.push(format!(
                            "Rule '{}': replacement references non-existent capture group '${}'.",
                            display, group
                        ));
                    }
                }
            } else if let Some(name) = cap.get(2) {
                let name = name.as_str();
                let numeric = name.parse::<usize>().map_or(false, |g| g <= group_count);
                if !numeric && !group_names.contains(name) {
                    issues.push(format!(
                        "Rule '{}': replacement references unknown capture group '${{{}}}'.",
                        display, name
                    ));
                }
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_are_omitted() {
        let config = AutolinkConfig::from_yaml_str("links:\n  - pattern: Rust\n    replacement: \"[Rust](https://rust-lang.org)\"\n").unwrap();
        let link = &config.links[0];
        assert!(link.enabled);
        assert!(!link.expand_captures);
        assert!(!link.case_insensitive);
        assert_eq!(link.name, None);
    }

    #[test]
    fn test_accepts_original_key_spelling() {
        let json = r#"{"Links": [{"Pattern": "(Mattermost)", "Template": "[Mattermost](https://mattermost.com)"}]}"#;
        let config = AutolinkConfig::from_json_str(json).unwrap();
        assert_eq!(config.links.len(), 1);
        assert_eq!(config.links[0].pattern, "(Mattermost)");
        assert_eq!(config.links[0].replacement, "[Mattermost](https://mattermost.com)");
    }

    #[test]
    fn test_empty_yaml_is_empty_config() {
        assert_eq!(AutolinkConfig::from_yaml_str("  \n").unwrap(), AutolinkConfig::default());
    }

    #[test]
    fn test_display_name_falls_back_to_position() {
        assert_eq!(LinkRule::new("a", "b").display_name(2), "rule #3");
        assert_eq!(LinkRule::new("a", "b").named("docs").display_name(2), "docs");
    }

    #[test]
    fn test_validate_flags_duplicates_and_empty_patterns() {
        let links = vec![
            LinkRule::new("a", "b").named("dup"),
            LinkRule::new("c", "d").named("dup"),
            LinkRule::new("", "x"),
        ];
        let issues = validate_links(&links);
        assert!(issues.iter().any(|i| i.contains("Duplicate rule name found: 'dup'")));
        assert!(issues.iter().any(|i| i.contains("'rule #3' has an empty `pattern`")));
    }

    #[test]
    fn test_validate_capture_references() {
        let mut ok = LinkRule::new(r"MM-(\d+)", "[MM-$1](https://issues.example.com/MM-$1)");
        ok.expand_captures = true;
        assert!(validate_links(&[ok]).is_empty());

        let mut bad = LinkRule::new(r"MM-(\d+)", "$2 ${ticket} costs $$5");
        bad.expand_captures = true;
        let issues = validate_links(&[bad]);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("'$2'"));
        assert!(issues[1].contains("'${ticket}'"));
    }

    #[test]
    fn test_capture_references_ignored_for_literal_rules() {
        let link = LinkRule::new("price", "$9");
        assert!(validate_links(&[link]).is_empty());
    }

    #[test]
    fn test_disable_links_by_name() {
        let mut config = AutolinkConfig::new(vec![
            LinkRule::new("a", "b").named("keep"),
            LinkRule::new("c", "d").named("drop"),
        ]);
        config.disable_links(&["drop".to_string(), "missing".to_string()]);
        assert!(config.links[0].enabled);
        assert!(!config.links[1].enabled);
    }
}
