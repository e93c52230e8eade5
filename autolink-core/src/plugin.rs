//! Host integration: load configuration, keep the rule snapshot current, and
//! rewrite each outgoing message.
//!
//! A host implements [`ConfigurationSource`] (or uses [`FileConfigSource`]) and
//! forwards its lifecycle hooks to [`AutolinkPlugin`].
//!
//! License: MIT OR APACHE 2.0

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::AutolinkConfig;
use crate::errors::AutolinkError;
use crate::rewriter::Rewriter;
use crate::rules::compile_rules;

/// Where the plugin's configuration comes from.
pub trait ConfigurationSource: Send + Sync {
    fn load_configuration(&self) -> Result<AutolinkConfig>;
}

/// A fixed, in-memory configuration.
impl ConfigurationSource for AutolinkConfig {
    fn load_configuration(&self) -> Result<AutolinkConfig> {
        Ok(self.clone())
    }
}

/// Reads the configuration from a YAML or JSON file every time it is asked.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigurationSource for FileConfigSource {
    fn load_configuration(&self) -> Result<AutolinkConfig> {
        AutolinkConfig::load_from_file(&self.path)
    }
}

/// A message on its way to being stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub message: String,
}

impl Post {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub struct AutolinkPlugin<S> {
    source: S,
    rewriter: Rewriter,
}

impl<S: ConfigurationSource> AutolinkPlugin<S> {
    /// Creates an inactive plugin. Until activation, messages pass through unchanged.
    pub fn new(source: S) -> Self {
        Self {
            source,
            rewriter: Rewriter::default(),
        }
    }

    /// Invoked when the plugin is activated.
    pub fn on_activate(&self) -> Result<()> {
        self.on_configuration_change()
    }

    /// Invoked when the configuration may have changed.
    ///
    /// Fails only if no configuration could be loaded at all, in which case the
    /// previous rules stay active. Individual broken rules are logged and dropped.
    pub fn on_configuration_change(&self) -> Result<()> {
        let config = self
            .source
            .load_configuration()
            .context("Failed to load plugin configuration")?;
        self.configure(&config);
        Ok(())
    }

    /// Compiles `config` and makes it the active rule set. Returns the errors
    /// of the rules that were dropped.
    pub fn configure(&self, config: &AutolinkConfig) -> Vec<AutolinkError> {
        let compiled = compile_rules(&config.links);
        self.rewriter.replace_rules(compiled.rules);
        compiled.errors
    }

    /// Invoked before a post is committed; rewrites its message.
    pub fn message_will_be_posted(&self, mut post: Post) -> Post {
        post.message = self.process_outgoing_message(&post.message);
        post
    }

    pub fn process_outgoing_message(&self, message: &str) -> String {
        let (rewritten, report) = self.rewriter.rewrite_message_with_report(message);
        debug!(
            "Processed outgoing message: {} of {} spans rewritten.",
            report.spans_rewritten, report.spans_visited
        );
        rewritten
    }

    pub fn rewriter(&self) -> &Rewriter {
        &self.rewriter
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
