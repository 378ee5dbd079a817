//! ConfigSync implementation
//!
//! Loads the configuration document (or the template when it does not
//! exist yet), merges collection descriptors into it and writes it back
//! together with the CMS entry page.

use std::borrow::Cow;

use similar::TextDiff;

use decapta_content::YamlDocument;
use decapta_fs::{NormalizedPath, constants, io};

use super::merge::{self, MergeSummary};
use crate::schema::Collection;
use crate::{Error, Result};

/// Template used when no configuration document exists yet.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../assets/config.yml");

/// Static page that loads the CMS, written next to the configuration.
pub const INDEX_PAGE: &str = include_str!("../../assets/index.html");

/// Result of merging descriptors into the configuration document.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// Configuration text before the merge, when the file existed
    pub previous: Option<String>,
    /// Configuration text after the merge
    pub rendered: String,
    pub summary: MergeSummary,
}

impl SyncOutcome {
    /// Whether writing would leave the configuration file byte-identical.
    pub fn is_unchanged(&self) -> bool {
        self.previous.as_deref() == Some(self.rendered.as_str())
    }

    /// Unified diff from the previous configuration to the merged one.
    pub fn diff(&self) -> String {
        let previous = self.previous.as_deref().unwrap_or("");
        TextDiff::from_lines(previous, self.rendered.as_str())
            .unified_diff()
            .context_radius(3)
            .header("config.yml (current)", "config.yml (synchronized)")
            .to_string()
    }
}

/// Synchronizes a configuration document with collection descriptors.
#[derive(Debug, Clone)]
pub struct ConfigSync {
    output: NormalizedPath,
    template: Cow<'static, str>,
    template_origin: NormalizedPath,
}

impl ConfigSync {
    /// Sync into `output`, starting from the embedded template.
    pub fn new(output: NormalizedPath) -> Self {
        Self {
            output,
            template: Cow::Borrowed(DEFAULT_TEMPLATE),
            template_origin: NormalizedPath::new("<embedded template>"),
        }
    }

    /// Use `text` as the template; `origin` names it in errors.
    pub fn with_template(mut self, origin: NormalizedPath, text: String) -> Self {
        self.template = Cow::Owned(text);
        self.template_origin = origin;
        self
    }

    /// Use the template stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be read.
    pub fn with_template_file(self, path: &NormalizedPath) -> Result<Self> {
        let text = io::read_text(path)?;
        Ok(self.with_template(path.clone(), text))
    }

    /// Location of the CMS entry page.
    pub fn index_path(&self) -> NormalizedPath {
        match self.output.parent() {
            Some(dir) => dir.join(constants::INDEX_HTML),
            None => NormalizedPath::new(constants::INDEX_HTML),
        }
    }

    /// Merge `collections` without writing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing document or the template cannot be
    /// read or parsed, or cannot hold collections.
    pub fn render(&self, collections: &[Collection]) -> Result<SyncOutcome> {
        let previous = if self.output.is_file() {
            Some(io::read_text(&self.output)?)
        } else {
            None
        };
        let (source, origin) = match &previous {
            Some(text) => (text.as_str(), &self.output),
            None => (&*self.template, &self.template_origin),
        };
        tracing::debug!(source = %origin, "loading configuration document");

        let mut document = YamlDocument::parse(source).map_err(|e| Error::parse(origin, "YAML", e))?;
        let summary = merge::synchronize(&mut document, collections, origin)?;

        Ok(SyncOutcome {
            previous,
            rendered: document.to_yaml_string(),
            summary,
        })
    }

    /// Write the merged configuration and the entry page.
    ///
    /// The entry page is rewritten every time.
    pub fn write(&self, outcome: &SyncOutcome) -> Result<()> {
        io::write_text(&self.output, &outcome.rendered)?;
        io::write_text(&self.index_path(), INDEX_PAGE)?;
        tracing::info!(
            config = %self.output,
            added = outcome.summary.added.len(),
            updated = outcome.summary.updated.len(),
            "configuration synchronized"
        );
        Ok(())
    }
}
