//! Render options.

use std::path::PathBuf;

use vmarkdown_config::RenderConfig;
use vmarkdown_tree::MAX_HEADING_LEVEL;

use crate::error::RenderError;

/// What goes into a page besides the markdown itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Style sheets, concatenated in order with blank lines between them.
    pub css: Vec<PathBuf>,
    /// Templates with a `{body}` placeholder, applied in order.
    pub templates: Vec<PathBuf>,
    /// Deepest heading level listed in the table of contents.
    pub toc_max_level: u8,
    /// Inline every image as a base64 data URI.
    pub embed_images: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            css: Vec::new(),
            templates: Vec::new(),
            toc_max_level: MAX_HEADING_LEVEL,
            embed_images: false,
        }
    }
}

impl RenderOptions {
    /// Create options with defaults: no style sheets or templates, full
    /// table of contents, images left as links.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn css(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.css = paths.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn templates(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.templates = paths.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn toc_max_level(mut self, level: u8) -> Self {
        self.toc_max_level = level;
        self
    }

    #[must_use]
    pub fn embed_images(mut self, enabled: bool) -> Self {
        self.embed_images = enabled;
        self
    }

    /// Check option ranges. Levels above 6 are accepted and clamp to 6.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidOptions`] when `toc_max_level` is 0.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.toc_max_level == 0 {
            return Err(RenderError::InvalidOptions(
                "toc_max_level must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Table of contents depth after clamping to the deepest heading level.
    #[must_use]
    pub fn effective_toc_max_level(&self) -> u8 {
        self.toc_max_level.min(MAX_HEADING_LEVEL)
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            css: config.css.clone(),
            templates: config.templates.clone(),
            toc_max_level: config.toc_max_level,
            embed_images: config.embed_images,
        }
    }
}
