//! Markdown file to HTML page.

use std::path::Path;
use std::sync::Arc;

use ureq::Agent;
use vmarkdown_renderer::MarkdownRenderer;
use vmarkdown_tree::{
    Document, SlugRegistry, add_head_title, add_header_anchors, add_toc, fix_classes, parse_html,
};

use crate::error::RenderError;
use crate::images::{
    DEFAULT_FETCH_TIMEOUT, ImageCache, ImageLoader, NullImageCache, create_agent, embed_images,
};
use crate::options::RenderOptions;
use crate::page::{apply_templates, concat_css, html_replacements, page_html, read_all, read_text};

/// Renders markdown into standalone HTML pages.
///
/// Holds no per-document state: one renderer can serve any number of
/// renders, including concurrent ones. The only thing shared between renders
/// is the image cache.
pub struct Renderer {
    options: RenderOptions,
    image_cache: Arc<dyn ImageCache>,
    agent: Agent,
}

impl Renderer {
    /// Create a renderer.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidOptions`] if `options` fail validation.
    pub fn new(options: RenderOptions) -> Result<Self, RenderError> {
        options.validate()?;
        Ok(Self {
            options,
            image_cache: Arc::new(NullImageCache),
            agent: create_agent(DEFAULT_FETCH_TIMEOUT),
        })
    }

    /// Share an image cache across renders.
    #[must_use]
    pub fn with_image_cache(mut self, cache: Arc<dyn ImageCache>) -> Self {
        self.image_cache = cache;
        self
    }

    /// Use a custom HTTP agent for remote images.
    #[must_use]
    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agent = agent;
        self
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a markdown file to an HTML string.
    ///
    /// Local images resolve against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if any input file cannot be read or an image
    /// cannot be embedded.
    pub fn render_file(&self, path: &Path) -> Result<String, RenderError> {
        Ok(self.render_file_document(path)?.to_html())
    }

    /// Render a markdown file to a document tree.
    ///
    /// # Errors
    ///
    /// See [`Renderer::render_file`].
    pub fn render_file_document(&self, path: &Path) -> Result<Document, RenderError> {
        let markdown = read_text(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        tracing::debug!(path = %path.display(), "rendering file");
        self.render_document(&markdown, base_dir)
    }

    /// Render markdown text to an HTML string.
    ///
    /// # Errors
    ///
    /// See [`Renderer::render_document`].
    pub fn render_string(&self, markdown: &str, base_dir: &Path) -> Result<String, RenderError> {
        Ok(self.render_document(markdown, base_dir)?.to_html())
    }

    /// Render markdown text to a document tree.
    ///
    /// Templates wrap the markdown before compilation, so template text is
    /// markdown too. The tree passes run in a fixed order: title, anchors,
    /// table of contents, class fixes, then optional image embedding.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Read`] for unreadable templates or style sheets,
    /// [`RenderError::Tree`] if the page cannot be parsed, and image errors
    /// when embedding is enabled and a source cannot be loaded.
    pub fn render_document(
        &self,
        markdown: &str,
        base_dir: &Path,
    ) -> Result<Document, RenderError> {
        let templates = read_all(&self.options.templates)?;
        let source = apply_templates(markdown, &templates);
        let css = concat_css(&read_all(&self.options.css)?);

        let body = MarkdownRenderer::new().render_markdown(&source);
        let html = html_replacements(&page_html(&css, &body));

        let mut doc = parse_html(&html)?;
        add_head_title(&mut doc);
        let headings = add_header_anchors(&mut doc, &mut SlugRegistry::new());
        add_toc(&mut doc, &headings, self.options.effective_toc_max_level())?;
        fix_classes(&mut doc);

        if self.options.embed_images {
            let loader = ImageLoader::new(base_dir).with_agent(self.agent.clone());
            embed_images(&mut doc, self.image_cache.as_ref(), &loader)?;
        }

        Ok(doc)
    }
}
