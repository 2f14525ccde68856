//! Image inlining as base64 data URIs.
//!
//! `http://` and `https://` sources are downloaded, every other `src` is read
//! from disk relative to a base directory. Resolved URIs go through an
//! [`ImageCache`] so a long-running host can skip repeat fetches.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::Duration;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use ureq::Agent;
use vmarkdown_tree::Document;

use crate::error::RenderError;

/// Timeout for a single remote image request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest remote image body accepted.
const MAX_IMAGE_BYTES: u64 = 64 * 1024 * 1024;

/// Store of already resolved data URIs, keyed by [`ImageLoader::cache_key`].
///
/// Shared across renders, so implementations must tolerate concurrent use.
pub trait ImageCache: Send + Sync {
    /// Data URI previously stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Remember the data URI for `key`, replacing any earlier entry.
    fn set(&self, key: &str, uri: &str);
}

/// [`ImageCache`] that never stores anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullImageCache;

impl ImageCache for NullImageCache {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _uri: &str) {}
}

/// In-memory [`ImageCache`] for hosts that render repeatedly.
#[derive(Debug, Default)]
pub struct MemoryImageCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryImageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached images.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

impl ImageCache for MemoryImageCache {
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    fn set(&self, key: &str, uri: &str) {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_owned(), uri.to_owned());
    }
}

/// Create HTTP agent for image downloads.
#[must_use]
pub fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Loads image bytes and turns them into data URIs.
pub struct ImageLoader {
    agent: Agent,
    base_dir: PathBuf,
}

impl ImageLoader {
    /// Create a loader resolving local paths against `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            agent: create_agent(DEFAULT_FETCH_TIMEOUT),
            base_dir: base_dir.into(),
        }
    }

    /// Replace the HTTP agent, e.g. to change the timeout.
    #[must_use]
    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agent = agent;
        self
    }

    /// Resolve `src` to a `data:` URI.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ImageFetch`] or [`RenderError::ImageStatus`]
    /// when a download fails, and [`RenderError::ImageRead`] when a local
    /// file cannot be read.
    pub fn data_uri(&self, src: &str) -> Result<String, RenderError> {
        let data = if is_remote(src) {
            self.fetch(src)?
        } else {
            self.read_local(src)?
        };
        let mime = guess_mime(src);
        Ok(format!("data:{mime};base64,{}", BASE64_STANDARD.encode(&data)))
    }

    /// Cache key for `src`: the URL for remote images, the resolved path for
    /// local ones, so equal relative paths from different documents stay
    /// apart.
    #[must_use]
    pub fn cache_key(&self, src: &str) -> String {
        if is_remote(src) {
            src.to_owned()
        } else {
            self.local_path(src).to_string_lossy().into_owned()
        }
    }

    fn local_path(&self, src: &str) -> PathBuf {
        self.base_dir.join(strip_suffixes(src))
    }

    fn fetch(&self, src: &str) -> Result<Vec<u8>, RenderError> {
        tracing::info!(src, "Fetching image");
        let fetch_error = |e: ureq::Error| RenderError::ImageFetch {
            src: src.to_owned(),
            source: Box::new(e),
        };

        let response = self.agent.get(src).call().map_err(fetch_error)?;
        let status = response.status().as_u16();
        if status >= 400 {
            return Err(RenderError::ImageStatus {
                src: src.to_owned(),
                status,
            });
        }

        let mut body = response.into_body();
        body.with_config()
            .limit(MAX_IMAGE_BYTES)
            .read_to_vec()
            .map_err(fetch_error)
    }

    fn read_local(&self, src: &str) -> Result<Vec<u8>, RenderError> {
        let path = self.local_path(src);
        tracing::info!(path = %path.display(), "Reading image");
        std::fs::read(&path).map_err(|source| RenderError::ImageRead {
            src: src.to_owned(),
            source,
        })
    }
}

/// Replace every `<img>` `src` in `doc` with a data URI.
///
/// Images without a `src` are left alone. A failure aborts the pass; images
/// already rewritten stay rewritten.
///
/// # Errors
///
/// Propagates the first [`ImageLoader::data_uri`] failure.
pub fn embed_images(
    doc: &mut Document,
    cache: &dyn ImageCache,
    loader: &ImageLoader,
) -> Result<(), RenderError> {
    let images = doc.find_elements(|el| el.name == "img");
    let mut embedded = 0;

    for image in images {
        let Some(src) = doc
            .element(image)
            .and_then(|el| el.attr("src"))
            .map(str::to_owned)
        else {
            continue;
        };

        let key = loader.cache_key(&src);
        let uri = if let Some(uri) = cache.get(&key) {
            uri
        } else {
            let uri = loader.data_uri(&src)?;
            cache.set(&key, &uri);
            uri
        };

        if let Some(el) = doc.element_mut(image) {
            el.set_attr("src", uri);
        }
        embedded += 1;
    }

    tracing::debug!(embedded, "embedded images");
    Ok(())
}

fn is_remote(src: &str) -> bool {
    src.starts_with("https://") || src.starts_with("http://")
}

/// `src` without its query string and fragment.
fn strip_suffixes(src: &str) -> &str {
    src.split(['?', '#']).next().unwrap_or(src)
}

/// MIME type guessed from the file extension, empty when unknown.
fn guess_mime(src: &str) -> String {
    mime_guess::from_path(Path::new(strip_suffixes(src)))
        .first()
        .map(|mime| mime.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vmarkdown_tree::parse_html;

    const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake";

    fn loader_with_png() -> (tempfile::TempDir, ImageLoader) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pic.png"), PNG_BYTES).unwrap();
        let loader = ImageLoader::new(dir.path());
        (dir, loader)
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime("a/b/pic.png"), "image/png");
        assert_eq!(guess_mime("https://x.org/photo.jpg?size=2#top"), "image/jpeg");
        assert_eq!(guess_mime("diagram.svg"), "image/svg+xml");
        assert_eq!(guess_mime("no_extension"), "");
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/a.png"));
        assert!(is_remote("http://example.com/a.png"));
        assert!(!is_remote("images/a.png"));
        assert!(!is_remote("ftp://example.com/a.png"));
    }

    #[test]
    fn test_local_data_uri() {
        let (_dir, loader) = loader_with_png();
        let uri = loader.data_uri("pic.png").unwrap();
        assert_eq!(
            uri,
            format!("data:image/png;base64,{}", BASE64_STANDARD.encode(PNG_BYTES))
        );
    }

    #[test]
    fn test_unknown_extension_has_empty_mime() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blob"), b"abc").unwrap();
        let uri = ImageLoader::new(dir.path()).data_uri("blob").unwrap();
        assert_eq!(uri, "data:;base64,YWJj");
    }

    #[test]
    fn test_missing_local_file() {
        let (_dir, loader) = loader_with_png();
        let err = loader.data_uri("nope.png").unwrap_err();
        assert!(matches!(err, RenderError::ImageRead { ref src, .. } if src == "nope.png"));
    }

    #[test]
    fn test_embed_rewrites_src_and_fills_cache() {
        let (_dir, loader) = loader_with_png();
        let cache = MemoryImageCache::new();
        let mut doc = parse_html(r#"<p><img src="pic.png" alt="x"/><img alt="no src"/></p>"#).unwrap();

        embed_images(&mut doc, &cache, &loader).unwrap();

        let html = doc.to_html();
        assert!(html.contains(r#"<img src="data:image/png;base64,"#));
        assert!(html.contains(r#"<img alt="no src"/>"#));
        assert_eq!(cache.len(), 1);
        assert!(
            cache
                .get(&loader.cache_key("pic.png"))
                .unwrap()
                .starts_with("data:image/png")
        );
    }

    #[test]
    fn test_cache_keys() {
        let loader = ImageLoader::new("/docs/a");
        assert_eq!(
            loader.cache_key("https://x.org/pic.png?v=2"),
            "https://x.org/pic.png?v=2"
        );
        assert_eq!(
            loader.cache_key("img/pic.png#top"),
            Path::new("/docs/a/img/pic.png").to_string_lossy().into_owned()
        );
        assert_ne!(
            loader.cache_key("pic.png"),
            ImageLoader::new("/docs/b").cache_key("pic.png")
        );
    }

    #[test]
    fn test_shared_cache_keeps_same_name_images_apart() {
        let root = tempfile::tempdir().unwrap();
        let dir_a = root.path().join("a");
        let dir_b = root.path().join("b");
        std::fs::create_dir_all(&dir_a).unwrap();
        std::fs::create_dir_all(&dir_b).unwrap();
        std::fs::write(dir_a.join("pic.gif"), b"AAA").unwrap();
        std::fs::write(dir_b.join("pic.gif"), b"BBB").unwrap();

        let cache = MemoryImageCache::new();
        let mut doc_a = parse_html(r#"<img src="pic.gif"/>"#).unwrap();
        let mut doc_b = parse_html(r#"<img src="pic.gif"/>"#).unwrap();
        embed_images(&mut doc_a, &cache, &ImageLoader::new(&dir_a)).unwrap();
        embed_images(&mut doc_b, &cache, &ImageLoader::new(&dir_b)).unwrap();

        assert_eq!(doc_a.to_html(), r#"<img src="data:image/gif;base64,QUFB"/>"#);
        assert_eq!(doc_b.to_html(), r#"<img src="data:image/gif;base64,QkJC"/>"#);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_embed_uses_cached_uri() {
        let (_dir, loader) = loader_with_png();
        let cache = MemoryImageCache::new();
        cache.set("https://unreachable.invalid/a.png", "data:image/png;base64,AAAA");
        let mut doc = parse_html(r#"<img src="https://unreachable.invalid/a.png"/>"#).unwrap();

        embed_images(&mut doc, &cache, &loader).unwrap();

        assert_eq!(doc.to_html(), r#"<img src="data:image/png;base64,AAAA"/>"#);
    }

    #[test]
    fn test_embed_failure_is_fatal() {
        let (_dir, loader) = loader_with_png();
        let mut doc = parse_html(r#"<img src="missing.gif"/>"#).unwrap();
        let err = embed_images(&mut doc, &NullImageCache, &loader).unwrap_err();
        assert!(matches!(err, RenderError::ImageRead { .. }));
    }

    #[test]
    fn test_null_cache_never_stores() {
        NullImageCache.set("a", "b");
        assert_eq!(NullImageCache.get("a"), None);
    }
}
