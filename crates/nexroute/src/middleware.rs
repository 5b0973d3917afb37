//! Route middleware
//!
//! Ordered `(pattern, transform)` pairs applied to page elements keyed by their
//! route path. Every matching entry applies, in registration order.

use crate::element::Element;
use crate::error::Result;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Element transform registered for a path pattern
pub type Transform = Arc<dyn Fn(Element) -> Element + Send + Sync>;

/// One registered middleware
#[derive(Clone)]
pub struct MiddlewareEntry {
    pub pattern: Regex,
    pub transform: Transform,
}

impl fmt::Debug for MiddlewareEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareEntry")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Ordered middleware list
///
/// Entries are only ever appended or cleared as a whole.
///
/// # Examples
///
/// ```
/// use nexroute::element::{Component, Element};
/// use nexroute::middleware::MiddlewarePipeline;
/// use regex::Regex;
///
/// let mut pipeline = MiddlewarePipeline::new();
/// let guard = Component::named("AuthGuard");
/// pipeline.register(Regex::new("^/admin").unwrap(), move |el| Element::wrap(guard.clone(), el));
///
/// let page = Element::component(Component::named("Users"));
/// assert_eq!(pipeline.apply("/admin/users", page).to_string(), "<AuthGuard><Users/></AuthGuard>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MiddlewarePipeline {
    entries: Vec<MiddlewareEntry>,
}

impl MiddlewarePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transform for paths matching `pattern`
    pub fn register<F>(&mut self, pattern: Regex, transform: F)
    where
        F: Fn(Element) -> Element + Send + Sync + 'static,
    {
        self.entries.push(MiddlewareEntry {
            pattern,
            transform: Arc::new(transform),
        });
    }

    /// Like [`register`](Self::register), compiling the pattern first
    pub fn register_pattern<F>(&mut self, pattern: &str, transform: F) -> Result<()>
    where
        F: Fn(Element) -> Element + Send + Sync + 'static,
    {
        self.register(Regex::new(pattern)?, transform);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[MiddlewareEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fold every matching transform over `element`, left to right
    pub fn apply(&self, path: &str, element: Element) -> Element {
        self.entries
            .iter()
            .filter(|entry| entry.pattern.is_match(path))
            .fold(element, |running, entry| {
                debug!(path, pattern = entry.pattern.as_str(), "applying middleware");
                (entry.transform)(running)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Component;

    fn wrapper(name: &'static str) -> impl Fn(Element) -> Element + Send + Sync + 'static {
        let component = Component::named(name);
        move |el| Element::wrap(component.clone(), el)
    }

    fn page() -> Element {
        Element::component(Component::named("Page"))
    }

    #[test]
    fn test_overlapping_patterns_compose_in_order() {
        let mut pipeline = MiddlewarePipeline::new();
        pipeline.register(Regex::new("^/dash").unwrap(), wrapper("First"));
        pipeline.register(Regex::new("settings$").unwrap(), wrapper("Second"));

        let result = pipeline.apply("/dash/settings", page());
        assert_eq!(result.to_string(), "<Second><First><Page/></First></Second>");
    }

    #[test]
    fn test_non_matching_entries_are_skipped() {
        let mut pipeline = MiddlewarePipeline::new();
        pipeline.register(Regex::new("^/admin").unwrap(), wrapper("Guard"));
        pipeline.register(Regex::new(".*").unwrap(), wrapper("Tracker"));

        let result = pipeline.apply("/blog", page());
        assert_eq!(result.to_string(), "<Tracker><Page/></Tracker>");
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = MiddlewarePipeline::new();
        assert_eq!(pipeline.apply("/", page()).to_string(), "<Page/>");
    }

    #[test]
    fn test_clear() {
        let mut pipeline = MiddlewarePipeline::new();
        pipeline.register_pattern("^/", wrapper("A")).unwrap();
        pipeline.register_pattern("^/", wrapper("B")).unwrap();
        assert_eq!(pipeline.len(), 2);

        pipeline.clear();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.apply("/x", page()).to_string(), "<Page/>");
    }

    #[test]
    fn test_register_pattern_rejects_bad_regex() {
        let mut pipeline = MiddlewarePipeline::new();
        assert!(pipeline.register_pattern("[unclosed", wrapper("A")).is_err());
        assert!(pipeline.is_empty());
    }
}
