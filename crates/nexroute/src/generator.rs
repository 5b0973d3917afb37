//! Route generation and change handling
//!
//! A [`RouteGenerator`] pairs a [`RouterContext`] with the current file listings and
//! regenerates the whole route list on demand. When the build tooling reports a
//! changed file, [`RouteGenerator::handle_file_change`] decides whether routes must be
//! regenerated and drops the cached unit that file backed.

use crate::context::RouterContext;
use crate::convert::{not_found_key, page_key};
use crate::definition::RouteDef;
use crate::path::{extract_route_path, relative_to_pages_dir, ArtifactKind};
use crate::tree::RouteSources;
use tracing::debug;

/// Outcome of a reported file change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// Not a route file under the pages directory
    Ignored,
    /// Routes must be regenerated
    Regenerate {
        kind: ArtifactKind,
        /// Raw route path of the changed file
        route_path: String,
        /// Whether a cached unit was dropped
        invalidated: bool,
    },
}

impl FileChange {
    pub fn needs_regeneration(&self) -> bool {
        matches!(self, FileChange::Regenerate { .. })
    }
}

/// Regenerates routes from the current sources
///
/// # Examples
///
/// ```
/// use nexroute::context::RouterContext;
/// use nexroute::element::{ready, Component};
/// use nexroute::generator::RouteGenerator;
/// use nexroute::tree::RouteSources;
///
/// let sources = RouteSources::new()
///     .layout("src/app/layout.tsx", Component::named("Root"))
///     .page("src/app/page.tsx", ready(Component::named("Home")));
///
/// let generator = RouteGenerator::new(RouterContext::new(), sources);
/// let routes = generator.generate();
/// assert_eq!(routes[0].path(), Some("/"));
/// assert!(routes[0].children()[0].is_index());
/// ```
#[derive(Debug)]
pub struct RouteGenerator {
    context: RouterContext,
    sources: RouteSources,
}

impl RouteGenerator {
    pub fn new(context: RouterContext, sources: RouteSources) -> Self {
        Self { context, sources }
    }

    pub fn context(&self) -> &RouterContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut RouterContext {
        &mut self.context
    }

    pub fn sources(&self) -> &RouteSources {
        &self.sources
    }

    /// Swap in a fresh listing, e.g. after the resolver re-scanned the pages directory
    pub fn replace_sources(&mut self, sources: RouteSources) {
        self.sources = sources;
    }

    /// Build the tree and convert it, from scratch
    pub fn generate(&self) -> Vec<RouteDef> {
        self.context.generate(&self.sources)
    }

    /// React to a changed file reported by the build tooling
    pub fn handle_file_change(&self, path: &str) -> FileChange {
        let pages_dir = self.context.config().pages_dir();
        let files = self.context.files();

        let Some(relative) = relative_to_pages_dir(path, pages_dir) else {
            return FileChange::Ignored;
        };
        let Some(kind) = files.classify(relative) else {
            return FileChange::Ignored;
        };

        let route_path = extract_route_path(relative, "", files).to_string();
        let invalidated = match kind {
            ArtifactKind::Page => self.context.cache().invalidate(&page_key(&route_path, "/")),
            ArtifactKind::NotFound => self.context.cache().invalidate(&not_found_key(&route_path)),
            ArtifactKind::Layout => false,
        };

        debug!(path, %kind, route_path = %route_path, invalidated, "route file changed");
        FileChange::Regenerate {
            kind,
            route_path,
            invalidated,
        }
    }
}
