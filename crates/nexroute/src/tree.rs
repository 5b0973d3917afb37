//! Route tree construction
//!
//! Folds the three file listings (layouts, then pages, then not-founds) into one tree
//! with a node per distinct path prefix. Child order is first-insertion order across
//! that combined walk and is carried into the emitted routes as match priority.

use crate::element::{Component, Loader, Module};
use crate::path::{extract_route_path, split_segments, ArtifactKind, RouteFiles};
use std::fmt;
use tracing::{debug, warn};

/// Children of a node, kept as an ordered association list
#[derive(Debug, Clone, Default)]
pub struct Children {
    entries: Vec<(String, RouteNode)>,
}

impl Children {
    pub fn get(&self, segment: &str) -> Option<&RouteNode> {
        self.entries
            .iter()
            .find(|(key, _)| key == segment)
            .map(|(_, node)| node)
    }

    /// Child for `segment`, appended at the end when missing
    fn get_or_insert_with<F>(&mut self, segment: &str, create: F) -> &mut RouteNode
    where
        F: FnOnce() -> RouteNode,
    {
        let index = match self.entries.iter().position(|(key, _)| key == segment) {
            Some(index) => index,
            None => {
                self.entries.push((segment.to_string(), create()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RouteNode> {
        self.entries.iter().map(|(_, node)| node)
    }

    pub fn segments(&self) -> Vec<&str> {
        self.entries.iter().map(|(key, _)| key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One node per path segment
#[derive(Clone, Default)]
pub struct RouteNode {
    /// Raw segment as written in the file identifier
    pub segment: String,
    /// Slash-joined raw segments from the root; stable identity for caching
    pub full_path: String,
    pub page: Option<Loader>,
    pub layout: Option<Component>,
    pub not_found: Option<Loader>,
    pub children: Children,
}

impl RouteNode {
    /// The empty root node
    pub fn root() -> Self {
        Self::default()
    }

    fn child(segment: &str, full_path: String) -> Self {
        Self {
            segment: segment.to_string(),
            full_path,
            ..Self::default()
        }
    }

    pub fn is_root(&self) -> bool {
        self.segment.is_empty() && self.full_path.is_empty()
    }

    /// Whether the node carries no artifact of its own
    pub fn is_bare(&self) -> bool {
        self.page.is_none() && self.layout.is_none() && self.not_found.is_none()
    }

    /// Descend along a raw route path (`""` is the node itself)
    pub fn find(&self, route_path: &str) -> Option<&RouteNode> {
        split_segments(route_path).try_fold(self, |node, segment| node.children.get(segment))
    }

    /// Total number of nodes below and including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.nodes().map(RouteNode::node_count).sum::<usize>()
    }
}

impl fmt::Debug for RouteNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("segment", &self.segment)
            .field("full_path", &self.full_path)
            .field("page", &self.page.is_some())
            .field("layout", &self.layout.as_ref().map(Component::name))
            .field("not_found", &self.not_found.is_some())
            .field("children", &self.children)
            .finish()
    }
}

/// The three file listings, keyed by raw file identifier
///
/// Each list keeps its insertion order.
#[derive(Clone, Default)]
pub struct RouteSources {
    pub layouts: Vec<(String, Module)>,
    pub pages: Vec<(String, Loader)>,
    pub not_founds: Vec<(String, Loader)>,
}

impl RouteSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(mut self, identifier: impl Into<String>, module: impl Into<Module>) -> Self {
        self.layouts.push((identifier.into(), module.into()));
        self
    }

    pub fn page(mut self, identifier: impl Into<String>, loader: Loader) -> Self {
        self.pages.push((identifier.into(), loader));
        self
    }

    pub fn not_found(mut self, identifier: impl Into<String>, loader: Loader) -> Self {
        self.not_founds.push((identifier.into(), loader));
        self
    }

    pub fn len(&self) -> usize {
        self.layouts.len() + self.pages.len() + self.not_founds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for RouteSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSources")
            .field("layouts", &ids_of(&self.layouts))
            .field("pages", &ids_of(&self.pages))
            .field("not_founds", &ids_of(&self.not_founds))
            .finish()
    }
}

fn ids_of<T>(list: &[(String, T)]) -> Vec<&str> {
    list.iter().map(|(id, _)| id.as_str()).collect()
}

enum Artifact<'a> {
    Layout(&'a Component),
    Page(&'a Loader),
    NotFound(&'a Loader),
}

impl Artifact<'_> {
    fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::Layout(_) => ArtifactKind::Layout,
            Artifact::Page(_) => ArtifactKind::Page,
            Artifact::NotFound(_) => ArtifactKind::NotFound,
        }
    }
}

fn insert(
    root: &mut RouteNode,
    identifier: &str,
    artifact: Artifact<'_>,
    pages_dir: &str,
    files: &RouteFiles,
) {
    let route_path = extract_route_path(identifier, pages_dir, files);

    let mut node = root;
    let mut full_path = String::new();
    for segment in split_segments(route_path) {
        if !full_path.is_empty() {
            full_path.push('/');
        }
        full_path.push_str(segment);
        let path = full_path.clone();
        node = node
            .children
            .get_or_insert_with(segment, || RouteNode::child(segment, path));
    }

    let kind = artifact.kind();
    let replaced = match artifact {
        Artifact::Layout(component) => node.layout.replace(component.clone()).is_some(),
        Artifact::Page(loader) => node.page.replace(loader.clone()).is_some(),
        Artifact::NotFound(loader) => node.not_found.replace(loader.clone()).is_some(),
    };

    if replaced {
        warn!(identifier, route_path, %kind, "duplicate route file, keeping the last one");
    } else {
        debug!(identifier, route_path, %kind, "added route file");
    }
}

/// Build the route tree
///
/// Identifiers are resolved against `pages_dir` and `files`; identifiers that were
/// already stripped by the resolver work as well.
///
/// # Examples
///
/// ```
/// use nexroute::element::{ready, Component};
/// use nexroute::path::RouteFiles;
/// use nexroute::tree::{build_route_tree, RouteSources};
///
/// let sources = RouteSources::new()
///     .layout("src/app/layout.tsx", Component::named("Root"))
///     .page("src/app/blog/[id]/page.tsx", ready(Component::named("Post")));
///
/// let tree = build_route_tree(&sources, "src/app", &RouteFiles::default());
/// assert!(tree.layout.is_some());
/// assert_eq!(tree.find("blog/[id]").unwrap().full_path, "blog/[id]");
/// ```
pub fn build_route_tree(sources: &RouteSources, pages_dir: &str, files: &RouteFiles) -> RouteNode {
    let mut root = RouteNode::root();

    for (identifier, module) in &sources.layouts {
        insert(&mut root, identifier, Artifact::Layout(&module.default), pages_dir, files);
    }
    for (identifier, loader) in &sources.pages {
        insert(&mut root, identifier, Artifact::Page(loader), pages_dir, files);
    }
    for (identifier, loader) in &sources.not_founds {
        insert(&mut root, identifier, Artifact::NotFound(loader), pages_dir, files);
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ready;

    fn page(name: &str) -> Loader {
        ready(Component::named(name))
    }

    fn build(sources: &RouteSources) -> RouteNode {
        build_route_tree(sources, "app", &RouteFiles::default())
    }

    #[test]
    fn test_empty_sources() {
        let root = build(&RouteSources::new());
        assert!(root.is_root());
        assert!(root.is_bare());
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_root_artifacts() {
        let sources = RouteSources::new()
            .layout("app/layout.tsx", Component::named("Root"))
            .page("app/page.tsx", page("Home"))
            .not_found("app/not-found.tsx", page("Missing"));
        let root = build(&sources);

        assert_eq!(root.layout.as_ref().unwrap().name(), "Root");
        assert!(root.page.is_some());
        assert!(root.not_found.is_some());
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_full_paths_and_segments() {
        let sources = RouteSources::new().page("app/(shop)/items/[id]/page.tsx", page("Item"));
        let root = build(&sources);

        let group = root.find("(shop)").unwrap();
        assert_eq!(group.segment, "(shop)");
        assert_eq!(group.full_path, "(shop)");
        assert!(group.is_bare());

        let item = root.find("(shop)/items/[id]").unwrap();
        assert_eq!(item.segment, "[id]");
        assert_eq!(item.full_path, "(shop)/items/[id]");
        assert!(item.page.is_some());
        assert_eq!(root.node_count(), 4);
    }

    #[test]
    fn test_colocated_artifacts_share_one_node() {
        let sources = RouteSources::new()
            .layout("app/dash/layout.tsx", Component::named("Dash"))
            .page("app/dash/page.tsx", page("DashHome"))
            .not_found("app/dash/not-found.tsx", page("DashMissing"));
        let root = build(&sources);

        assert_eq!(root.children.len(), 1);
        let dash = root.find("dash").unwrap();
        assert!(dash.layout.is_some() && dash.page.is_some() && dash.not_found.is_some());
    }

    #[test]
    fn test_child_order_is_layouts_then_pages_then_not_founds() {
        let sources = RouteSources::new()
            .layout("app/zeta/layout.tsx", Component::named("Zeta"))
            .page("app/alpha/page.tsx", page("Alpha"))
            .page("app/zeta/page.tsx", page("ZetaPage"))
            .page("app/beta/page.tsx", page("Beta"))
            .not_found("app/gamma/not-found.tsx", page("GammaMissing"));
        let root = build(&sources);

        assert_eq!(root.children.segments(), vec!["zeta", "alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_pre_stripped_identifiers() {
        let sources = RouteSources::new()
            .layout("", Component::named("Root"))
            .page("blog/[id]", page("Post"));
        let root = build(&sources);

        assert!(root.layout.is_some());
        assert!(root.find("blog/[id]").unwrap().page.is_some());
    }

    #[test]
    fn test_duplicate_keeps_last() {
        let sources = RouteSources::new()
            .layout("app/layout.tsx", Component::named("First"))
            .layout("", Component::named("Second"));
        let root = build(&sources);
        assert_eq!(root.layout.as_ref().unwrap().name(), "Second");
    }

    #[test]
    fn test_find_missing() {
        let root = build(&RouteSources::new().page("app/a/page.tsx", page("A")));
        assert!(root.find("b").is_none());
        assert!(root.find("").unwrap().is_root());
    }
}
