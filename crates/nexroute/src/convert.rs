//! Tree-to-routes conversion
//!
//! Walks a [`RouteNode`] tree and emits the nested [`RouteDef`] list. Each node is
//! classified once by [`NodeKind`] and dispatched by pattern matching:
//!
//! | node                       | emitted                                                   |
//! |----------------------------|-----------------------------------------------------------|
//! | root with a layout         | one `/` route: index page, children, trailing `*`         |
//! | root without a layout      | `/` page route (if any), children, trailing `*` (if any)  |
//! | layout (non-group segment) | one route at the segment with the same child composition  |
//! | page only (non-group)      | one route at the segment, descendants nested beneath it   |
//! | group segment / bare node  | nothing; children are spliced into the parent             |
//!
//! A not-found route always comes last among the children of the node that declares
//! it, and is never inherited by descendants.

use crate::context::RouterContext;
use crate::deferred::{NOT_FOUND_KEY_PREFIX, PAGE_KEY_PREFIX};
use crate::definition::RouteDef;
use crate::element::{Component, Element, Loader};
use crate::segment::{normalize_segment, WILDCARD};
use crate::tree::RouteNode;
use std::fmt;
use tracing::warn;

/// Which renderable artifacts a node carries
///
/// Not-found handlers are orthogonal and handled by every routed variant.
#[derive(Clone, Copy)]
pub enum NodeKind<'a> {
    Empty,
    PageOnly(&'a Loader),
    LayoutOnly(&'a Component),
    LayoutAndPage(&'a Component, &'a Loader),
}

impl<'a> NodeKind<'a> {
    pub fn of(node: &'a RouteNode) -> Self {
        match (&node.layout, &node.page) {
            (None, None) => NodeKind::Empty,
            (None, Some(page)) => NodeKind::PageOnly(page),
            (Some(layout), None) => NodeKind::LayoutOnly(layout),
            (Some(layout), Some(page)) => NodeKind::LayoutAndPage(layout, page),
        }
    }

    pub fn layout(&self) -> Option<&'a Component> {
        match self {
            NodeKind::LayoutOnly(layout) | NodeKind::LayoutAndPage(layout, _) => Some(layout),
            NodeKind::Empty | NodeKind::PageOnly(_) => None,
        }
    }

    pub fn page(&self) -> Option<&'a Loader> {
        match self {
            NodeKind::PageOnly(page) | NodeKind::LayoutAndPage(_, page) => Some(page),
            NodeKind::Empty | NodeKind::LayoutOnly(_) => None,
        }
    }
}

impl fmt::Debug for NodeKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Empty => f.write_str("Empty"),
            NodeKind::PageOnly(_) => f.write_str("PageOnly"),
            NodeKind::LayoutOnly(layout) => write!(f, "LayoutOnly({})", layout.name()),
            NodeKind::LayoutAndPage(layout, _) => write!(f, "LayoutAndPage({})", layout.name()),
        }
    }
}

/// Cache key of a page unit: the raw full path, or `fallback` at the root
pub fn page_key(full_path: &str, fallback: &str) -> String {
    let id = if full_path.is_empty() { fallback } else { full_path };
    format!("{PAGE_KEY_PREFIX}{id}")
}

/// Cache key of a not-found unit
pub fn not_found_key(full_path: &str) -> String {
    format!("{NOT_FOUND_KEY_PREFIX}{full_path}")
}

/// Append a normalized segment to an absolute path (`""` leaves it unchanged)
fn join_path(accumulated: &str, normalized: &str) -> String {
    if normalized.is_empty() {
        accumulated.to_string()
    } else {
        format!("{accumulated}/{normalized}")
    }
}

/// Convert a whole tree, starting at its root
pub fn tree_to_routes(context: &RouterContext, root: &RouteNode) -> Vec<RouteDef> {
    Converter { context }.convert(root, true, "")
}

struct Converter<'a> {
    context: &'a RouterContext,
}

impl Converter<'_> {
    fn convert(&self, node: &RouteNode, is_root: bool, accumulated: &str) -> Vec<RouteDef> {
        let kind = NodeKind::of(node);

        if is_root {
            return match kind {
                NodeKind::LayoutOnly(layout) | NodeKind::LayoutAndPage(layout, _) => {
                    let children = self.layout_children(node, kind.page(), "/", "");
                    vec![RouteDef {
                        children: Some(children),
                        ..RouteDef::at("/", Element::component(layout.clone()))
                    }]
                }
                NodeKind::PageOnly(page) => self.root_routes(node, Some(page)),
                NodeKind::Empty => self.root_routes(node, None),
            };
        }

        let normalized = normalize_segment(&node.segment);
        let node_path = join_path(accumulated, &normalized);

        match kind {
            NodeKind::Empty => {
                if node.not_found.is_some() {
                    warn!(
                        node = %node.full_path,
                        "not-found without a page or layout has no route to attach to"
                    );
                }
                self.children(node, &node_path)
            }
            _ if normalized.is_empty() => {
                warn!(
                    node = %node.full_path,
                    "files in a group segment are not routable, only its children are"
                );
                self.children(node, accumulated)
            }
            NodeKind::LayoutOnly(layout) | NodeKind::LayoutAndPage(layout, _) => {
                let children = self.layout_children(node, kind.page(), &node_path, &node_path);
                vec![RouteDef::at(normalized, Element::component(layout.clone())).nest(children)]
            }
            NodeKind::PageOnly(page) => {
                // no wrapper to host an index child, so descendants nest beneath the page
                let mut children = self.children(node, &node_path);
                children.extend(self.not_found_route(node));

                let element = self.page_element(node, page, &node_path);
                vec![RouteDef::at(normalized, element).nest(children)]
            }
        }
    }

    /// Converted children in insertion order, flattened
    fn children(&self, node: &RouteNode, accumulated: &str) -> Vec<RouteDef> {
        node.children
            .nodes()
            .flat_map(|child| self.convert(child, false, accumulated))
            .collect()
    }

    /// Index page, then children, then not-found
    fn layout_children(
        &self,
        node: &RouteNode,
        page: Option<&Loader>,
        node_path: &str,
        accumulated: &str,
    ) -> Vec<RouteDef> {
        let mut children = Vec::new();

        if let Some(page) = page {
            children.push(RouteDef::index(self.page_element(node, page, node_path)));
        }
        children.extend(self.children(node, accumulated));
        children.extend(self.not_found_route(node));

        children
    }

    /// Top level without a root layout
    fn root_routes(&self, node: &RouteNode, page: Option<&Loader>) -> Vec<RouteDef> {
        let mut routes = Vec::new();

        if let Some(page) = page {
            routes.push(RouteDef::at("/", self.page_element(node, page, "/")));
        }
        routes.extend(self.children(node, ""));
        routes.extend(self.not_found_route(node));

        routes
    }

    fn page_element(&self, node: &RouteNode, page: &Loader, node_path: &str) -> Element {
        self.context
            .make_element(page, &page_key(&node.full_path, node_path), Some(node_path))
    }

    fn not_found_route(&self, node: &RouteNode) -> Option<RouteDef> {
        let loader = node.not_found.as_ref()?;
        let element = self
            .context
            .make_element(loader, &not_found_key(&node.full_path), None);
        Some(RouteDef::at(WILDCARD, element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ready;
    use crate::tree::RouteSources;

    fn page(name: &str) -> Loader {
        ready(Component::named(name))
    }

    fn convert(sources: &RouteSources) -> Vec<RouteDef> {
        let context = RouterContext::new();
        context.generate(sources)
    }

    #[test]
    fn test_node_kind() {
        let mut node = RouteNode::root();
        assert!(matches!(NodeKind::of(&node), NodeKind::Empty));

        node.page = Some(page("P"));
        assert!(matches!(NodeKind::of(&node), NodeKind::PageOnly(_)));

        node.layout = Some(Component::named("L"));
        let kind = NodeKind::of(&node);
        assert!(matches!(kind, NodeKind::LayoutAndPage(_, _)));
        assert_eq!(kind.layout().unwrap().name(), "L");
        assert!(kind.page().is_some());
        assert_eq!(format!("{kind:?}"), "LayoutAndPage(L)");

        node.page = None;
        assert!(matches!(NodeKind::of(&node), NodeKind::LayoutOnly(_)));
        assert!(NodeKind::of(&node).page().is_none());
    }

    #[test]
    fn test_cache_keys() {
        assert_eq!(page_key("blog/[id]", "/blog/:id"), "page:blog/[id]");
        assert_eq!(page_key("", "/"), "page:/");
        assert_eq!(not_found_key(""), "notfound:");
        assert_eq!(not_found_key("dash"), "notfound:dash");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "blog"), "/blog");
        assert_eq!(join_path("/blog", ":id"), "/blog/:id");
        assert_eq!(join_path("/blog", ""), "/blog");
    }

    #[test]
    fn test_empty_tree_yields_no_routes() {
        assert!(convert(&RouteSources::new()).is_empty());
    }

    #[test]
    fn test_root_page_without_layout() {
        let routes = convert(
            &RouteSources::new()
                .page("", page("Home"))
                .page("about", page("About"))
                .not_found("", page("Missing")),
        );

        let paths: Vec<_> = routes.iter().filter_map(RouteDef::path).collect();
        assert_eq!(paths, vec!["/", "about", "*"]);
    }

    #[test]
    fn test_group_layout_is_transparent() {
        let routes = convert(
            &RouteSources::new()
                .layout("(admin)", Component::named("AdminShell"))
                .page("(admin)/users", page("Users")),
        );

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path(), Some("users"));
    }
}
