//! # Nexroute
//!
//! Directory-convention routing for client-side routers. Feed it the files a module
//! resolver found under the pages directory and it returns a nested route list:
//!
//! - Pages (`page.tsx`) become routes, or index routes under a co-located layout
//! - Layouts (`layout.tsx`) wrap their directory's routes
//! - Not-found handlers (`not-found.tsx`) become a trailing `*` route
//! - Group segments `(name)` vanish from the URL, `[id]` becomes `:id`,
//!   `[...slug]` becomes `*`
//!
//! ## Pipeline
//!
//! ```text
//! RouteSources ──build_route_tree──▶ RouteNode ──tree_to_routes──▶ Vec<RouteDef>
//!                                                    │
//!                                   make_element (DeferredCache + middleware)
//! ```
//!
//! All mutable state (configuration, deferred cache, middleware) lives in a
//! [`RouterContext`], never in globals.
//!
//! ## Example
//!
//! ```
//! use nexroute::{ready, Component, RouterContext, RouteSources};
//!
//! let sources = RouteSources::new()
//!     .layout("src/app/layout.tsx", Component::named("RootLayout"))
//!     .page("src/app/page.tsx", ready(Component::named("Home")))
//!     .page("src/app/blog/[id]/page.tsx", ready(Component::named("Post")))
//!     .not_found("src/app/not-found.tsx", ready(Component::named("NotFound")));
//!
//! let context = RouterContext::new();
//! let routes = context.generate(&sources);
//!
//! let root = &routes[0];
//! assert_eq!(root.path(), Some("/"));
//! assert!(root.children()[0].is_index());
//! assert_eq!(root.children()[1].path(), Some(":id"));
//! assert_eq!(root.children()[2].path(), Some("*"));
//! ```

pub mod config;
pub mod context;
pub mod convert;
pub mod deferred;
pub mod definition;
pub mod element;
pub mod error;
pub mod generator;
pub mod middleware;
pub mod path;
pub mod segment;
pub mod tree;

pub use config::{RouterConfig, RouterToml};
pub use context::RouterContext;
pub use convert::{tree_to_routes, NodeKind};
pub use deferred::{CacheStats, Deferred, DeferredCache};
pub use definition::{RouteDef, RouteTarget};
pub use element::{loader, ready, Component, Element, Loader, Module};
pub use error::{LoadError, RouterError};
pub use generator::{FileChange, RouteGenerator};
pub use middleware::{MiddlewareEntry, MiddlewarePipeline};
pub use path::{extract_route_path, ArtifactKind, RouteFiles};
pub use segment::{classify_segment, normalize_segment, SegmentKind};
pub use tree::{build_route_tree, RouteNode, RouteSources};
