//! Router context
//!
//! Holds everything a conversion reads or mutates: configuration, artifact
//! filenames, the deferred cache and the middleware list. Contexts are independent;
//! two contexts never observe each other's cache or middleware.

use crate::config::{RouterConfig, RouterToml};
use crate::convert::tree_to_routes;
use crate::deferred::{Deferred, DeferredCache};
use crate::definition::RouteDef;
use crate::element::{Element, Loader};
use crate::error::Result;
use crate::middleware::MiddlewarePipeline;
use crate::path::RouteFiles;
use crate::tree::{build_route_tree, RouteNode, RouteSources};
use regex::Regex;
use std::sync::Arc;

/// Explicit replacement for process-wide router state
#[derive(Debug, Default)]
pub struct RouterContext {
    config: RouterConfig,
    files: RouteFiles,
    cache: DeferredCache,
    middleware: MiddlewarePipeline,
}

impl RouterContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_files(mut self, files: RouteFiles) -> Self {
        self.files = files;
        self
    }

    /// Context configured from a `[router]` TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let parsed = RouterToml::from_toml_str(content)?;
        Ok(Self::with_config(parsed.config_patch()).with_files(parsed.route_files()))
    }

    /// Shallow-merge `patch` into the current configuration
    pub fn configure(&mut self, patch: RouterConfig) {
        self.config.merge(patch);
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn files(&self) -> &RouteFiles {
        &self.files
    }

    pub fn set_files(&mut self, files: RouteFiles) {
        self.files = files;
    }

    pub fn cache(&self) -> &DeferredCache {
        &self.cache
    }

    pub fn middleware(&self) -> &MiddlewarePipeline {
        &self.middleware
    }

    pub fn register_middleware<F>(&mut self, pattern: Regex, transform: F)
    where
        F: Fn(Element) -> Element + Send + Sync + 'static,
    {
        self.middleware.register(pattern, transform);
    }

    pub fn register_middleware_pattern<F>(&mut self, pattern: &str, transform: F) -> Result<()>
    where
        F: Fn(Element) -> Element + Send + Sync + 'static,
    {
        self.middleware.register_pattern(pattern, transform)
    }

    pub fn clear_middlewares(&mut self) {
        self.middleware.clear();
    }

    /// Wrap `loader` as a renderable keyed by `cache_key`
    ///
    /// With lazy loading enabled the unit comes from the cache, so repeated calls with
    /// one key share the same [`Deferred`], and the boundary shows the configured
    /// loading fallback. With lazy loading disabled every call builds a fresh unit
    /// behind a boundary without fallback. When `route_path` is given, the result goes
    /// through the middleware pipeline.
    pub fn make_element(
        &self,
        loader: &Loader,
        cache_key: &str,
        route_path: Option<&str>,
    ) -> Element {
        let element = if self.config.lazy_loading_enabled() {
            let unit = self.cache.get_or_insert(cache_key, loader);
            let fallback = self
                .config
                .loading_fallback
                .clone()
                .map_or(Element::Placeholder, Element::component);
            Element::suspense(Some(fallback), Element::Lazy(unit))
        } else {
            let unit = Deferred::new(cache_key, Arc::clone(loader));
            Element::suspense(None, Element::Lazy(unit))
        };

        match route_path {
            Some(path) => self.middleware.apply(path, element),
            None => element,
        }
    }

    /// Build the route tree for `sources` under the configured pages directory
    pub fn build_tree(&self, sources: &RouteSources) -> RouteNode {
        build_route_tree(sources, self.config.pages_dir(), &self.files)
    }

    /// Convert a tree built by [`build_tree`](Self::build_tree)
    pub fn convert(&self, root: &RouteNode) -> Vec<RouteDef> {
        tree_to_routes(self, root)
    }

    /// Build and convert from scratch
    pub fn generate(&self, sources: &RouteSources) -> Vec<RouteDef> {
        self.convert(&self.build_tree(sources))
    }
}
