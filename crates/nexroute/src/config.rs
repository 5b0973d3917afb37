// File: crates/nexroute/src/config.rs
// Purpose: Router configuration and parsing of the [router] table

use crate::element::Component;
use crate::error::Result;
use crate::path::{RouteFiles, DEFAULT_PAGES_DIR};
use serde::{Deserialize, Serialize};

/// Runtime router configuration
///
/// Every field is optional; [`RouterConfig::merge`] overwrites only the fields a
/// patch supplies.
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    /// Shown while a deferred page is pending (default: an empty placeholder)
    pub loading_fallback: Option<Component>,

    /// Directory containing route files (default: "src/app")
    pub pages_dir: Option<String>,

    /// Cache deferred units across conversions (default: true)
    pub enable_lazy_loading: Option<bool>,
}

impl RouterConfig {
    /// Shallow merge: keys present in `patch` win, the rest keep their value
    pub fn merge(&mut self, patch: RouterConfig) {
        if patch.loading_fallback.is_some() {
            self.loading_fallback = patch.loading_fallback;
        }
        if patch.pages_dir.is_some() {
            self.pages_dir = patch.pages_dir;
        }
        if patch.enable_lazy_loading.is_some() {
            self.enable_lazy_loading = patch.enable_lazy_loading;
        }
    }

    pub fn lazy_loading_enabled(&self) -> bool {
        self.enable_lazy_loading.unwrap_or(true)
    }

    pub fn pages_dir(&self) -> &str {
        self.pages_dir.as_deref().unwrap_or(DEFAULT_PAGES_DIR)
    }

    pub fn with_loading_fallback(mut self, fallback: Component) -> Self {
        self.loading_fallback = Some(fallback);
        self
    }

    pub fn with_pages_dir(mut self, pages_dir: impl Into<String>) -> Self {
        self.pages_dir = Some(pages_dir.into());
        self
    }

    pub fn with_lazy_loading(mut self, enabled: bool) -> Self {
        self.enable_lazy_loading = Some(enabled);
        self
    }
}

/// Configuration file layout
///
/// ```toml
/// [router]
/// pages_dir = "src/app"
/// page_file = "page.tsx"
/// layout_file = "layout.tsx"
/// not_found_file = "not-found.tsx"
/// enable_lazy_loading = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouterToml {
    #[serde(default)]
    pub router: RouterSection,
}

/// The `[router]` table; every key is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouterSection {
    #[serde(default)]
    pub pages_dir: Option<String>,

    #[serde(default)]
    pub page_file: Option<String>,

    #[serde(default)]
    pub layout_file: Option<String>,

    #[serde(default)]
    pub not_found_file: Option<String>,

    #[serde(default)]
    pub enable_lazy_loading: Option<bool>,
}

impl RouterToml {
    /// Parse a configuration document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Config patch carried by the file
    pub fn config_patch(&self) -> RouterConfig {
        RouterConfig {
            loading_fallback: None,
            pages_dir: self.router.pages_dir.clone(),
            enable_lazy_loading: self.router.enable_lazy_loading,
        }
    }

    /// Artifact filenames, falling back to the defaults
    pub fn route_files(&self) -> RouteFiles {
        let defaults = RouteFiles::default();
        RouteFiles {
            page: self.router.page_file.clone().unwrap_or(defaults.page),
            layout: self.router.layout_file.clone().unwrap_or(defaults.layout),
            not_found: self
                .router
                .not_found_file
                .clone()
                .unwrap_or(defaults.not_found),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert!(config.lazy_loading_enabled());
        assert_eq!(config.pages_dir(), "src/app");
        assert!(config.loading_fallback.is_none());
    }

    #[test]
    fn test_merge_overwrites_only_supplied_keys() {
        let mut config = RouterConfig::default()
            .with_pages_dir("app")
            .with_loading_fallback(Component::named("Spinner"));

        config.merge(RouterConfig::default().with_lazy_loading(false));

        assert_eq!(config.pages_dir(), "app");
        assert!(!config.lazy_loading_enabled());
        assert_eq!(config.loading_fallback.as_ref().unwrap().name(), "Spinner");

        config.merge(RouterConfig::default().with_pages_dir("routes"));
        assert_eq!(config.pages_dir(), "routes");
        assert!(!config.lazy_loading_enabled());
    }

    #[test]
    fn test_parse_full_document() {
        let parsed = RouterToml::from_toml_str(
            r#"
            [router]
            pages_dir = "web/app"
            page_file = "+page.rs"
            not_found_file = "+404.rs"
            enable_lazy_loading = false
            "#,
        )
        .unwrap();

        let patch = parsed.config_patch();
        assert_eq!(patch.pages_dir.as_deref(), Some("web/app"));
        assert_eq!(patch.enable_lazy_loading, Some(false));

        let files = parsed.route_files();
        assert_eq!(files.page, "+page.rs");
        assert_eq!(files.layout, "layout.tsx");
        assert_eq!(files.not_found, "+404.rs");
    }

    #[test]
    fn test_parse_empty_document() {
        let parsed = RouterToml::from_toml_str("").unwrap();
        assert!(parsed.config_patch().pages_dir.is_none());
        assert_eq!(parsed.route_files(), RouteFiles::default());
    }

    #[test]
    fn test_parse_error() {
        let err = RouterToml::from_toml_str("[router]\nenable_lazy_loading = \"yes\"").unwrap_err();
        assert!(err.to_string().starts_with("invalid router configuration"));
    }
}
