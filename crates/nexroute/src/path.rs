//! File identifier handling
//!
//! Turns identifiers handed over by the module resolver (`src/app/blog/[id]/page.tsx`)
//! into raw route paths (`blog/[id]`) and recognizes which artifact role a file plays.
//!
//! Nothing here touches the file system and nothing here fails: an identifier that
//! does not have the expected shape simply yields an unexpected path.

use serde::{Deserialize, Serialize};

/// Default directory holding the route files
pub const DEFAULT_PAGES_DIR: &str = "src/app";

/// Role a file plays in the route tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    Layout,
    Page,
    NotFound,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Layout => "layout",
            ArtifactKind::Page => "page",
            ArtifactKind::NotFound => "not-found",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filenames recognized for each artifact role
///
/// # Examples
///
/// ```
/// use nexroute::path::{ArtifactKind, RouteFiles};
///
/// let files = RouteFiles::default();
/// assert_eq!(files.classify("src/app/blog/page.tsx"), Some(ArtifactKind::Page));
/// assert_eq!(files.classify("src/app/blog/mypage.tsx"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFiles {
    pub page: String,
    pub layout: String,
    pub not_found: String,
}

impl Default for RouteFiles {
    fn default() -> Self {
        Self {
            page: "page.tsx".to_string(),
            layout: "layout.tsx".to_string(),
            not_found: "not-found.tsx".to_string(),
        }
    }
}

impl RouteFiles {
    /// Filename registered for a role
    pub fn filename(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Layout => &self.layout,
            ArtifactKind::Page => &self.page,
            ArtifactKind::NotFound => &self.not_found,
        }
    }

    /// Role of an identifier, judged by its last segment only
    pub fn classify(&self, identifier: &str) -> Option<ArtifactKind> {
        let filename = identifier.rsplit('/').next().unwrap_or(identifier);

        [ArtifactKind::Layout, ArtifactKind::Page, ArtifactKind::NotFound]
            .into_iter()
            .find(|kind| self.filename(*kind) == filename)
    }

    /// Strips a trailing artifact filename, anchored to a whole final segment
    ///
    /// `blog/page.tsx` → `blog`, `page.tsx` → ``, `blog/mypage.tsx` is left alone.
    pub fn strip_filename<'a>(&self, path: &'a str) -> &'a str {
        for kind in [ArtifactKind::Page, ArtifactKind::Layout, ArtifactKind::NotFound] {
            let filename = self.filename(kind);
            if filename.is_empty() {
                continue;
            }
            if path == filename {
                return "";
            }
            if let Some(dir) = path
                .strip_suffix(filename)
                .and_then(|rest| rest.strip_suffix('/'))
            {
                return dir;
            }
        }
        path
    }
}

/// Strips the pages directory from an identifier
///
/// The prefix is literal: `src/app` strips `src/app/...` and `/src/app/...`
/// but never `src/apps/...`. Identifiers outside the directory come back unchanged.
pub fn strip_pages_dir<'a>(identifier: &'a str, pages_dir: &str) -> Option<&'a str> {
    let base = pages_dir.trim_matches('/');
    if base.is_empty() {
        return Some(identifier.trim_start_matches('/'));
    }

    let candidate = identifier.trim_start_matches('/');
    let rest = candidate.strip_prefix(base)?;

    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix('/')
    }
}

/// Path of a changed file relative to the pages directory
///
/// Accepts project-relative paths (`src/app/blog/page.tsx`) as well as paths that
/// merely contain the directory (`/home/me/site/src/app/blog/page.tsx`).
pub fn relative_to_pages_dir<'a>(path: &'a str, pages_dir: &str) -> Option<&'a str> {
    if let Some(relative) = strip_pages_dir(path, pages_dir) {
        return Some(relative);
    }

    let base = pages_dir.trim_matches('/');
    let marker = format!("/{base}/");
    path.find(&marker).map(|index| &path[index + marker.len()..])
}

/// Derives the raw route path of a file identifier
///
/// Strips the pages directory prefix and the trailing artifact filename. The result
/// has no leading or trailing slash; the pages directory itself maps to `""`.
///
/// Identifiers that were already stripped by the resolver (`blog/[id]`, `""`) pass
/// through untouched, so mappings can be keyed either way.
///
/// # Examples
///
/// ```
/// use nexroute::path::{extract_route_path, RouteFiles};
///
/// let files = RouteFiles::default();
/// assert_eq!(extract_route_path("app/blog/[id]/page.tsx", "app/", &files), "blog/[id]");
/// assert_eq!(extract_route_path("app/page.tsx", "app/", &files), "");
/// assert_eq!(extract_route_path("blog/[id]", "app/", &files), "blog/[id]");
/// ```
pub fn extract_route_path<'a>(
    identifier: &'a str,
    pages_dir: &str,
    files: &RouteFiles,
) -> &'a str {
    let relative = strip_pages_dir(identifier, pages_dir).unwrap_or(identifier);
    files.strip_filename(relative).trim_matches('/')
}

/// Splits a raw route path into segments (`""` has none)
pub fn split_segments(route_path: &str) -> impl Iterator<Item = &str> {
    route_path.split('/').filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("app/blog/[id]/page.tsx", "blog/[id]")]
    #[case("app/page.tsx", "")]
    #[case("app/layout.tsx", "")]
    #[case("app/(admin)/users/not-found.tsx", "(admin)/users")]
    #[case("/app/docs/[...slug]/page.tsx", "docs/[...slug]")]
    #[case("app", "")]
    #[case("app/", "")]
    #[case("blog/[id]", "blog/[id]")]
    #[case("", "")]
    fn test_extract_route_path(#[case] identifier: &str, #[case] expected: &str) {
        let files = RouteFiles::default();
        assert_eq!(extract_route_path(identifier, "app/", &files), expected);
    }

    #[test]
    fn test_extract_does_not_partially_match_filename() {
        let files = RouteFiles::default();
        assert_eq!(
            extract_route_path("app/blog/mypage.tsx", "app", &files),
            "blog/mypage.tsx"
        );
        assert_eq!(
            extract_route_path("app/blog/page.tsx.bak", "app", &files),
            "blog/page.tsx.bak"
        );
    }

    #[test]
    fn test_extract_does_not_partially_match_prefix() {
        let files = RouteFiles::default();
        assert_eq!(extract_route_path("apps/blog/page.tsx", "app", &files), "apps/blog");
        assert_eq!(strip_pages_dir("apps/blog", "app"), None);
    }

    #[test]
    fn test_custom_filenames() {
        let files = RouteFiles {
            page: "+page.rs".to_string(),
            layout: "+layout.rs".to_string(),
            not_found: "+404.rs".to_string(),
        };

        assert_eq!(extract_route_path("routes/users/+page.rs", "routes", &files), "users");
        assert_eq!(extract_route_path("routes/+404.rs", "routes", &files), "");
        assert_eq!(extract_route_path("routes/users/page.tsx", "routes", &files), "users/page.tsx");
        assert_eq!(files.classify("routes/+layout.rs"), Some(ArtifactKind::Layout));
        assert_eq!(files.classify("routes/page.tsx"), None);
    }

    #[test]
    fn test_empty_pages_dir() {
        let files = RouteFiles::default();
        assert_eq!(extract_route_path("/blog/page.tsx", "", &files), "blog");
    }

    #[test]
    fn test_relative_to_pages_dir() {
        assert_eq!(relative_to_pages_dir("src/app/blog/page.tsx", "src/app"), Some("blog/page.tsx"));
        assert_eq!(
            relative_to_pages_dir("/home/me/site/src/app/blog/page.tsx", "src/app"),
            Some("blog/page.tsx")
        );
        assert_eq!(relative_to_pages_dir("/home/me/site/src/lib.rs", "src/app"), None);
    }

    #[test]
    fn test_split_segments() {
        assert_eq!(split_segments("").count(), 0);
        assert_eq!(
            split_segments("blog/[id]").collect::<Vec<_>>(),
            vec!["blog", "[id]"]
        );
    }

    #[test]
    fn test_artifact_kind_display() {
        assert_eq!(ArtifactKind::NotFound.to_string(), "not-found");
        assert_eq!(ArtifactKind::Layout.as_str(), "layout");
    }
}
