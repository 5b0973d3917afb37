use anyhow::{Context, Result};
use colored::Colorize;
use nexroute::{
    extract_route_path, ready, ArtifactKind, Component, RouteDef, RouteSources, RouterConfig,
};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::warn;

use super::load_context;

pub struct RoutesOptions {
    pub config: Option<PathBuf>,
    pub pages_dir: Option<String>,
    pub json: bool,
    pub lazy: bool,
}

pub fn execute(identifiers: Vec<String>, options: &RoutesOptions) -> Result<()> {
    let mut context = load_context(options.config.as_deref())?;

    let mut patch = RouterConfig::default();
    if let Some(pages_dir) = &options.pages_dir {
        patch = patch.with_pages_dir(pages_dir.clone());
    }
    if !options.lazy {
        patch = patch.with_lazy_loading(false);
    }
    context.configure(patch);

    let identifiers = if identifiers.is_empty() {
        read_stdin()?
    } else {
        identifiers
    };

    let sources = collect_sources(&identifiers, context.config().pages_dir(), context.files());
    if sources.is_empty() {
        anyhow::bail!("No route files among the given identifiers");
    }

    let routes = context.generate(&sources);

    if options.json {
        let json = serde_json::to_string_pretty(&routes).context("Failed to serialize routes")?;
        println!("{json}");
    } else {
        println!("{}", "Routes".green().bold());
        println!();
        print_routes(&routes, 1);
        println!();
        println!(
            "{} route files, {} cached units",
            sources.len(),
            context.cache().len()
        );
    }

    Ok(())
}

fn read_stdin() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut identifiers = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read identifiers from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            identifiers.push(line.to_string());
        }
    }
    Ok(identifiers)
}

/// Stub modules named after their location, e.g. `BlogIdPage`
fn collect_sources(
    identifiers: &[String],
    pages_dir: &str,
    files: &nexroute::RouteFiles,
) -> RouteSources {
    let mut sources = RouteSources::new();

    for identifier in identifiers {
        let Some(kind) = files.classify(identifier) else {
            warn!(identifier = %identifier, "not a route file, skipping");
            continue;
        };

        let route_path = extract_route_path(identifier, pages_dir, files);
        let component = Component::named(component_name(route_path, kind));
        sources = match kind {
            ArtifactKind::Layout => sources.layout(identifier.as_str(), component),
            ArtifactKind::Page => sources.page(identifier.as_str(), ready(component)),
            ArtifactKind::NotFound => sources.not_found(identifier.as_str(), ready(component)),
        };
    }

    sources
}

fn component_name(route_path: &str, kind: ArtifactKind) -> String {
    let mut name: String = route_path
        .split('/')
        .map(|segment| {
            let cleaned: String = segment.chars().filter(|c| c.is_alphanumeric()).collect();
            let mut chars = cleaned.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();

    if name.is_empty() {
        name.push_str("Root");
    }

    name.push_str(match kind {
        ArtifactKind::Layout => "Layout",
        ArtifactKind::Page => "Page",
        ArtifactKind::NotFound => "NotFound",
    });
    name
}

fn print_routes(routes: &[RouteDef], depth: usize) {
    let indent = "  ".repeat(depth);

    for route in routes {
        let label = match route.path() {
            Some(path) => path.cyan().bold().to_string(),
            None => "(index)".yellow().to_string(),
        };

        let target = match (route.element.deferred(), route.element.as_component()) {
            (Some(unit), Some(wrapper)) => format!("{} via {}", unit.key(), wrapper.name()),
            (Some(unit), None) => unit.key().to_string(),
            (None, Some(layout)) => layout.name().to_string(),
            (None, None) => "-".to_string(),
        };

        println!("{indent}{label} {} {}", "→".dimmed(), target.dimmed());
        print_routes(route.children(), depth + 1);
    }
}
