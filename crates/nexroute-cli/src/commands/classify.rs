use anyhow::Result;
use colored::Colorize;
use nexroute::path::relative_to_pages_dir;
use nexroute::extract_route_path;
use std::path::Path;

use super::load_context;

pub fn execute(paths: &[String], config: Option<&Path>) -> Result<()> {
    let context = load_context(config)?;
    let pages_dir = context.config().pages_dir();
    let files = context.files();

    for path in paths {
        let role = relative_to_pages_dir(path, pages_dir)
            .and_then(|relative| files.classify(relative).map(|kind| (kind, relative)));

        match role {
            Some((kind, relative)) => {
                let route_path = extract_route_path(relative, "", files);
                let route_path = if route_path.is_empty() { "/" } else { route_path };
                println!(
                    "  {} {:<40} {:<10} {}",
                    "✓".green(),
                    path,
                    kind.to_string().cyan(),
                    route_path
                );
            }
            None => {
                println!("  {} {:<40} {}", "-".dimmed(), path, "ignored".dimmed());
            }
        }
    }

    Ok(())
}
