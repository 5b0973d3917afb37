use anyhow::Result;
use colored::Colorize;
use nexroute::{classify_segment, normalize_segment, SegmentKind};

pub fn execute(segments: &[String]) -> Result<()> {
    for segment in segments {
        let kind = match classify_segment(segment) {
            SegmentKind::Group(_) => "group",
            SegmentKind::CatchAll(_) => "catch-all",
            SegmentKind::Dynamic(_) => "dynamic",
            SegmentKind::Static(_) => "static",
        };

        let normalized = normalize_segment(segment);
        let shown = if normalized.is_empty() {
            "(omitted)".dimmed().to_string()
        } else {
            normalized.as_ref().green().to_string()
        };

        println!("  {:<24} {} {:<10} {}", segment, "→".dimmed(), kind.cyan(), shown);
    }

    Ok(())
}
