//! Inspect a review asset from the command line.
//!
//! ```text
//! reviewkit <asset.json> [role] [config.toml|config.json]
//! ```
//!
//! Prints per-version comment counts, what the approval gate says for the
//! given role, and the timeline markers of a video asset.

use std::path::Path;

use anyhow::Context;
use reviewkit::{init_logging, Actor, Asset, Config, ReviewSession, Role, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    let json_logs = std::env::var("REVIEWKIT_LOG_FORMAT").is_ok_and(|v| v == "json");
    init_logging(json_logs)?;
    tracing::debug!("reviewkit {} ({})", VERSION, BUILD_DATE);

    let mut args = std::env::args().skip(1);
    let Some(asset_path) = args.next() else {
        eprintln!("reviewkit {} ({})", VERSION, BUILD_DATE);
        eprintln!("usage: reviewkit <asset.json> [role] [config]");
        std::process::exit(2);
    };
    let role: Role = match args.next() {
        Some(name) => name.parse()?,
        None => Role::Creator,
    };
    let config = match args.next() {
        Some(path) => Config::load_from_file(Path::new(&path))
            .with_context(|| format!("loading config {}", path))?,
        None => Config::default(),
    };

    let json = std::fs::read_to_string(&asset_path)
        .with_context(|| format!("reading {}", asset_path))?;
    let asset = Asset::from_json(&json).with_context(|| format!("parsing {}", asset_path))?;
    tracing::info!(
        "Loaded '{}' with {} version(s) from {}",
        asset.title,
        asset.versions().len(),
        asset_path
    );

    println!("{} [{:?}] - {}", asset.title, asset.kind, asset.status);
    for version in asset.versions() {
        println!(
            "  v{:<3} {:>3} comment(s), {:>3} open  {}",
            version.version_number,
            version.comments().len(),
            version.unresolved_count(),
            version.url
        );
    }

    let session = ReviewSession::new(asset, Actor::new("cli", role), &config)?;
    println!(
        "As {}: {} visible comment(s) on the latest version",
        role,
        session.visible_comments().len()
    );
    match session.approval_gate() {
        Ok(()) => println!("Approval: allowed"),
        Err(e) => println!("Approval: blocked ({}; {})", e, e.guidance()),
    }

    let markers = session.video_markers();
    if !markers.is_empty() {
        println!("Markers:");
        for marker in markers {
            let mark = if marker.resolved { "x" } else { " " };
            println!("  [{}] {:>8.2}s  {}", mark, marker.time, marker.comment);
        }
    }

    Ok(())
}
