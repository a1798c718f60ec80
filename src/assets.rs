//! CSS asset bundling

use anyhow::{Context, Result};
use std::{fs, path::Path};

const BASE: &str = include_str!("../assets/base.css");
const LAYOUT: &str = include_str!("../assets/components/layout.css");
const NAV: &str = include_str!("../assets/components/nav.css");
const MARKDOWN: &str = include_str!("../assets/markdown.css");

/// File name of the viewer stylesheet inside the assets directory.
pub const VIEWER_CSS: &str = "viewer.css";

/// Writes the bundled viewer stylesheet to the assets directory
///
/// # Errors
///
/// Returns error if the file cannot be written.
pub fn write_css_assets(assets_dir: &Path) -> Result<()> {
    write_bundled(assets_dir, VIEWER_CSS, &[BASE, LAYOUT, NAV, MARKDOWN])
}

fn write_bundled(dir: &Path, name: &str, parts: &[&str]) -> Result<()> {
    let css = parts.join("\n");
    fs::write(dir.join(name), css)
        .with_context(|| format!("Failed to write CSS asset: {}", name))?;
    Ok(())
}
