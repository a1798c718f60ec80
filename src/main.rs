use anyhow::{Context, Result};
use log::info;
use mdviewer::{Config, DocLinks, DocsViewer};
use std::fs;
use std::path::Path;

/// Page written for the active document.
const INDEX_PAGE: &str = "index.html";

fn main() -> Result<()> {
    let config = Config::parse();

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .init();

    config.validate().context("Invalid configuration")?;

    let manager = config.build_manager()?;
    let docs_config = config.build_docs_config()?;

    let mut viewer =
        DocsViewer::new(&manager, &docs_config).context("Failed to create documentation viewer")?;
    viewer.set_title(&config.title);
    if config.all {
        viewer.set_links(DocLinks::Pages);
    }

    fs::create_dir_all(&config.output).context("Failed to create output directory")?;

    let assets_dir = config.output.join("assets");
    fs::create_dir_all(&assets_dir).context("Failed to create assets directory")?;
    mdviewer::write_css_assets(&assets_dir)?;

    let active_id = viewer.active_file_id(config.doc.as_deref())?;
    write_page(&viewer, active_id, &config.output.join(INDEX_PAGE))?;

    if config.all {
        for file in manager.files() {
            let path = config.output.join(format!("{}.html", file.id()));
            write_page(&viewer, file.id(), &path)?;
        }
    }

    info!("Generated documentation in {}", config.output.display());

    Ok(())
}

/// Renders one document and writes the page to `path`.
fn write_page(viewer: &DocsViewer<'_>, id: &str, path: &Path) -> Result<()> {
    let page = viewer
        .render(Some(id))
        .with_context(|| format!("Failed to render document {}", id))?;

    fs::write(path, page.into_string())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {}", path.display());
    Ok(())
}
