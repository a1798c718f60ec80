//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::{Path, PathBuf};

use crate::manager::DocsManager;
use crate::options::{DEFAULT_MAX_INCLUDE_SIZE, DocsConfig};

/// Extension of documentation files picked up from folders.
const DOC_EXTENSION: &str = "md";

/// Command line configuration for mdviewer.
#[derive(Debug, Clone, Parser)]
#[command(name = "mdviewer", version, about, long_about = None)]
pub struct Config {
    /// Markdown files to show, titled by file name
    pub files: Vec<PathBuf>,

    /// Folder whose Markdown files are added (repeatable)
    #[arg(long = "folder", value_name = "DIR")]
    pub folders: Vec<PathBuf>,

    /// Also add Markdown files from subfolders of --folder
    #[arg(short, long)]
    pub recursive: bool,

    /// Folder searched for include files, in order (repeatable)
    #[arg(long = "include-path", value_name = "DIR")]
    pub include_paths: Vec<PathBuf>,

    /// Additional extension allowed for include files (repeatable)
    #[arg(long = "include-ext", value_name = "EXT")]
    pub include_extensions: Vec<String>,

    /// Maximum size of an include file in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_INCLUDE_SIZE)]
    pub max_include_size: u64,

    /// Site title shown in the navigation bar
    #[arg(long, default_value = "Documentation")]
    pub title: String,

    /// Identifier of the document to show
    #[arg(long)]
    pub doc: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Write one page per document
    #[arg(long)]
    pub all: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if no documents are given, or a file or folder does not exist.
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() && self.folders.is_empty() {
            bail!("No documents given: pass Markdown files or --folder");
        }

        if let Some(file) = self.files.iter().find(|f| !f.is_file()) {
            bail!("Document file does not exist: {}", file.display());
        }

        let mut dirs = self.folders.iter().chain(&self.include_paths);
        if let Some(dir) = dirs.find(|d| !d.is_dir()) {
            bail!("Folder does not exist: {}", dir.display());
        }

        Ok(())
    }

    /// Log level selected by the number of `-v` flags.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Collects the documents named on the command line.
    ///
    /// # Errors
    ///
    /// Returns error if a file or folder cannot be registered.
    pub fn build_manager(&self) -> Result<DocsManager> {
        let mut manager = DocsManager::new();

        for file in &self.files {
            manager
                .add_file(file_title(file), file, None)
                .with_context(|| format!("Failed to add document {}", file.display()))?;
        }

        for folder in &self.folders {
            manager
                .add_folder(folder, self.recursive, DOC_EXTENSION)
                .with_context(|| format!("Failed to add folder {}", folder.display()))?;
        }

        Ok(manager)
    }

    /// Builds the include resolution settings.
    ///
    /// # Errors
    ///
    /// Returns error if an include path does not exist.
    pub fn build_docs_config(&self) -> Result<DocsConfig> {
        let mut config = DocsConfig::new();

        for path in &self.include_paths {
            config
                .add_include_path(path)
                .with_context(|| format!("Invalid include path {}", path.display()))?;
        }

        config
            .add_include_extensions(&self.include_extensions)
            .set_max_include_size(self.max_include_size);

        Ok(config)
    }
}

fn file_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
