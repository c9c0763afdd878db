use crate::markup::generate_markup_with;
use crate::Document;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of the exported page
pub const EXPORT_FILE_NAME: &str = "project.html";

/// Settings for the exported page boilerplate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Contents of `<title>`
    pub title: String,

    /// External styling engine loaded in `<head>`
    pub stylesheet_href: String,

    /// File name written by [`write_export`]
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "Block Canvas Project".to_string(),
            stylesheet_href: "https://cdn.tailwindcss.com".to_string(),
            file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl ExportConfig {
    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create export config: {}", path.display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .with_context(|| format!("Failed to write export config to: {}", path.display()))?;
        Ok(())
    }

    /// Load config from file; missing keys take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open export config: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Self = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse export config from: {}", path.display()))?;

        if config.file_name.is_empty() || config.file_name.contains(['/', '\\']) {
            return Err(anyhow!(
                "Invalid export file name {:?} in: {}",
                config.file_name,
                path.display()
            ));
        }

        Ok(config)
    }
}

/// Render the document and write it to `dir/<file_name>`.
/// Returns the path written.
pub fn write_export(dir: &Path, document: &Document, config: &ExportConfig) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let path = dir.join(&config.file_name);
    let html = generate_markup_with(document.export_nodes(), config);

    let file = File::create(&path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(html.as_bytes())
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush export file: {}", path.display()))?;

    info!(path = %path.display(), bytes = html.len(), "exported document");
    Ok(path)
}
