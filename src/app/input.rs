//! Target list loading.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;

/// Collects the targets of a run: the positional URL first, then the lines
/// of the URL file, if any.
pub async fn load_targets(config: &Config) -> Result<Vec<String>> {
    let mut targets = Vec::new();
    if let Some(target) = &config.target {
        targets.push(target.clone());
    }
    if let Some(path) = &config.url_file {
        targets.extend(read_url_file(path).await?);
    }
    Ok(targets)
}

/// Reads one URL per line, skipping blank lines and `#` comments.
pub async fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open URL file {}", path.display()))?;

    let mut lines = BufReader::new(file).lines();
    let mut urls = Vec::new();
    while let Some(line) = lines
        .next_line()
        .await
        .with_context(|| format!("Failed to read URL file {}", path.display()))?
    {
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            urls.push(trimmed.to_string());
        }
    }
    Ok(urls)
}
