// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::domain::repositories::target_source::{SourceError, TargetSource};

/// CSV URL 列表来源
///
/// 按表头名选择URL列，找不到时退回第一列。第一行本身就是URL时
/// 视为无表头文件，因此每行一个URL的纯文本文件也可以直接使用。
pub struct CsvUrlSource {
    path: PathBuf,
    column: String,
}

impl CsvUrlSource {
    pub fn new(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            column: column.into(),
        }
    }
}

#[async_trait]
impl TargetSource for CsvUrlSource {
    async fn load_urls(&self) -> Result<Vec<String>, SourceError> {
        let path = self.path.clone();
        let column = self.column.clone();
        tokio::task::spawn_blocking(move || read_urls(&path, &column))
            .await
            .map_err(|e| SourceError::Other(e.to_string()))?
    }
}

fn looks_like_url(cell: &str) -> bool {
    let cell = cell.trim();
    cell.starts_with("http://") || cell.starts_with("https://")
}

fn read_urls(path: &Path, column: &str) -> Result<Vec<String>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut urls = Vec::new();
    let index = match headers.iter().position(|h| h.trim() == column) {
        Some(index) => index,
        None => {
            match headers.get(0) {
                Some(first) if looks_like_url(first) => urls.push(first.trim().to_string()),
                _ => warn!(column, "URL column not found, using first column"),
            }
            0
        }
    };

    for record in reader.records() {
        let record = record?;
        if let Some(cell) = record.get(index).map(str::trim) {
            if !cell.is_empty() {
                urls.push(cell.to_string());
            }
        }
    }

    debug!(path = %path.display(), count = urls.len(), "Loaded target URLs");
    Ok(urls)
}
