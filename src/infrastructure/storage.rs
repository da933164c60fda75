// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::models::profile::ProfileRecord;
use crate::domain::repositories::sink_repository::{RecordSink, StorageError};

/// 没有任何记录时写入输出文件的内容
pub const EMPTY_RESULT_MARKER: &str = "No data was scraped";

/// 输出表头
pub const CSV_HEADERS: [&str; 6] = [
    "linkedin_url",
    "name",
    "bio",
    "socials",
    "experience",
    "education",
];

/// 社交链接列的分隔符
pub const SOCIALS_DELIMITER: &str = "|";

/// CSV 结果汇集
///
/// 在内存中按完成顺序累积记录，`finalize` 时一次性写入文件。
/// 经历和教育列编码为键有序的 JSON 对象。
pub struct CsvRecordSink {
    path: PathBuf,
    records: Vec<ProfileRecord>,
}

impl CsvRecordSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    fn ensure_parent(path: &Path) -> Result<(), StorageError> {
        // 确保目录存在
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// 把一条记录编码为一行 CSV 字段
pub fn encode_row(record: &ProfileRecord) -> Result<[String; 6], StorageError> {
    Ok([
        record.linkedin_url.clone(),
        record.name.clone().unwrap_or_default(),
        record.bio.clone().unwrap_or_default(),
        record.socials.join(SOCIALS_DELIMITER),
        serde_json::to_string(&record.experience)?,
        serde_json::to_string(&record.education)?,
    ])
}

impl RecordSink for CsvRecordSink {
    fn record(&mut self, profile: ProfileRecord) {
        self.records.push(profile);
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn finalize(self) -> Result<PathBuf, StorageError> {
        Self::ensure_parent(&self.path)?;

        if self.records.is_empty() {
            fs::write(&self.path, EMPTY_RESULT_MARKER)?;
            info!(path = %self.path.display(), "No records scraped, wrote empty-result marker");
            return Ok(self.path);
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(CSV_HEADERS)?;
        for record in &self.records {
            writer.write_record(encode_row(record)?)?;
        }
        writer.flush()?;

        info!(path = %self.path.display(), records = self.records.len(), "Results written");
        Ok(self.path)
    }
}
