// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::models::profile::ProfileRecord;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV 写入错误
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 结果汇集特质
///
/// 按完成顺序累积记录，运行结束时一次性持久化。
/// `finalize` 消耗自身，因此每个实例最多持久化一次。
pub trait RecordSink: Send {
    /// 追加一条记录
    fn record(&mut self, profile: ProfileRecord);

    /// 已累积的记录数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 持久化所有记录并返回产物路径
    ///
    /// 没有记录时也必须写出空结果标记文件
    fn finalize(self) -> Result<PathBuf, StorageError>;
}
