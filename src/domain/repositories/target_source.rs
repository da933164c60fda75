// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 输入读取错误类型
#[derive(Error, Debug)]
pub enum SourceError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV 解析错误
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// 其他错误
    #[error("Source error: {0}")]
    Other(String),
}

/// 目标来源特质
///
/// 给定输入位置，返回有序的URL列表
#[async_trait]
pub trait TargetSource: Send + Sync {
    /// 读取全部URL，保持输入顺序
    async fn load_urls(&self) -> Result<Vec<String>, SourceError>;
}
