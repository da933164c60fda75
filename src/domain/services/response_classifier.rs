// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

use crate::engines::traits::{EngineError, FetchResponse};

/// 响应分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// 2xx，携带页面内容
    Success(String),
    /// 软拦截，可重试
    RetryableBlock(u16),
    /// 永久失败，目标将被丢弃
    PermanentFailure { status: Option<u16>, cause: String },
}

/// 响应分类器
///
/// 网络层错误（连接失败、超时等）一律视为永久失败，不消耗重试次数
#[derive(Debug, Clone)]
pub struct ResponseClassifier {
    retry_statuses: HashSet<u16>,
}

impl ResponseClassifier {
    /// 创建分类器
    ///
    /// # 参数
    ///
    /// * `retry_statuses` - 被视为软拦截的状态码
    pub fn new(retry_statuses: impl IntoIterator<Item = u16>) -> Self {
        Self {
            retry_statuses: retry_statuses.into_iter().collect(),
        }
    }

    /// 对一次抓取结果进行分类
    pub fn classify(&self, outcome: Result<FetchResponse, EngineError>) -> Classification {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                return Classification::PermanentFailure {
                    status: None,
                    cause: e.to_string(),
                }
            }
        };

        let status = response.status_code;
        if self.retry_statuses.contains(&status) {
            Classification::RetryableBlock(status)
        } else if (200..300).contains(&status) {
            Classification::Success(response.content)
        } else {
            Classification::PermanentFailure {
                status: Some(status),
                cause: format!("unexpected status {}", status),
            }
        }
    }
}

impl Default for ResponseClassifier {
    fn default() -> Self {
        Self::new([999, 403, 401, 404])
    }
}
