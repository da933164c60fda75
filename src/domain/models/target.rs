// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 抓取目标
///
/// 一个待抓取的URL及其当前尝试序号（从1开始）。由重试控制器递增，
/// 成功或放弃时从工作队列中移除。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    /// 目标URL
    pub url: String,
    /// 当前请求是第几次尝试
    pub attempts: u32,
}

impl CrawlTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            attempts: 1,
        }
    }

    /// 返回尝试序号加一后的目标
    pub fn next_attempt(self) -> Self {
        Self {
            attempts: self.attempts + 1,
            ..self
        }
    }
}
