// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::VecDeque;

use crate::domain::models::target::CrawlTarget;

/// 目标工作队列
///
/// 保持输入顺序；重试的目标插回队首，在其后的目标之前重新请求
#[derive(Debug, Default)]
pub struct TargetQueue {
    targets: VecDeque<CrawlTarget>,
}

impl TargetQueue {
    /// 由URL列表创建队列，空白URL被忽略
    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let targets = urls
            .into_iter()
            .map(|u| u.as_ref().trim().to_string())
            .filter(|u| !u.is_empty())
            .map(CrawlTarget::new)
            .collect();
        Self { targets }
    }

    /// 取出下一个目标
    pub fn pop_next(&mut self) -> Option<CrawlTarget> {
        self.targets.pop_front()
    }

    /// 把重试目标放回队首
    pub fn requeue(&mut self, target: CrawlTarget) {
        self.targets.push_front(target);
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
