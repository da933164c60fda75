// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use tracing::{info, warn};

use crate::domain::models::target::CrawlTarget;
use crate::utils::retry_policy::RetryPolicy;

/// 重试决策
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// 等待 `delay` 后重新入队，尝试序号已递增
    Requeue { target: CrawlTarget, delay: Duration },
    /// 尝试次数耗尽，放弃该目标
    GiveUp(CrawlTarget),
}

/// 重试控制器
///
/// 对软拦截的目标做有界重试，保证每个目标的请求次数有限
#[derive(Debug, Clone)]
pub struct RetryController {
    policy: RetryPolicy,
}

impl RetryController {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// 处理一次软拦截
    ///
    /// # 参数
    ///
    /// * `target` - 刚被拦截的目标，`attempts` 为本次请求的序号
    /// * `status` - 拦截状态码，仅用于日志
    pub fn on_retryable(&self, target: CrawlTarget, status: u16) -> RetryDecision {
        if !self.policy.should_retry(target.attempts) {
            warn!(
                url = %target.url,
                attempts = target.attempts,
                status,
                "Giving up after reaching max attempts"
            );
            return RetryDecision::GiveUp(target);
        }

        let delay = self.policy.calculate_backoff(target.attempts);
        info!(
            url = %target.url,
            status,
            delay_ms = delay.as_millis() as u64,
            "Received block status, retrying after delay"
        );
        RetryDecision::Requeue {
            target: target.next_attempt(),
            delay,
        }
    }
}
