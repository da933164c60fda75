// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::models::target::CrawlTarget;
use crate::engines::session::SessionContext;
use crate::engines::traits::{EngineError, FetchResponse, ProfileEngine};

/// 请求调度器
///
/// 一次只发出一个请求，且相邻两次请求的发起时间至少间隔 `min_interval`。
/// 节流时钟属于单个调度器，不在会话之间共享。
pub struct RequestScheduler {
    /// 抓取引擎
    engine: Arc<dyn ProfileEngine>,
    /// 最小请求间隔
    min_interval: Duration,
    /// 上一次请求的发起时间
    last_request: Option<Instant>,
}

impl RequestScheduler {
    /// 创建新的请求调度器实例
    ///
    /// # 参数
    ///
    /// * `engine` - 抓取引擎
    /// * `min_interval` - 相邻请求的最小间隔
    pub fn new(engine: Arc<dyn ProfileEngine>, min_interval: Duration) -> Self {
        Self {
            engine,
            min_interval,
            last_request: None,
        }
    }

    /// 等待节流间隔后抓取目标
    ///
    /// `&mut self` 保证同一时刻最多一个请求在途。等待和网络请求都可以被取消。
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 任意状态码的响应
    /// * `Err(EngineError::Cancelled)` - 运行被取消
    /// * `Err(EngineError)` - 网络层错误
    pub async fn fetch(
        &mut self,
        target: &CrawlTarget,
        session: &SessionContext,
        cancel: &CancellationToken,
    ) -> Result<FetchResponse, EngineError> {
        if let Some(last) = self.last_request {
            let ready_at = last + self.min_interval;
            tokio::select! {
                _ = cancel.cancelled() => return Err(EngineError::Cancelled),
                _ = sleep_until(ready_at) => {}
            }
        }

        self.last_request = Some(Instant::now());
        debug!(url = %target.url, attempt = target.attempts, engine = self.engine.name(), "Issuing request");

        let result = tokio::select! {
            _ = cancel.cancelled() => return Err(EngineError::Cancelled),
            result = self.engine.fetch(session, &target.url) => result,
        };

        if let Ok(response) = &result {
            debug!(
                url = %target.url,
                status = response.status_code,
                elapsed_ms = response.response_time_ms,
                "Response received"
            );
        }
        result
    }
}
