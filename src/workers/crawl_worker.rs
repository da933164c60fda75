// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::domain::models::profile::ProfileRecord;
use crate::domain::models::summary::{BatchSummary, DropReason, DroppedTarget};
use crate::domain::models::target::CrawlTarget;
use crate::domain::repositories::sink_repository::RecordSink;
use crate::domain::services::extraction_service::ProfileExtractor;
use crate::domain::services::response_classifier::{Classification, ResponseClassifier};
use crate::engines::session::SessionContext;
use crate::engines::traits::EngineError;
use crate::queue::retry::{RetryController, RetryDecision};
use crate::queue::scheduler::RequestScheduler;
use crate::queue::task_queue::TargetQueue;

/// 队列处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// 队列已清空
    Completed,
    /// 被取消，队列中剩余目标未处理
    Cancelled,
}

/// 单个目标的处理结果
enum TargetOutcome {
    Extracted(ProfileRecord),
    Requeue(CrawlTarget),
    Dropped(DroppedTarget),
    Cancelled(CrawlTarget),
}

/// 抓取工作者
///
/// 单一逻辑工作者：依次取出目标，经调度器抓取、分类器判定，
/// 成功则提取并交给结果汇集，软拦截则交给重试控制器。
pub struct CrawlWorker {
    scheduler: RequestScheduler,
    classifier: ResponseClassifier,
    retry: RetryController,
    extractor: Arc<ProfileExtractor>,
}

impl CrawlWorker {
    /// 创建新的抓取工作者实例
    pub fn new(
        scheduler: RequestScheduler,
        classifier: ResponseClassifier,
        retry: RetryController,
        extractor: Arc<ProfileExtractor>,
    ) -> Self {
        Self {
            scheduler,
            classifier,
            retry,
            extractor,
        }
    }

    /// 处理队列直到清空或被取消
    ///
    /// 记录按成功完成的顺序写入 `sink`；被丢弃的目标计入 `summary`。
    /// 取消时当前目标放回队首，队列中剩余的即为未处理目标。
    pub async fn run<S: RecordSink>(
        &mut self,
        queue: &mut TargetQueue,
        session: &SessionContext,
        sink: &mut S,
        summary: &mut BatchSummary,
        cancel: &CancellationToken,
    ) -> DrainOutcome {
        while let Some(target) = queue.pop_next() {
            if cancel.is_cancelled() {
                queue.requeue(target);
                return DrainOutcome::Cancelled;
            }

            match self.process_target(target, session, cancel).await {
                TargetOutcome::Extracted(record) => {
                    summary.records += 1;
                    if record.is_degraded() {
                        summary.degraded_records += 1;
                    }
                    info!(url = %record.linkedin_url, "Profile scraped");
                    sink.record(record);
                }
                TargetOutcome::Requeue(target) => queue.requeue(target),
                TargetOutcome::Dropped(dropped) => {
                    warn!(url = %dropped.url, attempts = dropped.attempts, reason = %dropped.reason, "Target dropped");
                    summary.dropped.push(dropped);
                }
                TargetOutcome::Cancelled(target) => {
                    queue.requeue(target);
                    return DrainOutcome::Cancelled;
                }
            }
        }

        DrainOutcome::Completed
    }

    #[instrument(skip_all, fields(url = %target.url, attempt = target.attempts))]
    async fn process_target(
        &mut self,
        target: CrawlTarget,
        session: &SessionContext,
        cancel: &CancellationToken,
    ) -> TargetOutcome {
        let outcome = self.scheduler.fetch(&target, session, cancel).await;
        if matches!(outcome, Err(EngineError::Cancelled)) {
            return TargetOutcome::Cancelled(target);
        }

        match self.classifier.classify(outcome) {
            Classification::Success(body) => {
                TargetOutcome::Extracted(self.extractor.extract(&target.url, &body))
            }
            Classification::RetryableBlock(status) => {
                match self.retry.on_retryable(target, status) {
                    RetryDecision::Requeue { target, delay } => {
                        tokio::select! {
                            _ = cancel.cancelled() => TargetOutcome::Cancelled(target),
                            _ = sleep(delay) => TargetOutcome::Requeue(target),
                        }
                    }
                    RetryDecision::GiveUp(target) => TargetOutcome::Dropped(DroppedTarget {
                        url: target.url,
                        attempts: target.attempts,
                        reason: DropReason::RetriesExhausted {
                            last_status: status,
                        },
                    }),
                }
            }
            Classification::PermanentFailure { status, cause } => {
                TargetOutcome::Dropped(DroppedTarget {
                    url: target.url,
                    attempts: target.attempts,
                    reason: DropReason::Permanent { status, cause },
                })
            }
        }
    }
}
