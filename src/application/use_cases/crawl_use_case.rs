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
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::{
    config::settings::{Credentials, Settings},
    domain::{
        models::summary::{BatchSummary, CrawlReport, RunStatus},
        repositories::sink_repository::{RecordSink, StorageError},
        services::{
            extraction_service::{ExtractionError, ProfileExtractor},
            response_classifier::ResponseClassifier,
        },
    },
    engines::{
        session::{AuthError, SessionBootstrapper},
        traits::ProfileEngine,
    },
    queue::{retry::RetryController, scheduler::RequestScheduler, task_queue::TargetQueue},
    utils::retry_policy::RetryPolicy,
    workers::crawl_worker::{CrawlWorker, DrainOutcome},
};

#[derive(Error, Debug)]
pub enum CrawlUseCaseError {
    #[error("Extraction setup failed: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("Session setup failed: {0}")]
    Session(#[from] AuthError),
}

/// 资料抓取用例
///
/// 一次运行的完整流程：登录、处理队列、持久化结果。
/// 无论登录失败、被取消还是正常完成，结果汇集都恰好持久化一次。
pub struct ProfileCrawlUseCase {
    bootstrapper: SessionBootstrapper,
    worker: CrawlWorker,
}

impl ProfileCrawlUseCase {
    pub fn new(bootstrapper: SessionBootstrapper, worker: CrawlWorker) -> Self {
        Self {
            bootstrapper,
            worker,
        }
    }

    /// 根据配置装配全部组件
    pub fn from_settings(
        settings: &Settings,
        engine: Arc<dyn ProfileEngine>,
    ) -> Result<Self, CrawlUseCaseError> {
        let bootstrapper = SessionBootstrapper::new(&settings.auth, &settings.crawl)?;
        let extractor = Arc::new(ProfileExtractor::new(&settings.extraction)?);

        let worker = CrawlWorker::new(
            RequestScheduler::new(engine, settings.crawl.request_delay()),
            ResponseClassifier::new(settings.crawl.retry_status_codes.iter().copied()),
            RetryController::new(RetryPolicy::from_settings(&settings.crawl)),
            extractor,
        );

        Ok(Self::new(bootstrapper, worker))
    }

    /// 执行一次抓取运行
    ///
    /// # 参数
    ///
    /// * `credentials` - 登录凭据
    /// * `urls` - 按输入顺序排列的资料页URL
    /// * `sink` - 结果汇集，运行结束时被消耗
    /// * `cancel` - 取消信号（Ctrl-C 或运行截止时间）
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlReport)` - 产物路径、批次统计和运行状态（含登录失败）
    /// * `Err(StorageError)` - 结果持久化失败
    pub async fn run<S: RecordSink>(
        &mut self,
        credentials: &Credentials,
        urls: Vec<String>,
        mut sink: S,
        cancel: &CancellationToken,
    ) -> Result<CrawlReport, StorageError> {
        let mut queue = TargetQueue::from_urls(urls);
        let mut summary = BatchSummary {
            total_targets: queue.len(),
            ..Default::default()
        };

        let authenticated = tokio::select! {
            _ = cancel.cancelled() => None,
            result = self.bootstrapper.authenticate(credentials) => Some(result),
        };

        let status = match authenticated {
            None => RunStatus::Cancelled,
            Some(Err(e)) => {
                error!("Authentication failed, no profiles will be fetched: {}", e);
                RunStatus::AuthFailed(e)
            }
            Some(Ok(session)) => {
                if queue.is_empty() {
                    warn!("No target URLs to scrape");
                }
                info!(targets = queue.len(), "Starting to scrape profiles");
                match self
                    .worker
                    .run(&mut queue, &session, &mut sink, &mut summary, cancel)
                    .await
                {
                    DrainOutcome::Completed => RunStatus::Completed,
                    DrainOutcome::Cancelled => RunStatus::Cancelled,
                }
            }
        };
        summary.unprocessed = queue.len();

        let artifact = sink.finalize()?;
        log_summary(&summary, &status);

        Ok(CrawlReport {
            artifact,
            summary,
            status,
        })
    }
}

fn log_summary(summary: &BatchSummary, status: &RunStatus) {
    info!(
        total = summary.total_targets,
        records = summary.records,
        degraded = summary.degraded_records,
        dropped = summary.dropped.len(),
        unprocessed = summary.unprocessed,
        "Crawl finished"
    );
    for dropped in &summary.dropped {
        warn!(url = %dropped.url, attempts = dropped.attempts, reason = %dropped.reason, "Dropped target");
    }
    if matches!(status, RunStatus::Cancelled) {
        warn!(
            unprocessed = summary.unprocessed,
            "Run cancelled before all targets were processed"
        );
    }
}
