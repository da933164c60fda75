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

use anyhow::Context;
use profile_crawler::application::use_cases::crawl_use_case::ProfileCrawlUseCase;
use profile_crawler::config::settings::{AuthSettings, Credentials, Settings};
use profile_crawler::domain::models::summary::RunStatus;
use profile_crawler::domain::repositories::target_source::TargetSource;
use profile_crawler::engines::reqwest_engine::ReqwestEngine;
use profile_crawler::infrastructure::input::CsvUrlSource;
use profile_crawler::infrastructure::storage::CsvRecordSink;
use profile_crawler::utils::telemetry;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// 主函数
///
/// 加载配置、读取目标列表、登录并抓取，最后写出结果文件
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting profile-crawler...");

    // 2. Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    info!("Configuration loaded");

    // 3. Credentials come from the environment or an interactive prompt, never from files
    let credentials = resolve_credentials(&settings.auth)?;

    // 4. Assemble the pipeline before touching the network so bad selectors fail fast
    let mut use_case = ProfileCrawlUseCase::from_settings(&settings, Arc::new(ReqwestEngine))?;

    // 5. Load targets; an unreadable input still produces an artifact
    let source = CsvUrlSource::new(&settings.io.input_path, &settings.io.input_column);
    let urls = match source.load_urls().await {
        Ok(urls) => urls,
        Err(e) => {
            error!("Error reading input file {}: {}", settings.io.input_path, e);
            Vec::new()
        }
    };
    info!(targets = urls.len(), "Targets loaded");

    // 6. Cancellation: Ctrl-C or run deadline
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing with partial results");
            ctrl_c.cancel();
        }
    });
    if let Some(deadline) = settings.crawl.run_timeout() {
        let expired = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            warn!("Run deadline reached, finishing with partial results");
            expired.cancel();
        });
    }

    // 7. Run
    let sink = CsvRecordSink::new(&settings.io.output_path);
    let report = use_case.run(&credentials, urls, sink, &cancel).await?;

    match report.status {
        RunStatus::AuthFailed(e) => {
            anyhow::bail!(
                "authentication failed: {} (empty-result marker written to {})",
                e,
                report.artifact.display()
            )
        }
        RunStatus::Cancelled => warn!(
            records = report.summary.records,
            artifact = %report.artifact.display(),
            "Run cancelled, partial results written"
        ),
        RunStatus::Completed => info!(
            records = report.summary.records,
            dropped = report.summary.dropped.len(),
            artifact = %report.artifact.display(),
            "Run completed"
        ),
    }

    Ok(())
}

fn resolve_credentials(auth: &AuthSettings) -> anyhow::Result<Credentials> {
    let email = match &auth.email {
        Some(email) => email.clone(),
        None => prompt("Enter your LinkedIn email: ")?,
    };
    let password = match &auth.password {
        Some(password) => password.clone(),
        None => prompt("Enter your LinkedIn password: ")?,
    };
    Ok(Credentials::new(email, password))
}

fn prompt(label: &str) -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(label.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim().to_string())
}
