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

use crate::config::settings::DispatchSettings;
use crate::domain::models::outcome::Outcome;
use crate::domain::models::report::AggregateReport;
use crate::domain::repositories::payload_repository::PayloadRepository;
use crate::engines::traits::{FetchError, Fetcher};
use crate::utils::errors::DispatchError;
use crate::workers::fetch_worker::FetchWorker;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// 调度选项
///
/// 默认不限制并发、不设置截止时间
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// 同时执行抓取和持久化的最大任务数
    pub max_concurrency: Option<usize>,
    /// 整个批次的截止时间，到期后未完成的抓取被取消
    pub deadline: Option<Duration>,
}

impl From<&DispatchSettings> for DispatchOptions {
    fn from(settings: &DispatchSettings) -> Self {
        Self {
            max_concurrency: settings.max_concurrency.filter(|limit| *limit > 0),
            deadline: settings.deadline_secs.map(Duration::from_secs),
        }
    }
}

/// 批量调度器
///
/// 为每个URL启动一个任务，按完成顺序汇总每个任务的结果，
/// 在收齐全部结果之前不会返回。汇总报告只在这里写入。
pub struct Dispatcher<F, P>
where
    F: Fetcher,
    P: PayloadRepository,
{
    worker: FetchWorker<F, P>,
    options: DispatchOptions,
    cancel: CancellationToken,
}

impl<F, P> Dispatcher<F, P>
where
    F: Fetcher + 'static,
    P: PayloadRepository + 'static,
{
    /// 创建新的调度器实例
    pub fn new(worker: FetchWorker<F, P>, options: DispatchOptions) -> Self {
        Self {
            worker,
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// 使用调用方提供的取消令牌
    ///
    /// 令牌被取消后，尚未完成抓取的URL以 `cancelled` 记为失败
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// 获取调度器的取消令牌
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 并发抓取并保存所有URL
    ///
    /// # 参数
    ///
    /// * `urls` - 抓取目标，允许重复
    ///
    /// # 返回值
    ///
    /// * `Ok(AggregateReport)` - 成功数加失败数恒等于 `urls.len()`
    /// * `Err(DispatchError)` - 某个任务崩溃，其余任务被中止，不返回部分报告
    #[instrument(skip_all, fields(batch_size = urls.len()))]
    pub async fn run(&self, urls: &[String]) -> Result<AggregateReport, DispatchError> {
        let mut report = AggregateReport::default();
        if urls.is_empty() {
            return Ok(report);
        }

        // Batch scoped so the deadline never cancels the caller's token
        let batch = self.cancel.child_token();
        let _abandon = batch.clone().drop_guard();
        let permits = self
            .options
            .max_concurrency
            .map(|limit| Arc::new(Semaphore::new(limit.max(1))));

        let mut units = JoinSet::new();
        for url in urls {
            let worker = self.worker.clone();
            let token = batch.clone();
            let permits = permits.clone();
            let url = url.clone();

            units.spawn(async move {
                let _permit = match permits {
                    Some(permits) => {
                        let acquired = tokio::select! {
                            biased;
                            _ = token.cancelled() => None,
                            permit = permits.acquire_owned() => permit.ok(),
                        };
                        match acquired {
                            Some(permit) => Some(permit),
                            None => return (url, Outcome::from(FetchError::Cancelled)),
                        }
                    }
                    None => None,
                };

                let outcome = worker.run_until_cancelled(&url, &token).await;
                (url, outcome)
            });
        }
        debug!(
            launched = units.len(),
            max_concurrency = ?self.options.max_concurrency,
            "Units launched"
        );

        let deadline = self.options.deadline.map(|after| Instant::now() + after);
        loop {
            let joined = match deadline {
                Some(at) if !batch.is_cancelled() => {
                    tokio::select! {
                        joined = units.join_next() => joined,
                        _ = sleep_until(at) => {
                            debug!(remaining = units.len(), "Batch deadline reached");
                            batch.cancel();
                            continue;
                        }
                    }
                }
                _ => units.join_next().await,
            };

            let Some(joined) = joined else {
                break;
            };
            let (url, outcome) = joined?;
            report.record(url, outcome);
        }

        debug_assert_eq!(report.total(), urls.len());
        debug!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "Batch drained"
        );
        Ok(report)
    }
}
