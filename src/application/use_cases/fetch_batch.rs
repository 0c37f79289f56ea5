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

use crate::domain::models::report::AggregateReport;
use crate::domain::repositories::payload_repository::PayloadRepository;
use crate::engines::traits::Fetcher;
use crate::utils::errors::DispatchError;
use crate::workers::dispatcher::{DispatchOptions, Dispatcher};
use crate::workers::fetch_worker::FetchWorker;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// 批量抓取用例
///
/// 装配抓取器、仓库和调度器，执行一个批次并统一记录结果
pub struct FetchBatchUseCase<F, P>
where
    F: Fetcher,
    P: PayloadRepository,
{
    dispatcher: Dispatcher<F, P>,
}

impl<F, P> FetchBatchUseCase<F, P>
where
    F: Fetcher + 'static,
    P: PayloadRepository + 'static,
{
    pub fn new(fetcher: Arc<F>, repository: Arc<P>, options: DispatchOptions) -> Self {
        Self {
            dispatcher: Dispatcher::new(FetchWorker::new(fetcher, repository), options),
        }
    }

    /// 取消令牌，用于在外部中断批次（例如 Ctrl+C）
    pub fn cancellation_token(&self) -> CancellationToken {
        self.dispatcher.cancellation_token()
    }

    /// 执行批次并记录汇总报告
    pub async fn execute(&self, urls: &[String]) -> Result<AggregateReport, DispatchError> {
        info!(count = urls.len(), "Dispatching batch");
        let report = self.dispatcher.run(urls).await?;
        log_report(&report);
        Ok(report)
    }
}

/// 记录批次报告
///
/// 管道内部不记录失败日志，所有失败在这里统一输出
pub fn log_report(report: &AggregateReport) {
    for failure in report.failures() {
        warn!(
            url = %failure.url,
            stage = %failure.stage,
            cause = %failure.cause,
            "URL failed"
        );
    }

    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "Batch finished"
    );
}
