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

use crate::domain::models::outcome::Outcome;
use crate::domain::repositories::payload_repository::PayloadRepository;
use crate::engines::traits::{FetchError, Fetcher};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// 抓取工作器
///
/// 对单个URL依次执行抓取和持久化，产生一个 `Outcome`。
/// 不保存任何跨调用状态，可按URL任意并发运行。
pub struct FetchWorker<F, P>
where
    F: Fetcher,
    P: PayloadRepository,
{
    fetcher: Arc<F>,
    repository: Arc<P>,
}

impl<F, P> Clone for FetchWorker<F, P>
where
    F: Fetcher,
    P: PayloadRepository,
{
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            repository: self.repository.clone(),
        }
    }
}

impl<F, P> FetchWorker<F, P>
where
    F: Fetcher,
    P: PayloadRepository,
{
    /// 创建新的抓取工作器实例
    pub fn new(fetcher: Arc<F>, repository: Arc<P>) -> Self {
        Self {
            fetcher,
            repository,
        }
    }

    /// 抓取并保存一个URL
    ///
    /// 抓取失败时直接返回，仓库不会被调用
    #[instrument(skip(self), fields(fetcher = self.fetcher.name()))]
    pub async fn run(&self, url: &str) -> Outcome {
        match self.fetcher.fetch(url).await {
            Ok(payload) => self.persist(url, &payload).await,
            Err(e) => e.into(),
        }
    }

    /// 与 `run` 相同，但抓取阶段可被取消
    ///
    /// 取消只作用于抓取阶段，已经开始的持久化会执行完毕
    #[instrument(skip(self, token), fields(fetcher = self.fetcher.name()))]
    pub async fn run_until_cancelled(&self, url: &str, token: &CancellationToken) -> Outcome {
        let fetched = tokio::select! {
            biased;
            _ = token.cancelled() => Err(FetchError::Cancelled),
            result = self.fetcher.fetch(url) => result,
        };

        match fetched {
            Ok(payload) => self.persist(url, &payload).await,
            Err(e) => e.into(),
        }
    }

    async fn persist(&self, url: &str, payload: &[u8]) -> Outcome {
        match self.repository.save(url, payload).await {
            Ok(()) => Outcome::Persisted,
            Err(e) => e.into(),
        }
    }
}

#[cfg(test)]
#[path = "fetch_worker_test.rs"]
mod tests;
