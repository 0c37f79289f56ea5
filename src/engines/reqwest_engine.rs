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

use crate::config::settings::FetchSettings;
use crate::engines::traits::{FetchError, Fetcher};
use crate::engines::validators;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use tracing::debug;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; harvestrs/0.1)";

/// 抓取引擎
///
/// 基于reqwest实现的HTTP(S) GET抓取器，内部持有一个可并发共享的连接池
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestFetcher {
    /// 默认的单次抓取超时时间
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// 创建新的抓取器
    ///
    /// # 参数
    ///
    /// * `timeout` - 单次抓取（含读取响应体）的超时时间
    /// * `user_agent` - 请求使用的 User-Agent
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestFetcher)` - 抓取器实例
    /// * `Err(FetchError)` - HTTP客户端构建失败
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self { client, timeout })
    }

    /// 根据抓取配置创建抓取器
    pub fn from_settings(settings: &FetchSettings) -> Result<Self, FetchError> {
        Self::new(settings.timeout(), &settings.user_agent)
    }

    /// 当前使用的超时时间
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn get(&self, url: url::Url) -> Result<Bytes, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies are never read
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        Ok(response.bytes().await?)
    }
}

impl Default for ReqwestFetcher {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(Bytes)` - 2xx 响应的原始响应体
    /// * `Err(FetchError)` - URL非法、网络失败、超时或非 2xx 状态码
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let target = validators::parse_target(url)?;

        // The deadline covers connect, headers and the full body read
        let body = tokio::time::timeout(self.timeout, self.get(target))
            .await
            .map_err(|_| FetchError::Timeout)??;

        debug!(url, bytes = body.len(), "Fetched payload");
        Ok(body)
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
