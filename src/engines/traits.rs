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

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// 抓取错误类型
///
/// `Display` 输出即为报告中记录的失败原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// 在超时时间内未完成抓取
    #[error("timeout")]
    Timeout,
    /// 传输层失败或URL格式错误
    #[error("network error: {0}")]
    Network(String),
    /// 无法与远端建立连接
    #[error("network error: {0}")]
    Connect(String),
    /// 远端返回非 2xx 状态码
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),
    /// 批次被取消，抓取未完成
    #[error("cancelled")]
    Cancelled,
}

impl FetchError {
    /// 判断错误是否属于暂时性错误
    ///
    /// 仅用于分类，抓取器本身从不重试
    ///
    /// # 返回值
    ///
    /// 超时、连接失败、5xx 和 429 返回true，其余返回false
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::Connect(_) => true,
            FetchError::HttpStatus(code) => *code >= 500 || *code == 429,
            FetchError::Network(_) | FetchError::Cancelled => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connect(describe_chain(&err))
        } else {
            FetchError::Network(describe_chain(&err))
        }
    }
}

/// 拼接错误及其完整的 source 链
fn describe_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // hyper and io errors sometimes repeat the inner message verbatim
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// 抓取器特质
///
/// 每次调用只发出一次网络请求，实现必须可以被并发调用
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// 抓取URL并返回原始响应体
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;

    /// 抓取器名称
    fn name(&self) -> &'static str;
}
