// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::FetchError;
use url::Url;

/// 校验抓取目标是否为合法的 http(s) 地址
///
/// 不做任何网络 I/O，非法输入直接返回 `FetchError::Network`
pub fn parse_target(url_str: &str) -> Result<Url, FetchError> {
    let trimmed = url_str.trim();
    if trimmed.is_empty() {
        return Err(FetchError::Network("invalid url: empty".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| FetchError::Network(format!("invalid url {}: {}", trimmed, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::Network(format!(
            "invalid url {}: unsupported scheme {}",
            trimmed,
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(FetchError::Network(format!(
            "invalid url {}: missing host",
            trimmed
        )));
    }

    Ok(url)
}
