// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 已持久化的响应记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPayload {
    /// 记录唯一标识符
    pub id: Uuid,
    /// 来源URL
    pub url: String,
    /// 原始响应体
    pub response: Vec<u8>,
    /// 写入时间
    pub created_at: DateTime<Utc>,
}
