// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::PersistError;
use async_trait::async_trait;

/// 响应体仓库特质
///
/// 只暴露一个写操作。实现必须允许多个工作器并发调用而无需外部加锁，
/// 单条记录要么完整写入，要么返回 `PersistError::WriteFailure`。
#[async_trait]
pub trait PayloadRepository: Send + Sync {
    /// 保存以URL为键的原始响应体
    async fn save(&self, url: &str, payload: &[u8]) -> Result<(), PersistError>;
}
