// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::DbErr;
use thiserror::Error;

/// 持久化错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// 写入未能持久化完成
    #[error("write failure: {0}")]
    WriteFailure(String),
}

impl From<DbErr> for PersistError {
    fn from(err: DbErr) -> Self {
        PersistError::WriteFailure(err.to_string())
    }
}

/// 调度器错误类型
///
/// 只表示无法恢复的内部错误，单个URL的失败不会产生该错误
#[derive(Error, Debug)]
pub enum DispatchError {
    /// 任务崩溃或无法被回收
    #[error("unit of work did not complete: {0}")]
    TaskFailed(String),
}

impl From<tokio::task::JoinError> for DispatchError {
    fn from(err: tokio::task::JoinError) -> Self {
        DispatchError::TaskFailed(err.to_string())
    }
}
