// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::FetchError;
use crate::utils::errors::PersistError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 失败发生的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// 抓取阶段
    Fetch,
    /// 持久化阶段
    Persist,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetch => write!(f, "fetch"),
            Stage::Persist => write!(f, "persist"),
        }
    }
}

/// 单个URL的失败原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitFailure {
    /// 抓取失败，持久化未执行
    #[error(transparent)]
    Fetch(FetchError),
    /// 抓取成功但持久化失败
    #[error(transparent)]
    Persist(PersistError),
}

impl UnitFailure {
    /// 失败所在阶段
    pub fn stage(&self) -> Stage {
        match self {
            UnitFailure::Fetch(_) => Stage::Fetch,
            UnitFailure::Persist(_) => Stage::Persist,
        }
    }
}

/// 单个URL的处理结果
///
/// 由抓取工作器产生，只被调度器消费一次
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 响应已持久化
    Persisted,
    /// 处理失败
    Failed(UnitFailure),
}

impl Outcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Outcome::Persisted)
    }

    pub fn failure(&self) -> Option<&UnitFailure> {
        match self {
            Outcome::Persisted => None,
            Outcome::Failed(failure) => Some(failure),
        }
    }
}

impl From<FetchError> for Outcome {
    fn from(err: FetchError) -> Self {
        Outcome::Failed(UnitFailure::Fetch(err))
    }
}

impl From<PersistError> for Outcome {
    fn from(err: PersistError) -> Self {
        Outcome::Failed(UnitFailure::Persist(err))
    }
}
