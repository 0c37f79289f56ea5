// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::outcome::{Outcome, Stage};
use serde::{Deserialize, Serialize};

/// 失败明细
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEntry {
    /// 来源URL
    pub url: String,
    /// 失败阶段
    pub stage: Stage,
    /// 可读的失败原因
    pub cause: String,
}

/// 批次汇总报告
///
/// 调度器开始时创建为空，只在调度器的汇总循环中写入，返回给调用方后不再变化。
/// 失败明细按完成顺序排列。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    succeeded: usize,
    failed: usize,
    failures: Vec<FailureEntry>,
}

impl AggregateReport {
    /// 记录一个URL的处理结果
    pub(crate) fn record(&mut self, url: String, outcome: Outcome) {
        match outcome {
            Outcome::Persisted => self.succeeded += 1,
            Outcome::Failed(failure) => {
                self.failed += 1;
                self.failures.push(FailureEntry {
                    url,
                    stage: failure.stage(),
                    cause: failure.to_string(),
                });
            }
        }
    }

    /// 成功数量
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// 失败数量
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// 失败明细
    pub fn failures(&self) -> &[FailureEntry] {
        &self.failures
    }

    /// 已处理的URL总数，始终等于输入数量
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// 是否全部成功
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
