// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 结果（outcome）：一个URL抓取并保存后的成功或失败标记
/// - 汇总报告（report）：整个批次的成功、失败计数和失败明细
/// - 已保存的响应（stored_payload）：持久化层读回的记录
pub mod outcome;
pub mod report;
pub mod stored_payload;
