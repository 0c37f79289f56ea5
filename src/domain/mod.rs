// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含批量抓取的核心数据结构，包括：
/// - 领域模型（models）：单个URL的结果、批次汇总报告和已保存的响应
/// - 仓库接口（repositories）：响应体持久化抽象接口
pub mod models;
pub mod repositories;
