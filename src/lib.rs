// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含批量抓取用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含结果、汇总报告等核心数据结构和仓库接口
pub mod domain;

/// 引擎模块
///
/// 实现URL抓取引擎
pub mod engines;

/// 基础设施模块
///
/// 提供数据库连接和仓库实现
pub mod infrastructure;

/// 工具模块
///
/// 提供错误类型、遥测和URL解析等辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现单个URL的抓取工作器和批量调度器
pub mod workers;
