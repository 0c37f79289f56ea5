// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用层模块
///
/// 组合领域、引擎和基础设施，向命令行入口暴露完整的业务流程
pub mod use_cases;
