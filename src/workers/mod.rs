// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// - 抓取工作器（fetch_worker）：单个URL的抓取后保存
/// - 调度器（dispatcher）：批量并发启动工作器并汇总结果
pub mod dispatcher;
pub mod fetch_worker;

pub use dispatcher::{DispatchOptions, Dispatcher};
pub use fetch_worker::FetchWorker;
