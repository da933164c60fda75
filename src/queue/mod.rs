// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 目标工作队列、节流请求调度器和有界重试控制器
pub mod retry;
pub mod scheduler;
pub mod task_queue;
