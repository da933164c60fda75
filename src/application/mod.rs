// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含把领域服务、调度队列和基础设施串联起来的用例
pub mod use_cases;
