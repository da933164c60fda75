// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：资料记录、抓取目标和批次统计
/// - 仓库接口（repositories）：输入来源与结果汇集的抽象接口
/// - 服务（services）：字段提取和响应分类
///
/// 领域层不依赖任何具体的输入输出实现。
pub mod models;
pub mod repositories;
pub mod services;
