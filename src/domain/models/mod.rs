// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 个人资料记录（profile）：从资料页提取出的结构化字段
/// - 抓取目标（target）：待抓取的URL及其尝试序号
/// - 批次统计（summary）：运行结束时的汇总与被丢弃目标
pub mod profile;
pub mod summary;
pub mod target;
