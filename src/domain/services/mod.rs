// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 字段提取（extraction_service）：把资料页标记映射为结构化记录
/// - 响应分类（response_classifier）：区分成功、软拦截与永久失败
pub mod extraction_service;
pub mod response_classifier;
