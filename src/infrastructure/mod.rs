// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施模块
///
/// 仓库接口的文件系统实现：URL 列表读取与 CSV 结果写入
pub mod input;
pub mod storage;
