// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含一次抓取运行的完整用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、服务和仓库接口
pub mod domain;

/// 引擎模块
///
/// 会话登录与资料页抓取引擎
pub mod engines;

/// 基础设施模块
///
/// 提供文件输入与 CSV 输出
pub mod infrastructure;

/// 队列模块
///
/// 实现目标队列、节流调度和重试控制
pub mod queue;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现逐个处理目标的抓取工作器
pub mod workers;
