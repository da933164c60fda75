// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;
use std::path::PathBuf;

use crate::engines::session::AuthError;

/// 目标被丢弃的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// 软拦截重试次数耗尽
    RetriesExhausted { last_status: u16 },
    /// 永久失败
    Permanent {
        status: Option<u16>,
        cause: String,
    },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::RetriesExhausted { last_status } => {
                write!(f, "retries exhausted (last status {})", last_status)
            }
            DropReason::Permanent {
                status: Some(status),
                cause,
            } => write!(f, "permanent failure (status {}): {}", status, cause),
            DropReason::Permanent { status: None, cause } => {
                write!(f, "permanent failure: {}", cause)
            }
        }
    }
}

/// 被丢弃的目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedTarget {
    pub url: String,
    pub attempts: u32,
    pub reason: DropReason,
}

/// 批次统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// 输入目标总数
    pub total_targets: usize,
    /// 生成的记录数
    pub records: usize,
    /// 存在缺失字段的记录数
    pub degraded_records: usize,
    /// 因取消而未处理的目标数
    pub unprocessed: usize,
    /// 被丢弃的目标
    pub dropped: Vec<DroppedTarget>,
}

/// 运行状态
#[derive(Debug)]
pub enum RunStatus {
    /// 所有目标均已处理
    Completed,
    /// 运行被取消或超过截止时间
    Cancelled,
    /// 登录失败，未发出任何资料请求
    AuthFailed(AuthError),
}

/// 运行报告
#[derive(Debug)]
pub struct CrawlReport {
    /// 输出文件路径
    pub artifact: PathBuf,
    pub summary: BatchSummary,
    pub status: RunStatus,
}
