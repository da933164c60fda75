// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::collections::BTreeMap;

/// 个人资料记录
///
/// 每个成功抓取的目标恰好生成一条记录，生成后不再修改。
/// 经历和教育使用有序映射，保证序列化结果稳定。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    /// 输入中的资料页URL，始终保留
    pub linkedin_url: String,
    /// 姓名
    pub name: Option<String>,
    /// 简介
    pub bio: Option<String>,
    /// 社交链接，按文档顺序，允许重复
    pub socials: Vec<String>,
    /// 公司名 -> 职位
    pub experience: BTreeMap<String, String>,
    /// 学校名 -> 学位
    pub education: BTreeMap<String, String>,
}

impl ProfileRecord {
    /// 创建只有URL的空记录
    pub fn empty(linkedin_url: impl Into<String>) -> Self {
        Self {
            linkedin_url: linkedin_url.into(),
            name: None,
            bio: None,
            socials: Vec::new(),
            experience: BTreeMap::new(),
            education: BTreeMap::new(),
        }
    }

    /// 返回缺失的字段名，用于降级统计
    ///
    /// 社交链接为空不算缺失
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.bio.is_none() {
            missing.push("bio");
        }
        if self.experience.is_empty() {
            missing.push("experience");
        }
        if self.education.is_empty() {
            missing.push("education");
        }
        missing
    }

    /// 是否存在缺失字段
    pub fn is_degraded(&self) -> bool {
        !self.missing_fields().is_empty()
    }
}
