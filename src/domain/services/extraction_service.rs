// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::settings::ExtractionSettings;
use crate::domain::models::profile::ProfileRecord;

/// 提取错误类型
///
/// 只在启动编译选择器时出现，单个页面的提取永远不会返回错误
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Invalid selector for {field}: {selector}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
    },
}

/// 键值对提取规则（经历、教育）
struct PairRule {
    item: Selector,
    key: Selector,
    value: Selector,
}

impl PairRule {
    /// 遍历列表条目，任一半缺失则跳过该条目，重复键以后出现者为准
    fn collect(&self, document: &Html) -> BTreeMap<String, String> {
        let mut pairs = BTreeMap::new();
        for item in document.select(&self.item) {
            let key = first_text(item, &self.key);
            let value = first_text(item, &self.value);
            if let (Some(key), Some(value)) = (key, value) {
                pairs.insert(key, value);
            }
        }
        pairs
    }
}

/// 资料字段提取器
///
/// 负责从资料页 HTML 中提取结构化记录。缺失的元素只会让对应字段为空，
/// 不会让整条记录失败。
pub struct ProfileExtractor {
    name: Selector,
    bio: Selector,
    contact: Selector,
    anchor: Selector,
    experience: PairRule,
    education: PairRule,
    social_domains: Vec<String>,
}

impl ProfileExtractor {
    /// 根据配置编译所有选择器
    ///
    /// # 返回值
    ///
    /// * `Ok(ProfileExtractor)` - 编译成功
    /// * `Err(ExtractionError)` - 存在无效选择器
    pub fn new(settings: &ExtractionSettings) -> Result<Self, ExtractionError> {
        Ok(Self {
            name: compile("name", &settings.name_selector)?,
            bio: compile("bio", &settings.bio_selector)?,
            contact: compile("contact", &settings.contact_selector)?,
            anchor: compile("anchor", "a[href]")?,
            experience: PairRule {
                item: compile("experience item", &settings.experience_item_selector)?,
                key: compile("experience key", &settings.experience_key_selector)?,
                value: compile("experience value", &settings.experience_value_selector)?,
            },
            education: PairRule {
                item: compile("education item", &settings.education_item_selector)?,
                key: compile("education key", &settings.education_key_selector)?,
                value: compile("education value", &settings.education_value_selector)?,
            },
            social_domains: settings
                .social_domains
                .iter()
                .map(|d| d.trim().trim_start_matches("www.").to_ascii_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        })
    }

    /// 提取一条资料记录
    ///
    /// 对同一份标记重复调用得到完全相同的记录。解析库内部出现 panic 时，
    /// 记录降级为只保留URL的空记录。
    pub fn extract(&self, url: &str, markup: &str) -> ProfileRecord {
        match panic::catch_unwind(AssertUnwindSafe(|| self.extract_fields(url, markup))) {
            Ok(record) => {
                if record.is_degraded() {
                    debug!(url, missing = ?record.missing_fields(), "Profile extracted with missing fields");
                }
                record
            }
            Err(_) => {
                warn!(url, "Error parsing profile, falling back to empty record");
                ProfileRecord::empty(url)
            }
        }
    }

    fn extract_fields(&self, url: &str, markup: &str) -> ProfileRecord {
        let document = Html::parse_document(markup);
        let root = document.root_element();

        ProfileRecord {
            linkedin_url: url.to_string(),
            name: first_text(root, &self.name),
            bio: first_text(root, &self.bio),
            socials: self.social_links(&document, url),
            experience: self.experience.collect(&document),
            education: self.education.collect(&document),
        }
    }

    /// 联系方式区域内、域名在白名单中的链接，按文档顺序，存为绝对URL
    fn social_links(&self, document: &Html, page_url: &str) -> Vec<String> {
        let base = Url::parse(page_url).ok();
        let mut links = Vec::new();

        for region in document.select(&self.contact) {
            for anchor in region.select(&self.anchor) {
                let Some(href) = anchor.value().attr("href").map(str::trim) else {
                    continue;
                };
                let resolved = match &base {
                    Some(base) => base.join(href),
                    None => Url::parse(href),
                };
                if let Ok(link) = resolved {
                    if self.is_social_host(&link) {
                        links.push(link.to_string());
                    }
                }
            }
        }

        links
    }

    fn is_social_host(&self, link: &Url) -> bool {
        let Some(host) = link.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        self.social_domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

fn compile(field: &'static str, selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|_| ExtractionError::InvalidSelector {
        field,
        selector: selector.to_string(),
    })
}

/// 第一个匹配元素的文本，去掉首尾空白后为空则视为缺失
///
/// 内部空白原样保留，多行简介的换行不丢失
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let element = scope.select(selector).next()?;
    let text = element.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
