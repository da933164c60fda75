// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含登录、抓取节流、字段提取和输入输出等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 登录配置
    pub auth: AuthSettings,
    /// 抓取配置
    pub crawl: CrawlSettings,
    /// 字段提取配置
    pub extraction: ExtractionSettings,
    /// 输入输出配置
    pub io: IoSettings,
}

/// 登录配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// 登录前访问的首页URL，用于获取防伪令牌
    pub landing_url: String,
    /// 登录表单提交URL
    pub login_url: String,
    /// 防伪令牌所在的表单字段名
    pub token_field: String,
    /// 防伪令牌的备用来源 Cookie 名
    pub token_cookie: String,
    /// 登录邮箱（仅从环境变量读取，不写入配置文件）
    pub email: Option<String>,
    /// 登录密码（仅从环境变量读取，不写入配置文件）
    pub password: Option<String>,
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
    /// 两次请求之间的最小间隔（毫秒）
    pub request_delay_ms: u64,
    /// 被拦截后重试前的等待时间（毫秒）
    pub retry_delay_ms: u64,
    /// 每个目标的最大尝试次数（含首次请求）
    pub max_attempts: u32,
    /// 被视为软拦截的状态码
    pub retry_status_codes: Vec<u16>,
    /// 单个请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 整次运行的截止时间（秒），为空表示不限制
    pub run_timeout_secs: Option<u64>,
    /// 请求使用的 User-Agent
    pub user_agent: String,
}

impl CrawlSettings {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn run_timeout(&self) -> Option<Duration> {
        self.run_timeout_secs.map(Duration::from_secs)
    }
}

/// 字段提取配置设置
///
/// 所有选择器均为 CSS 选择器，启动时统一编译
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    /// 姓名选择器
    pub name_selector: String,
    /// 简介选择器
    pub bio_selector: String,
    /// 联系方式区域选择器，社交链接只在该区域内查找
    pub contact_selector: String,
    /// 经历条目选择器
    pub experience_item_selector: String,
    /// 经历条目中的公司名选择器
    pub experience_key_selector: String,
    /// 经历条目中的职位选择器
    pub experience_value_selector: String,
    /// 教育条目选择器
    pub education_item_selector: String,
    /// 教育条目中的学校名选择器
    pub education_key_selector: String,
    /// 教育条目中的学位选择器
    pub education_value_selector: String,
    /// 社交网站域名白名单
    pub social_domains: Vec<String>,
}

/// 输入输出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct IoSettings {
    /// URL 列表文件路径
    pub input_path: String,
    /// URL 所在列的表头名
    pub input_column: String,
    /// 结果 CSV 输出路径
    pub output_path: String,
}

/// 登录凭据
///
/// 密码不会出现在 Debug 输出中
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、配置文件和环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PROFILE_CRAWLER").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 仅使用内置默认值构建配置，不读取文件和环境变量
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Default auth settings
            .set_default("auth.landing_url", "https://www.linkedin.com")?
            .set_default(
                "auth.login_url",
                "https://www.linkedin.com/checkpoint/lg/login-submit",
            )?
            .set_default("auth.token_field", "csrfToken")?
            .set_default("auth.token_cookie", "JSESSIONID")?
            // Default crawl settings
            .set_default("crawl.request_delay_ms", 5_000)?
            .set_default("crawl.retry_delay_ms", 10_000)?
            .set_default("crawl.max_attempts", 3)?
            .set_default("crawl.retry_status_codes", vec![999, 403, 401, 404])?
            .set_default("crawl.request_timeout_secs", 30)?
            .set_default(
                "crawl.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
            )?
            // Default extraction settings
            .set_default("extraction.name_selector", "h1.top-card-layout__title")?
            .set_default("extraction.bio_selector", "div.top-card-layout__summary")?
            .set_default(
                "extraction.contact_selector",
                "section.pv-contact-info, section.contact-info, div.contact-info",
            )?
            .set_default("extraction.experience_item_selector", "li.experience-item")?
            .set_default(
                "extraction.experience_key_selector",
                ".experience-item__subtitle",
            )?
            .set_default("extraction.experience_value_selector", ".experience-item__title")?
            .set_default("extraction.education_item_selector", "li.education__list-item")?
            .set_default("extraction.education_key_selector", ".education__school-name")?
            .set_default(
                "extraction.education_value_selector",
                ".education__item--degree-info",
            )?
            .set_default(
                "extraction.social_domains",
                vec![
                    "twitter.com",
                    "x.com",
                    "github.com",
                    "facebook.com",
                    "instagram.com",
                    "youtube.com",
                ],
            )?
            // Default io settings
            .set_default("io.input_path", "profiles.csv")?
            .set_default("io.input_column", "LinkedIn URLs")?
            .set_default("io.output_path", "scraped_output.csv")
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
