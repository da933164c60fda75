// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use reqwest::header::{HeaderMap, SET_COOKIE};
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use crate::config::settings::{AuthSettings, Credentials, CrawlSettings};
use crate::engines::reqwest_engine::browser_headers;

/// 登录错误类型
///
/// 任何登录错误都会终止整次运行
#[derive(Error, Debug)]
pub enum AuthError {
    /// 首页中既没有令牌字段，也没有令牌 Cookie
    #[error("Anti-forgery token not found on landing page")]
    TokenMissing,
    /// 登录请求返回非 2xx 状态
    #[error("Login rejected with status {status}")]
    AuthFailed { status: u16 },
    /// 网络层错误
    #[error("Transport error during login: {0}")]
    Transport(#[from] reqwest::Error),
}

/// 已登录会话
///
/// 持有带 Cookie 存储的客户端。只能由 [`SessionBootstrapper::authenticate`]
/// 成功后创建，因此持有该值即意味着已完成登录。
#[derive(Debug, Clone)]
pub struct SessionContext {
    client: reqwest::Client,
}

impl SessionContext {
    /// 会话内共享的HTTP客户端
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    #[cfg(test)]
    pub(crate) fn detached(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// 会话引导器
///
/// 获取防伪令牌并提交登录表单
pub struct SessionBootstrapper {
    settings: AuthSettings,
    client: reqwest::Client,
}

impl SessionBootstrapper {
    /// 创建会话引导器
    ///
    /// 每个引导器拥有独立的 Cookie 存储，多个会话之间互不共享
    pub fn new(auth: &AuthSettings, crawl: &CrawlSettings) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .default_headers(browser_headers(&crawl.user_agent))
            .timeout(crawl.request_timeout())
            .cookie_store(true)
            .build()?;

        Ok(Self {
            settings: auth.clone(),
            client,
        })
    }

    /// 登录并返回已认证的会话
    ///
    /// # 参数
    ///
    /// * `credentials` - 登录凭据
    ///
    /// # 返回值
    ///
    /// * `Ok(SessionContext)` - 登录成功
    /// * `Err(AuthError)` - 令牌缺失、登录被拒绝或网络错误，不做重试
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<SessionContext, AuthError> {
        let landing = self.client.get(&self.settings.landing_url).send().await?;
        let cookie_token = token_from_cookies(landing.headers(), &self.settings.token_cookie);
        let body = landing.text().await?;

        let token = token_from_markup(&body, &self.settings.token_field)
            .or(cookie_token)
            .ok_or(AuthError::TokenMissing)?;
        debug!("Anti-forgery token acquired");

        let form = [
            ("session_key", credentials.email.as_str()),
            ("session_password", credentials.password.as_str()),
            ("csrfToken", token.as_str()),
            ("loginCsrfParam", token.as_str()),
        ];

        let response = self
            .client
            .post(&self.settings.login_url)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Login failed with status code: {}", status.as_u16());
            return Err(AuthError::AuthFailed {
                status: status.as_u16(),
            });
        }

        info!("Successfully logged in");
        Ok(SessionContext {
            client: self.client.clone(),
        })
    }
}

/// 从表单隐藏字段中读取令牌
fn token_from_markup(html: &str, field: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"input[name="{}"]"#, field)).ok()?;
    let document = Html::parse_document(html);
    let token = document
        .select(&selector)
        .filter_map(|e| e.value().attr("value"))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string);
    token
}

/// 从 Set-Cookie 响应头中读取令牌，去掉值两侧的引号
fn token_from_cookies(headers: &HeaderMap, cookie: &str) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|raw| {
            let pair = raw.split(';').next()?.trim();
            let (name, value) = pair.split_once('=')?;
            (name.trim() == cookie).then(|| value.trim().trim_matches('"').to_string())
        })
        .filter(|v| !v.is_empty())
}
