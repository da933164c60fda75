// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use profile_crawler::config::settings::{Credentials, Settings};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const TEST_EMAIL: &str = "user@example.com";
pub const TEST_PASSWORD: &str = "hunter2";
pub const LOGIN_TOKEN: &str = "ajax:tok-123";
const SESSION_COOKIE: &str = "li_at=session-ok";

/// 模拟站点的请求计数
#[derive(Default)]
pub struct SiteState {
    pub login_hits: AtomicUsize,
    profile_hits: Mutex<HashMap<String, usize>>,
}

impl SiteState {
    pub fn hits(&self, id: &str) -> usize {
        self.profile_hits
            .lock()
            .unwrap()
            .get(id)
            .copied()
            .unwrap_or_default()
    }

    pub fn total_profile_hits(&self) -> usize {
        self.profile_hits.lock().unwrap().values().sum()
    }

    fn record_hit(&self, id: &str) -> usize {
        let mut hits = self.profile_hits.lock().unwrap();
        let count = hits.entry(id.to_string()).or_default();
        *count += 1;
        *count
    }
}

pub struct FakeSite {
    pub base_url: String,
    pub state: Arc<SiteState>,
}

impl FakeSite {
    pub fn profile_url(&self, id: &str) -> String {
        format!("{}/in/{}", self.base_url, id)
    }
}

pub fn credentials() -> Credentials {
    Credentials::new(TEST_EMAIL, TEST_PASSWORD)
}

/// 指向模拟站点、延迟极短的配置
pub fn test_settings(site: &FakeSite, output: &std::path::Path) -> Settings {
    let mut settings = Settings::defaults().unwrap();
    settings.auth.landing_url = format!("{}/", site.base_url);
    settings.auth.login_url = format!("{}/login", site.base_url);
    settings.crawl.request_delay_ms = 10;
    settings.crawl.retry_delay_ms = 10;
    settings.crawl.request_timeout_secs = 10;
    settings.io.output_path = output.display().to_string();
    settings
}

pub fn profile_page(name: &str) -> String {
    format!(
        r#"
        <html><body>
            <h1 class="top-card-layout__title">{name}</h1>
            <div class="top-card-layout__summary">Building things at Acme</div>
            <section class="contact-info">
                <a href="https://twitter.com/{name}">Twitter</a>
                <a href="https://blog.example.org/{name}">Blog</a>
                <a href="https://github.com/{name}">GitHub</a>
            </section>
            <ul>
                <li class="experience-item">
                    <span class="experience-item__title">Engineer</span>
                    <span class="experience-item__subtitle">Acme</span>
                </li>
            </ul>
            <ul>
                <li class="education__list-item">
                    <h3 class="education__school-name">State University</h3>
                    <span class="education__item--degree-info">BSc</span>
                </li>
            </ul>
        </body></html>
        "#
    )
}

fn landing_page(with_field: bool) -> String {
    let field = if with_field {
        format!(r#"<input type="hidden" name="csrfToken" value="{}" />"#, LOGIN_TOKEN)
    } else {
        String::new()
    };
    format!(
        r#"<html><body><form action="/login">{}<input name="session_key" /></form></body></html>"#,
        field
    )
}

fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.split(';').any(|pair| pair.trim() == SESSION_COOKIE))
}

async fn login(State(state): State<Arc<SiteState>>, Form(form): Form<HashMap<String, String>>) -> Response {
    state.login_hits.fetch_add(1, Ordering::SeqCst);

    let valid = form.get("session_key").map(String::as_str) == Some(TEST_EMAIL)
        && form.get("session_password").map(String::as_str) == Some(TEST_PASSWORD)
        && form.get("csrfToken").map(String::as_str) == Some(LOGIN_TOKEN)
        && form.get("loginCsrfParam").map(String::as_str) == Some(LOGIN_TOKEN);
    if !valid {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    (
        [(header::SET_COOKIE, format!("{}; Path=/", SESSION_COOKIE))],
        "welcome",
    )
        .into_response()
}

async fn profile(
    State(state): State<Arc<SiteState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let hit = state.record_hit(&id);
    if !has_session(&headers) {
        return StatusCode::from_u16(999).unwrap().into_response();
    }

    match id.as_str() {
        // 前两次被拦截，第三次成功
        "flaky" if hit <= 2 => StatusCode::FORBIDDEN.into_response(),
        "blocked" => StatusCode::FORBIDDEN.into_response(),
        "missing" => StatusCode::NOT_FOUND.into_response(),
        "gone" => StatusCode::GONE.into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            profile_page(&id).into_response()
        }
        _ => (
            [(header::CONTENT_TYPE, "text/html")],
            profile_page(&id),
        )
            .into_response(),
    }
}

/// 启动模拟站点
///
/// * `/` 首页带隐藏令牌字段并设置 JSESSIONID
/// * `/cookie-only` 只通过 JSESSIONID 下发令牌
/// * `/no-token` 不下发令牌
/// * `/login` 校验表单并设置会话 Cookie，`/login-broken` 固定返回 500
/// * `/in/{id}` 资料页，未登录时返回 999
pub async fn start_fake_site() -> FakeSite {
    let state = Arc::new(SiteState::default());
    let token_cookie = format!("JSESSIONID=\"{}\"; Path=/", LOGIN_TOKEN);

    let landing_cookie = token_cookie.clone();
    let app = Router::new()
        .route(
            "/",
            get(move || {
                let cookie = landing_cookie.clone();
                async move { ([(header::SET_COOKIE, cookie)], landing_page(true)) }
            }),
        )
        .route(
            "/cookie-only",
            get(move || {
                let cookie = token_cookie.clone();
                async move { ([(header::SET_COOKIE, cookie)], landing_page(false)) }
            }),
        )
        .route("/no-token", get(|| async { landing_page(false) }))
        .route("/login", post(login))
        .route(
            "/login-broken",
            post(|State(state): State<Arc<SiteState>>| async move {
                state.login_hits.fetch_add(1, Ordering::SeqCst);
                StatusCode::INTERNAL_SERVER_ERROR
            }),
        )
        .route("/in/{id}", get(profile))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeSite {
        base_url: format!("http://{}", addr),
        state,
    }
}
