// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{credentials, start_fake_site, test_settings};
use profile_crawler::config::settings::Credentials;
use profile_crawler::engines::reqwest_engine::ReqwestEngine;
use profile_crawler::engines::session::{AuthError, SessionBootstrapper};
use profile_crawler::engines::traits::ProfileEngine;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_login_with_hidden_field_token() {
    let site = start_fake_site().await;
    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings(&site, &dir.path().join("out.csv"));

    let bootstrapper = SessionBootstrapper::new(&settings.auth, &settings.crawl).unwrap();
    let session = bootstrapper.authenticate(&credentials()).await.unwrap();

    // 会话 Cookie 随后续请求发送
    let response = ReqwestEngine
        .fetch(&session, &site.profile_url("alice"))
        .await
        .unwrap();
    assert_eq!(response.status_code, 200);
    assert!(response.content.contains("alice"));
    assert_eq!(site.state.login_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_login_with_cookie_only_token() {
    let site = start_fake_site().await;
    let dir = tempfile::tempdir().unwrap();
    let mut settings = test_settings(&site, &dir.path().join("out.csv"));
    settings.auth.landing_url = format!("{}/cookie-only", site.base_url);

    let bootstrapper = SessionBootstrapper::new(&settings.auth, &settings.crawl).unwrap();
    let result = bootstrapper.authenticate(&credentials()).await;

    assert!(result.is_ok(), "login failed: {:?}", result.err());
}

#[tokio::test]
async fn test_missing_token_fails_before_login() {
    let site = start_fake_site().await;
    let dir = tempfile::tempdir().unwrap();
    let mut settings = test_settings(&site, &dir.path().join("out.csv"));
    settings.auth.landing_url = format!("{}/no-token", site.base_url);

    let bootstrapper = SessionBootstrapper::new(&settings.auth, &settings.crawl).unwrap();
    let result = bootstrapper.authenticate(&credentials()).await;

    assert!(matches!(result, Err(AuthError::TokenMissing)));
    assert_eq!(site.state.login_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rejected_credentials() {
    let site = start_fake_site().await;
    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings(&site, &dir.path().join("out.csv"));

    let bootstrapper = SessionBootstrapper::new(&settings.auth, &settings.crawl).unwrap();
    let result = bootstrapper
        .authenticate(&Credentials::new("user@example.com", "wrong"))
        .await;

    assert!(matches!(result, Err(AuthError::AuthFailed { status: 401 })));
}

#[tokio::test]
async fn test_server_error_on_login() {
    let site = start_fake_site().await;
    let dir = tempfile::tempdir().unwrap();
    let mut settings = test_settings(&site, &dir.path().join("out.csv"));
    settings.auth.login_url = format!("{}/login-broken", site.base_url);

    let bootstrapper = SessionBootstrapper::new(&settings.auth, &settings.crawl).unwrap();
    let result = bootstrapper.authenticate(&credentials()).await;

    assert!(matches!(result, Err(AuthError::AuthFailed { status: 500 })));
    assert_eq!(site.state.login_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unreachable_landing_page() {
    let dir = tempfile::tempdir().unwrap();
    let site = start_fake_site().await;
    let mut settings = test_settings(&site, &dir.path().join("out.csv"));
    settings.auth.landing_url = "http://127.0.0.1:1/".to_string();

    let bootstrapper = SessionBootstrapper::new(&settings.auth, &settings.crawl).unwrap();
    let result = bootstrapper.authenticate(&credentials()).await;

    assert!(matches!(result, Err(AuthError::Transport(_))));
}
