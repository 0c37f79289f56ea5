// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::setup_db;
use harvestrs::application::use_cases::fetch_batch::FetchBatchUseCase;
use harvestrs::domain::models::outcome::Stage;
use harvestrs::engines::reqwest_engine::ReqwestFetcher;
use harvestrs::infrastructure::repositories::url_response_repo_impl::UrlResponseRepositoryImpl;
use harvestrs::workers::DispatchOptions;
use sea_orm::Database;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

/// 测试真实的抓取和持久化
///
/// 通过 HTTP 抓取并写入 SQLite，失败的URL不会留下记录
#[tokio::test]
async fn test_batch_fetches_over_http_and_persists() {
    let server = MockServer::start().await;
    mount(&server, "/a", ResponseTemplate::new(200).set_body_string("A")).await;
    mount(&server, "/b", ResponseTemplate::new(200).set_body_string("B")).await;
    mount(&server, "/missing", ResponseTemplate::new(404).set_body_string("nope")).await;

    let db = setup_db().await;
    let repository = Arc::new(UrlResponseRepositoryImpl::new(db.clone()));
    let fetcher = Arc::new(ReqwestFetcher::new(Duration::from_secs(10), "harvestrs-test").unwrap());
    let use_case = FetchBatchUseCase::new(fetcher, repository.clone(), DispatchOptions::default());

    let a = format!("{}/a", server.uri());
    let b = format!("{}/b", server.uri());
    let missing = format!("{}/missing", server.uri());

    let report = use_case
        .execute(&[a.clone(), b.clone(), missing.clone()])
        .await
        .unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failures()[0].url, missing);
    assert_eq!(report.failures()[0].stage, Stage::Fetch);
    assert_eq!(report.failures()[0].cause, "unexpected HTTP status 404");

    assert_eq!(repository.find_by_url(&a).await.unwrap()[0].response, b"A".to_vec());
    assert_eq!(repository.find_by_url(&b).await.unwrap()[0].response, b"B".to_vec());
    assert!(repository.find_by_url(&missing).await.unwrap().is_empty());
    assert_eq!(repository.count().await.unwrap(), 2);
}

/// 测试超时与格式错误的URL
///
/// 超时记为 "timeout"，格式错误的URL不发出请求
#[tokio::test]
async fn test_timeout_and_malformed_urls() {
    let server = MockServer::start().await;
    mount(&server, "/a", ResponseTemplate::new(200).set_body_string("A")).await;
    mount(
        &server,
        "/slow",
        ResponseTemplate::new(200)
            .set_body_string("late")
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let db = setup_db().await;
    let repository = Arc::new(UrlResponseRepositoryImpl::new(db));
    let fetcher =
        Arc::new(ReqwestFetcher::new(Duration::from_millis(300), "harvestrs-test").unwrap());
    let use_case = FetchBatchUseCase::new(fetcher, repository.clone(), DispatchOptions::default());

    let slow = format!("{}/slow", server.uri());
    let report = use_case
        .execute(&[format!("{}/a", server.uri()), slow.clone(), "not a url".to_string()])
        .await
        .unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 2);

    let timeout = report.failures().iter().find(|f| f.url == slow).unwrap();
    assert_eq!(timeout.stage, Stage::Fetch);
    assert_eq!(timeout.cause, "timeout");

    let malformed = report.failures().iter().find(|f| f.url == "not a url").unwrap();
    assert_eq!(malformed.stage, Stage::Fetch);
    assert!(malformed.cause.starts_with("network error: invalid url"));
}

/// 测试存储不可用
///
/// 表不存在时每个抓取成功的URL都记为 persist 阶段失败
#[tokio::test]
async fn test_unmigrated_store_reports_persist_failures() {
    let server = MockServer::start().await;
    mount(&server, "/c", ResponseTemplate::new(200).set_body_string("C")).await;

    let db = Arc::new(Database::connect("sqlite::memory:").await.unwrap());
    let repository = Arc::new(UrlResponseRepositoryImpl::new(db));
    let fetcher = Arc::new(ReqwestFetcher::new(Duration::from_secs(10), "harvestrs-test").unwrap());
    let use_case = FetchBatchUseCase::new(fetcher, repository, DispatchOptions::default());

    let c = format!("{}/c", server.uri());
    let report = use_case.execute(&[c.clone()]).await.unwrap();

    assert_eq!(report.succeeded(), 0);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failures()[0].url, c);
    assert_eq!(report.failures()[0].stage, Stage::Persist);
    assert!(report.failures()[0].cause.starts_with("write failure"));
}

/// 测试并发写入同一个连接池
///
/// 有并发上限的大批次全部写入成功，记录数与输入一致
#[tokio::test]
async fn test_concurrent_writes_through_shared_pool() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("payload"))
        .mount(&server)
        .await;

    let db = setup_db().await;
    let repository = Arc::new(UrlResponseRepositoryImpl::new(db));
    let fetcher = Arc::new(ReqwestFetcher::new(Duration::from_secs(10), "harvestrs-test").unwrap());
    let use_case = FetchBatchUseCase::new(
        fetcher,
        repository.clone(),
        DispatchOptions {
            max_concurrency: Some(8),
            deadline: None,
        },
    );

    // Duplicates included on purpose
    let batch: Vec<String> = (0..40)
        .map(|i| format!("{}/item/{}", server.uri(), i % 30))
        .collect();
    let report = use_case.execute(&batch).await.unwrap();

    assert_eq!(report.succeeded(), 40);
    assert_eq!(repository.count().await.unwrap(), 40);
    assert_eq!(
        repository
            .find_by_url(&format!("{}/item/0", server.uri()))
            .await
            .unwrap()
            .len(),
        2
    );
}
