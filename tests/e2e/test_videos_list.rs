use crate::e2e::helpers;

use helpers::{generate_test_jwt, TestContext};
use hyper::StatusCode;
use serial_test::serial;
use vidgen_backend::domain::video::VideoStatus;

#[tokio::test]
#[serial]
async fn it_should_require_authentication() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/api/generate").await.unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn it_should_paginate_with_metadata() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.fixtures.create_user("pages@example.com").await.unwrap();
    let token = generate_test_jwt(&user.id, &ctx.config.jwt_secret);

    ctx.fixtures
        .create_videos(user.id, 25, VideoStatus::Completed)
        .await
        .unwrap();

    let response = ctx
        .client
        .get_with_auth("/api/generate?page=2&limit=10", &token)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["limit"], 10);
    assert_eq!(body["pagination"]["total"], 25);
    assert_eq!(body["pagination"]["total_pages"], 3);

    // Last page is a partial page
    let last = ctx
        .client
        .get_with_auth("/api/generate?page=3&limit=10", &token)
        .await
        .unwrap();
    assert_eq!(last.body.as_ref().unwrap()["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
#[serial]
async fn it_should_filter_by_status() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.fixtures.create_user("filter@example.com").await.unwrap();
    let token = generate_test_jwt(&user.id, &ctx.config.jwt_secret);

    ctx.fixtures
        .create_videos(user.id, 2, VideoStatus::Completed)
        .await
        .unwrap();
    ctx.fixtures
        .create_videos(user.id, 3, VideoStatus::Failed)
        .await
        .unwrap();

    let response = ctx
        .client
        .get_with_auth("/api/generate?status=FAILED", &token)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["pagination"]["total"], 3);
    for video in body["data"].as_array().unwrap() {
        assert_eq!(video["status"], "FAILED");
    }
}

#[tokio::test]
#[serial]
async fn it_should_only_list_the_callers_videos() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.fixtures.create_user("mine@example.com").await.unwrap();
    let other = ctx.fixtures.create_user("other@example.com").await.unwrap();
    let token = generate_test_jwt(&user.id, &ctx.config.jwt_secret);

    ctx.fixtures
        .create_videos(user.id, 2, VideoStatus::Completed)
        .await
        .unwrap();
    ctx.fixtures
        .create_videos(other.id, 4, VideoStatus::Completed)
        .await
        .unwrap();

    let response = ctx.client.get_with_auth("/api/generate", &token).await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["pagination"]["total"], 2);
}

#[tokio::test]
#[serial]
async fn it_should_return_identical_results_for_identical_queries() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.fixtures.create_user("repeat@example.com").await.unwrap();
    let token = generate_test_jwt(&user.id, &ctx.config.jwt_secret);

    ctx.fixtures
        .create_videos(user.id, 5, VideoStatus::Completed)
        .await
        .unwrap();

    let first = ctx
        .client
        .get_with_auth("/api/generate?page=1&limit=3", &token)
        .await
        .unwrap();
    let second = ctx
        .client
        .get_with_auth("/api/generate?page=1&limit=3", &token)
        .await
        .unwrap();

    assert_eq!(first.body, second.body);
}
