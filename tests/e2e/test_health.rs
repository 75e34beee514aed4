use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn it_should_report_healthy() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn it_should_report_ready_with_database_connected() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
#[serial]
async fn it_should_attach_a_request_id_to_every_response() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/health").await.unwrap();

    response.assert_header_exists("x-request-id");
    assert!(!response.header("x-request-id").unwrap().is_empty());
}
