use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use std::time::Duration;

mod common;
use common::TestContext;

#[actix_web::test]
async fn test_set_is_active_flow() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;
    ctx.seed_team("backend", &[("u1", true)]).await;

    let req = test::TestRequest::post()
        .uri("/users/setIsActive")
        .set_json(json!({ "user_id": "u1", "is_active": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["user_id"], "u1");
    assert_eq!(body["user"]["team_name"], "backend");
    assert_eq!(body["user"]["is_active"], false);
}

#[actix_web::test]
async fn test_set_is_active_unknown_user() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/users/setIsActive")
        .set_json(json!({ "user_id": "nobody", "is_active": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "user not found");
}

#[actix_web::test]
async fn test_get_review_unknown_user() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/users/getReview?user_id=nobody")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_get_review_lists_newest_first() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;
    ctx.seed_team("backend", &[("u1", true), ("u2", true)]).await;

    ctx.service.create_pr("pr-1", "First", "u1").await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    ctx.service.create_pr("pr-2", "Second", "u1").await.unwrap();

    let req = test::TestRequest::get()
        .uri("/users/getReview?user_id=u2")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], "u2");
    let prs = body["pull_requests"].as_array().unwrap();
    assert_eq!(prs.len(), 2);
    assert_eq!(prs[0]["pull_request_id"], "pr-2");
    assert_eq!(prs[1]["pull_request_id"], "pr-1");
    assert_eq!(prs[0]["status"], "OPEN");
    assert_eq!(prs[0]["author_id"], "u1");

    // the author reviews nothing
    let authored = ctx.service.get_review_assignments("u1").await.unwrap();
    assert!(authored.is_empty());
}

#[actix_web::test]
async fn test_deactivation_keeps_existing_assignments() {
    let ctx = TestContext::new();
    ctx.seed_team("backend", &[("u1", true), ("u2", true)]).await;
    ctx.service.create_pr("pr-1", "First", "u1").await.unwrap();

    let user = ctx.service.set_user_active("u2", false).await.unwrap();
    assert!(!user.is_active);

    assert_eq!(ctx.reviewers_of("pr-1").await, vec!["u2".to_string()]);
    let assigned = ctx.service.get_review_assignments("u2").await.unwrap();
    assert_eq!(assigned.len(), 1);
}
