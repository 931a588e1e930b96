use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

mod common;
use common::TestContext;

#[actix_web::test]
async fn test_health_flow() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_statistics_on_empty_store() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get().uri("/statistics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "total_prs": 0, "assignments_by_user": {} }));
}

#[actix_web::test]
async fn test_statistics_count_current_edges() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;
    ctx.seed_team("backend", &[("u1", true), ("u2", true), ("u3", true)]).await;
    ctx.seed_team("solo", &[("s1", true)]).await;

    ctx.service.create_pr("pr-1", "One", "u1").await.unwrap();
    ctx.service.create_pr("pr-2", "Two", "u1").await.unwrap();
    ctx.service.create_pr("pr-3", "Three", "s1").await.unwrap();
    ctx.service.merge_pr("pr-2").await.unwrap();

    let req = test::TestRequest::get().uri("/statistics").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["total_prs"], 3);
    assert_eq!(body["assignments_by_user"], json!({ "u2": 2, "u3": 2 }));
}
