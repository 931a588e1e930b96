use pr_reviewer::db::DbService;
use pr_reviewer::types::error::AppError;
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

mod common;
use common::TestContext;

struct PostgresContext {
    ctx: TestContext,
    _container: ContainerAsync<Postgres>,
}

impl PostgresContext {
    async fn new() -> PostgresContext {
        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start postgres container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get port");
        let db_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

        let db = DbService::new(&db_url)
            .await
            .expect("Failed to initialize DbService");

        PostgresContext {
            ctx: TestContext::with_gateway(Arc::new(db)),
            _container: container,
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires docker"]
async fn test_row_lock_serialises_reassignments() {
    let pg = PostgresContext::new().await;
    let ctx = &pg.ctx;
    ctx.seed_team(
        "backend",
        &[("u1", true), ("u2", true), ("u3", true), ("u4", true), ("u5", true)],
    )
    .await;
    let pr = ctx.service.create_pr("pr-1", "Hot PR", "u1").await.unwrap();
    let old = pr.assigned_reviewers[0].clone();

    let mut handles = Vec::new();
    for _ in 0..6 {
        let service = Arc::clone(&ctx.service);
        let old = old.clone();
        handles.push(tokio::spawn(async move {
            service.reassign_reviewer("pr-1", &old).await
        }));
    }

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(AppError::NotAssigned) => {}
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
    assert_eq!(succeeded, 1);
    assert_eq!(ctx.reviewers_of("pr-1").await.len(), 2);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_merge_and_statistics_on_postgres() {
    let pg = PostgresContext::new().await;
    let ctx = &pg.ctx;
    ctx.seed_team("backend", &[("u1", true), ("u2", true), ("u3", true)])
        .await;

    ctx.service.create_pr("pr-1", "One", "u1").await.unwrap();
    let first = ctx.service.merge_pr("pr-1").await.unwrap();
    let second = ctx.service.merge_pr("pr-1").await.unwrap();
    assert_eq!(first.merged_at, second.merged_at);

    let stats = ctx.service.get_statistics().await.unwrap();
    assert_eq!(stats.total_prs, 1);
    assert_eq!(stats.assignments_by_user.get("u2"), Some(&1));
    assert_eq!(stats.assignments_by_user.get("u3"), Some(&1));
}
