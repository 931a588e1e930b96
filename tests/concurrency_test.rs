use pr_reviewer::types::error::AppError;
use std::sync::Arc;

mod common;
use common::TestContext;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reassignments_of_same_reviewer() {
    let ctx = TestContext::new();
    ctx.seed_team(
        "backend",
        &[("u1", true), ("u2", true), ("u3", true), ("u4", true), ("u5", true), ("u6", true)],
    )
    .await;
    let pr = ctx.service.create_pr("pr-1", "Hot PR", "u1").await.unwrap();
    let old = pr.assigned_reviewers[0].clone();

    let mut handles = Vec::new();
    for _ in 0..8 {
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

    let reviewers = ctx.reviewers_of("pr-1").await;
    assert_eq!(reviewers.len(), 2);
    assert!(!reviewers.contains(&old));
    assert!(!reviewers.contains(&"u1".to_string()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reassignments_never_grow_the_set() {
    let ctx = TestContext::new();
    ctx.seed_team(
        "backend",
        &[("u1", true), ("u2", true), ("u3", true), ("u4", true), ("u5", true)],
    )
    .await;
    let pr = ctx.service.create_pr("pr-1", "Hot PR", "u1").await.unwrap();

    let mut handles = Vec::new();
    for old in pr.assigned_reviewers.clone() {
        let service = Arc::clone(&ctx.service);
        handles.push(tokio::spawn(async move {
            service.reassign_reviewer("pr-1", &old).await
        }));
    }
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) | Err(AppError::NoCandidate) | Err(AppError::NotAssigned) => {}
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    let reviewers = ctx.reviewers_of("pr-1").await;
    assert_eq!(reviewers.len(), 2);
    assert!(!reviewers.contains(&"u1".to_string()));
}

#[tokio::test]
async fn test_concurrent_team_creation_has_one_winner() {
    let ctx = TestContext::new();

    let first = {
        let service = Arc::clone(&ctx.service);
        tokio::spawn(async move {
            service
                .create_team(common::test_data::team("race", &[("r1", true)]))
                .await
        })
    };
    let second = {
        let service = Arc::clone(&ctx.service);
        tokio::spawn(async move {
            service
                .create_team(common::test_data::team("race", &[("r2", true)]))
                .await
        })
    };

    let results = [first.await.unwrap(), second.await.unwrap()];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(AppError::TeamExists))));
}
