//! Orchestration: sequences gateway calls around the selection and
//! reassignment engines. Every state change runs inside one gateway unit of
//! work; the refreshed entity is read back after commit.

mod pull_request;
mod statistics;
mod team;
mod user;

use std::sync::Arc;

use crate::db::Gateway;
use crate::engine::{ReassignmentEngine, ReviewerSelector, Sampler};
use crate::types::pull_request::DEFAULT_REVIEWER_COUNT;

pub struct ReviewService {
    gateway: Arc<dyn Gateway>,
    selector: ReviewerSelector,
    reassigner: ReassignmentEngine,
    reviewers_per_pr: usize,
}

impl ReviewService {
    /// Both engines share `sampler`, so the process draws from one generator.
    pub fn new(gateway: Arc<dyn Gateway>, sampler: Arc<Sampler>) -> Self {
        Self {
            gateway,
            selector: ReviewerSelector::new(Arc::clone(&sampler)),
            reassigner: ReassignmentEngine::new(sampler),
            reviewers_per_pr: DEFAULT_REVIEWER_COUNT,
        }
    }
}
