use std::sync::Arc;
use tracing::debug;

use super::sampler::Sampler;
use crate::types::user::User;

/// Picks the initial reviewers of a new pull request.
#[derive(Debug, Clone)]
pub struct ReviewerSelector {
    sampler: Arc<Sampler>,
}

impl ReviewerSelector {
    pub fn new(sampler: Arc<Sampler>) -> Self {
        Self { sampler }
    }

    /// Uniformly samples `min(target_count, eligible)` distinct reviewer ids
    /// from `candidate_pool`.
    ///
    /// `exclude_author` is dropped from the pool even when the caller left it
    /// in, and duplicate ids count once. The pool is put in id order before
    /// sampling so the draw never depends on the order rows came back in.
    /// An empty pool yields an empty vec.
    pub fn select(
        &self,
        candidate_pool: &[User],
        exclude_author: &str,
        target_count: usize,
    ) -> Vec<String> {
        let mut eligible: Vec<&str> = candidate_pool
            .iter()
            .map(|u| u.user_id.as_str())
            .filter(|id| *id != exclude_author)
            .collect();
        eligible.sort_unstable();
        eligible.dedup();

        let picked: Vec<String> = self
            .sampler
            .pick_many(&eligible, target_count)
            .into_iter()
            .map(str::to_string)
            .collect();

        debug!(
            author = exclude_author,
            pool = eligible.len(),
            target = target_count,
            picked = ?picked,
            "selected reviewers"
        );
        picked
    }
}
