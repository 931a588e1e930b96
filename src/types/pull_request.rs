use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use entity::pull_request::PrStatus;

/// Reviewer count the service asks the selection engine for.
pub const DEFAULT_REVIEWER_COUNT: usize = 2;

/// A pull request with its current reviewer set.
///
/// `assigned_reviewers` is ordered by user id and never contains the author
/// or the same id twice. Once `status` is `Merged` the set is frozen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
    pub assigned_reviewers: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "mergedAt")]
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    pub fn from_parts(m: entity::pull_request::Model, mut reviewers: Vec<String>) -> Self {
        reviewers.sort();
        reviewers.dedup();
        Self {
            pull_request_id: m.pull_request_id,
            pull_request_name: m.pull_request_name,
            author_id: m.author_id,
            status: m.status,
            assigned_reviewers: reviewers,
            created_at: m.created_at,
            merged_at: m.merged_at,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == PrStatus::Open
    }

    pub fn has_reviewer(&self, user_id: &str) -> bool {
        self.assigned_reviewers.iter().any(|r| r == user_id)
    }

    pub fn short(&self) -> PullRequestShort {
        PullRequestShort {
            pull_request_id: self.pull_request_id.clone(),
            pull_request_name: self.pull_request_name.clone(),
            author_id: self.author_id.clone(),
            status: self.status,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PullRequestShort {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
}

impl From<entity::pull_request::Model> for PullRequestShort {
    fn from(m: entity::pull_request::Model) -> Self {
        Self {
            pull_request_id: m.pull_request_id,
            pull_request_name: m.pull_request_name,
            author_id: m.author_id,
            status: m.status,
        }
    }
}

/// Row to insert when opening a PR; reviewers are passed alongside.
#[derive(Debug, Clone)]
pub struct NewPullRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RPrCreate {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RPrMerge {
    pub pull_request_id: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RPrReassign {
    pub pull_request_id: String,
    pub old_user_id: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PrRes {
    pub pr: PullRequest,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PrReassignRes {
    pub pr: PullRequest,
    pub replaced_by: String,
}
