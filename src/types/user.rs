use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl From<entity::user::Model> for User {
    fn from(m: entity::user::Model) -> Self {
        Self {
            user_id: m.user_id,
            username: m.username,
            team_name: m.team_name,
            is_active: m.is_active,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RSetIsActive {
    pub user_id: String,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RUserQuery {
    #[serde(default)]
    pub user_id: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserRes {
    pub user: User,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ReviewAssignmentsRes {
    pub user_id: String,
    pub pull_requests: Vec<crate::types::pull_request::PullRequestShort>,
}
