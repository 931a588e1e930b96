use serde::{Deserialize, Serialize};

use crate::types::user::User;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

impl From<User> for TeamMember {
    fn from(u: User) -> Self {
        Self {
            user_id: u.user_id,
            username: u.username,
            is_active: u.is_active,
        }
    }
}

/// A team and its members. Membership lives on the user rows, this is the
/// read-side view of "users whose team is `team_name`".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

impl Team {
    /// Member rows to upsert, each scoped to this team.
    pub fn member_users(&self) -> Vec<User> {
        self.members
            .iter()
            .map(|m| User {
                user_id: m.user_id.clone(),
                username: m.username.clone(),
                team_name: self.team_name.clone(),
                is_active: m.is_active,
            })
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RTeamQuery {
    #[serde(default)]
    pub team_name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TeamRes {
    pub team: Team,
}
