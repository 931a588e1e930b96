use tracing::info;

use super::ReviewService;
use crate::types::error::{AppError, Resource};
use crate::types::team::{Team, TeamMember};

impl ReviewService {
    /// Creates the team and upserts its members in one unit of work. A member
    /// id that already belongs to another team is moved here.
    pub async fn create_team(&self, team: Team) -> Result<Team, AppError> {
        let mut tx = self.gateway.begin().await?;
        if tx.team_exists(&team.team_name).await? {
            return Err(AppError::TeamExists);
        }
        tx.create_team(&team.team_name).await?;
        for member in team.member_users() {
            tx.upsert_user(&member).await?;
        }
        tx.commit().await?;

        info!(team = %team.team_name, members = team.members.len(), "team created");
        self.get_team(&team.team_name).await
    }

    pub async fn get_team(&self, team_name: &str) -> Result<Team, AppError> {
        if !self.gateway.team_exists(team_name).await? {
            return Err(AppError::NotFound(Resource::Team));
        }
        let members = self
            .gateway
            .get_team_members(team_name)
            .await?
            .into_iter()
            .map(TeamMember::from)
            .collect();
        Ok(Team {
            team_name: team_name.to_string(),
            members,
        })
    }
}
