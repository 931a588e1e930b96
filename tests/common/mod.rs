use actix_web::{web, App};
use pr_reviewer::db::{Gateway, InMemoryGateway};
use pr_reviewer::engine::Sampler;
use pr_reviewer::service::ReviewService;
use pr_reviewer::types::team::Team;
use std::sync::Arc;

pub struct TestContext {
    pub gateway: Arc<dyn Gateway>,
    pub service: Arc<ReviewService>,
}

impl TestContext {
    /// In-memory store with a fixed sampler seed.
    pub fn new() -> TestContext {
        Self::with_gateway(Arc::new(InMemoryGateway::new()))
    }

    pub fn with_gateway(gateway: Arc<dyn Gateway>) -> TestContext {
        let sampler = Arc::new(Sampler::seeded(42));
        let service = Arc::new(ReviewService::new(Arc::clone(&gateway), sampler));
        TestContext { gateway, service }
    }

    #[allow(dead_code)]
    pub fn create_app(
        &self,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.service)))
            .configure(pr_reviewer::routes::configure_routes)
    }

    #[allow(dead_code)]
    pub async fn seed_team(&self, team_name: &str, members: &[(&str, bool)]) -> Team {
        self.service
            .create_team(test_data::team(team_name, members))
            .await
            .expect("Failed to seed team")
    }

    /// Current reviewer set straight from the gateway.
    #[allow(dead_code)]
    pub async fn reviewers_of(&self, pr_id: &str) -> Vec<String> {
        self.gateway
            .get_pr(pr_id)
            .await
            .expect("Failed to read PR")
            .expect("PR missing")
            .assigned_reviewers
    }
}

// Test data helpers
#[allow(dead_code)]
pub mod test_data {
    use pr_reviewer::types::team::{Team, TeamMember};
    use serde_json::{json, Value};

    pub fn member(user_id: &str, is_active: bool) -> TeamMember {
        TeamMember {
            user_id: user_id.to_string(),
            username: format!("User {}", user_id),
            is_active,
        }
    }

    pub fn team(team_name: &str, members: &[(&str, bool)]) -> Team {
        Team {
            team_name: team_name.to_string(),
            members: members.iter().map(|(id, active)| member(id, *active)).collect(),
        }
    }

    pub fn pr_create(pr_id: &str, author_id: &str) -> Value {
        json!({
            "pull_request_id": pr_id,
            "pull_request_name": format!("Change {}", pr_id),
            "author_id": author_id,
        })
    }
}
