use actix_web::{get, web};
use std::sync::Arc;

use crate::service::ReviewService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::{RTeamQuery, Team};

#[get("/get")]
async fn get_team(
    _req: actix_web::HttpRequest,
    service: web::Data<Arc<ReviewService>>,
    query: web::Query<RTeamQuery>,
) -> ApiResult<Team> {
    if query.team_name.is_empty() {
        return Err(AppError::BadRequest("team_name is required".to_string()));
    }
    Ok(ApiResponse::Ok(service.get_team(&query.team_name).await?))
}
