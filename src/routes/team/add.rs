use actix_web::{post, web};
use std::sync::Arc;

use crate::service::ReviewService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::{Team, TeamRes};

#[post("/add")]
async fn add_team(
    _req: actix_web::HttpRequest,
    service: web::Data<Arc<ReviewService>>,
    body: web::Json<Team>,
) -> ApiResult<TeamRes> {
    if body.team_name.is_empty() {
        return Err(AppError::BadRequest("team_name is required".to_string()));
    }
    let team = service.create_team(body.into_inner()).await?;
    Ok(ApiResponse::Created(TeamRes { team }))
}
