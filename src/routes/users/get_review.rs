use actix_web::{get, web};
use std::sync::Arc;

use crate::service::ReviewService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RUserQuery, ReviewAssignmentsRes};

#[get("/getReview")]
async fn get_review(
    _req: actix_web::HttpRequest,
    service: web::Data<Arc<ReviewService>>,
    query: web::Query<RUserQuery>,
) -> ApiResult<ReviewAssignmentsRes> {
    if query.user_id.is_empty() {
        return Err(AppError::BadRequest("user_id is required".to_string()));
    }

    let pull_requests = service.get_review_assignments(&query.user_id).await?;
    Ok(ApiResponse::Ok(ReviewAssignmentsRes {
        user_id: query.into_inner().user_id,
        pull_requests,
    }))
}
