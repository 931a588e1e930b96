use actix_web::{post, web};
use std::sync::Arc;

use crate::service::ReviewService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RSetIsActive, UserRes};

#[post("/setIsActive")]
async fn set_is_active(
    _req: actix_web::HttpRequest,
    service: web::Data<Arc<ReviewService>>,
    body: web::Json<RSetIsActive>,
) -> ApiResult<UserRes> {
    let user = service.set_user_active(&body.user_id, body.is_active).await?;
    Ok(ApiResponse::Ok(UserRes { user }))
}
