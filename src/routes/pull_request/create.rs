use actix_web::{post, web};
use std::sync::Arc;

use crate::service::ReviewService;
use crate::types::error::AppError;
use crate::types::pull_request::{PrRes, RPrCreate};
use crate::types::response::{ApiResponse, ApiResult};

#[post("/create")]
async fn create_pr(
    _req: actix_web::HttpRequest,
    service: web::Data<Arc<ReviewService>>,
    body: web::Json<RPrCreate>,
) -> ApiResult<PrRes> {
    if body.pull_request_id.is_empty() || body.author_id.is_empty() {
        return Err(AppError::BadRequest(
            "pull_request_id and author_id are required".to_string(),
        ));
    }
    let pr = service
        .create_pr(&body.pull_request_id, &body.pull_request_name, &body.author_id)
        .await?;
    Ok(ApiResponse::Created(PrRes { pr }))
}
