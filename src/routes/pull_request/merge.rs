use actix_web::{post, web};
use std::sync::Arc;

use crate::service::ReviewService;
use crate::types::pull_request::{PrRes, RPrMerge};
use crate::types::response::{ApiResponse, ApiResult};

#[post("/merge")]
async fn merge_pr(
    _req: actix_web::HttpRequest,
    service: web::Data<Arc<ReviewService>>,
    body: web::Json<RPrMerge>,
) -> ApiResult<PrRes> {
    let pr = service.merge_pr(&body.pull_request_id).await?;
    Ok(ApiResponse::Ok(PrRes { pr }))
}
