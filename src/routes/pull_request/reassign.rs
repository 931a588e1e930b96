use actix_web::{post, web};
use std::sync::Arc;

use crate::service::ReviewService;
use crate::types::pull_request::{PrReassignRes, RPrReassign};
use crate::types::response::{ApiResponse, ApiResult};

#[post("/reassign")]
async fn reassign(
    _req: actix_web::HttpRequest,
    service: web::Data<Arc<ReviewService>>,
    body: web::Json<RPrReassign>,
) -> ApiResult<PrReassignRes> {
    let (pr, replaced_by) = service
        .reassign_reviewer(&body.pull_request_id, &body.old_user_id)
        .await?;
    Ok(ApiResponse::Ok(PrReassignRes { pr, replaced_by }))
}
