use actix_web::{get, web};
use std::sync::Arc;

use crate::service::ReviewService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::stats::Statistics;

#[get("")]
async fn statistics(
    _req: actix_web::HttpRequest,
    service: web::Data<Arc<ReviewService>>,
) -> ApiResult<Statistics> {
    Ok(ApiResponse::Ok(service.get_statistics().await?))
}
