use actix_web::{body::BoxBody, http::StatusCode, HttpRequest, HttpResponse, Responder};
use serde::Serialize;

use crate::types::error::AppError;

/// Successful JSON reply. Failures go through `AppError`'s `ResponseError`.
pub enum ApiResponse<T> {
    Ok(T),
    Created(T),
}

impl<T> ApiResponse<T> {
    fn status(&self) -> StatusCode {
        match self {
            ApiResponse::Ok(_) => StatusCode::OK,
            ApiResponse::Created(_) => StatusCode::CREATED,
        }
    }
}

impl<T: Serialize> Responder for ApiResponse<T> {
    type Body = BoxBody;

    fn respond_to(self, _: &HttpRequest) -> HttpResponse {
        let status = self.status();
        let body = match self {
            ApiResponse::Ok(v) | ApiResponse::Created(v) => v,
        };
        HttpResponse::build(status).json(body)
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;
