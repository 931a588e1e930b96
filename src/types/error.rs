use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::error;

/// What a `NotFound` refers to; only changes the message, the code is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Team,
    User,
    PullRequest,
    Author,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Team => write!(f, "team"),
            Resource::User => write!(f, "user"),
            Resource::PullRequest => write!(f, "PR"),
            Resource::Author => write!(f, "author"),
        }
    }
}

/// Coarse classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidState,
    PreconditionFailed,
    NoEligibleCandidate,
    InvalidRequest,
    Infrastructure,
}

#[derive(Debug, Error)]
pub enum AppError {
    // domain
    #[error("{0} not found")]
    NotFound(Resource),
    #[error("team already exists")]
    TeamExists,
    #[error("PR id already exists")]
    PrExists,
    #[error("cannot reassign on merged PR")]
    PrMerged,
    #[error("reviewer is not assigned to this PR")]
    NotAssigned,
    #[error("no active replacement candidate in team")]
    NoCandidate,

    // adapter
    #[error("invalid request: {0}")]
    BadRequest(String),

    // infra things
    #[error(transparent)]
    Db(DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    // A driver error is always infrastructure. Missing rows come back from the
    // gateway as `None` and are turned into `NotFound` by the caller.
    fn from(e: DbErr) -> Self {
        AppError::Db(e)
    }
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: &'a str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::TeamExists | Self::PrExists => ErrorKind::AlreadyExists,
            Self::PrMerged => ErrorKind::InvalidState,
            Self::NotAssigned => ErrorKind::PreconditionFailed,
            Self::NoCandidate => ErrorKind::NoEligibleCandidate,
            Self::BadRequest(_) => ErrorKind::InvalidRequest,
            Self::Db(_) | Self::Internal(_) => ErrorKind::Infrastructure,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::TeamExists => "TEAM_EXISTS",
            Self::PrExists => "PR_EXISTS",
            Self::PrMerged => "PR_MERGED",
            Self::NotAssigned => "NOT_ASSIGNED",
            Self::NoCandidate => "NO_CANDIDATE",
            Self::BadRequest(_) => "INVALID_REQUEST",
            Self::Db(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to hand to a caller. Infrastructure detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Infrastructure => "internal server error".to_string(),
            ErrorKind::InvalidRequest => match self {
                Self::BadRequest(detail) => detail.clone(),
                _ => self.to_string(),
            },
            _ => self.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::AlreadyExists
            | ErrorKind::InvalidState
            | ErrorKind::PreconditionFailed
            | ErrorKind::NoEligibleCandidate => StatusCode::CONFLICT,
            ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.kind() == ErrorKind::Infrastructure {
            error!(error = %self, "request failed");
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message: self.public_message(),
            },
        })
    }
}
