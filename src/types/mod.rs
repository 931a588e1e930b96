pub mod error;
pub mod pull_request;
pub mod response;
pub mod stats;
pub mod team;
pub mod user;
