pub mod config;
pub mod db;
pub mod engine;
pub mod routes;
pub mod service;
pub mod types;
