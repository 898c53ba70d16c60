pub mod ai;
pub mod app_state;
pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod services;
pub mod utils;
pub mod workflow;
