pub mod api_docs;
pub mod config;
pub mod constants;
pub mod controllers;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod shared_state;
