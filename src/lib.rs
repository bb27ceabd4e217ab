pub mod config;
pub mod gemini;
pub mod models;
pub mod prompt;
pub mod render;
pub mod routes;
pub mod schema;
pub mod state;
