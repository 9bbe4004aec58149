/*
 * Responsibility
 * - Request gate for the API: transport check + bearer identity resolution
 * - Library surface used by main.rs and the integration tests
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
