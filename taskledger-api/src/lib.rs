//! # TaskLedger API Server Library
//!
//! HTTP surface over the lifecycle services in `taskledger-shared`.
//!
//! ## Modules
//!
//! - `app`: application state and router builder
//! - `config`: configuration from the environment
//! - `error`: error handling and HTTP response mapping
//! - `extract`: caller and JSON body extractors
//! - `middleware`: security headers
//! - `routes`: route handlers
//! - `telemetry`: tracing subscriber setup

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod telemetry;
