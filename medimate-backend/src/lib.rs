//! MediMate backend: medication and medical-note lookups for a chat bot.
//!
//! - [`db`]: SQLite store for medications and notes
//! - [`ingest`]: external feed fetch and normalization
//! - [`lookup`]: substring resolution against the store
//! - [`format`]: reply text rendering
//! - [`commands`]: message classification and dispatch
//! - [`routes`]: HTTP liveness and RPC surface

pub mod commands;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod format;
pub mod ingest;
pub mod lookup;
pub mod routes;
pub mod seed;

pub use config::Config;
pub use context::AppContext;
pub use db::Database;
pub use error::{MedimateError, Result};
