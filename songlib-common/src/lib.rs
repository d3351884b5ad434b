//! # songlib Common Library
//!
//! Shared code for the song library service:
//! - Song models and database bootstrap
//! - Environment-driven configuration
//! - Verse splitting and pagination
//! - Error types

pub mod config;
pub mod db;
pub mod error;
pub mod verses;

pub use error::{Error, Result};
