//! # Hexquiz Common Library
//!
//! Shared code for the hexquiz service including:
//! - Domain models (taxa, observations, quiz setups, overlap verdicts)
//! - Error taxonomy
//! - Configuration loading and root folder resolution

pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
