//! ZPGen Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging for the ZPGen workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used across all ZPGen workspace
//! members:
//!
//! - **Error Handling**: The workspace-wide error taxonomy and result type
//! - **Logging**: Configuration and initialization of the tracing subscriber

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{Result, ZpGenError};
