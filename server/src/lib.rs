//! HTTP boundary for the AR idol placement pipeline: axum router, multipart
//! upload handling, idol catalog, and JSON error mapping.

pub mod catalog;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
