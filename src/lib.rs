//! spa-preview
//!
//! Local static-file server for previewing single-page applications.
//! Serves the working directory, falls back to `index.html` for unknown
//! paths and allows cross-origin reads of every response.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
