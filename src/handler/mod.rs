//! Request handler module
//!
//! Path resolution with SPA fallback, static file serving and the request
//! entry point tying them together.

pub mod resolve;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
