//! HTTP protocol layer module
//!
//! Response builders, MIME detection and header decoration, kept apart from
//! the path resolution logic in `handler`.

pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use cors::{allow_any_origin, set_server_name};
pub use response::{
    build_404_response, build_405_response, build_500_response, build_file_response,
    build_options_response, build_redirect_response_with_code,
};
