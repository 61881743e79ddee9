//! Static file serving module
//!
//! Loads a resolved path from the serving root and turns the outcome into a
//! response. Paths that escape the root are treated as missing.

use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// File served for a directory requested with a trailing slash, falling
/// back to the root copy when the directory has none
const DIRECTORY_INDEX: &str = "index.html";

/// Result of looking a path up under the serving root
#[derive(Debug, PartialEq, Eq)]
pub enum StaticFile {
    Found {
        content: Vec<u8>,
        content_type: &'static str,
    },
    /// A directory was requested without its trailing slash
    DirectoryRedirect,
    NotFound,
    /// The file exists but could not be read
    Unreadable,
}

/// Serve `path` from the serving root
pub async fn serve_path(ctx: &RequestContext<'_>, root: &Path, path: &str) -> Response<Full<Bytes>> {
    match load_from_root(root, path).await {
        StaticFile::Found {
            content,
            content_type,
        } => http::build_file_response(content, content_type, ctx.is_head),
        StaticFile::DirectoryRedirect => {
            let target = match ctx.query {
                Some(q) => format!("{path}/?{q}"),
                None => format!("{path}/"),
            };
            http::build_redirect_response_with_code(&target, 301)
        }
        StaticFile::NotFound => http::build_404_response(),
        StaticFile::Unreadable => http::build_500_response(),
    }
}

/// Load a request path from `root`
pub async fn load_from_root(root: &Path, path: &str) -> StaticFile {
    let relative_path = path.trim_start_matches('/');
    let mut file_path = root.join(relative_path);

    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Serving root not found or inaccessible '{}': {e}",
                root.display()
            ));
            return StaticFile::NotFound;
        }
    };

    if file_path.is_dir() {
        if !path.ends_with('/') {
            return StaticFile::DirectoryRedirect;
        }
        file_path.push(DIRECTORY_INDEX);
        // Directories without their own index get the application shell
        if !file_path.is_file() {
            file_path = root.join(DIRECTORY_INDEX);
        }
    }

    // File not found is common (404), no need to log at warning level
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return StaticFile::NotFound;
    };
    if !file_path_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path_canonical.display()
        ));
        return StaticFile::NotFound;
    }
    if file_path_canonical.is_dir() {
        return StaticFile::NotFound;
    }

    match fs::read(&file_path_canonical).await {
        Ok(content) => StaticFile::Found {
            content,
            content_type: mime::content_type_for(&file_path),
        },
        Err(e) if e.kind() == ErrorKind::NotFound => StaticFile::NotFound,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            StaticFile::Unreadable
        }
    }
}
