//! SPA fallback resolution
//!
//! Decides which path is served for a request: the requested file when it
//! exists under the serving root, the root document otherwise, so client-side
//! routes such as `/dashboard/settings` load the application shell.

use std::path::Path;

/// Root document served for `/` and for every path without a matching file
pub const INDEX_PATH: &str = "/index.html";

/// Resolve the path to serve for `request_path`
///
/// `exists` is asked about `root` joined with the request path (leading
/// slashes stripped). Pass [`file_exists`] for the real filesystem.
///
/// A missing asset such as `/style.cs` resolves to the root document as
/// well, not to a 404.
///
/// # Examples
/// ```
/// use spa_preview::handler::resolve::{resolve_path, INDEX_PATH};
/// use std::path::Path;
///
/// let root = Path::new("/srv/app");
/// assert_eq!(resolve_path("/", root, |_| true), INDEX_PATH);
/// assert_eq!(resolve_path("/app.js", root, |_| true), "/app.js");
/// assert_eq!(resolve_path("/settings", root, |_| false), INDEX_PATH);
/// ```
pub fn resolve_path<'a, F>(request_path: &'a str, root: &Path, exists: F) -> &'a str
where
    F: FnOnce(&Path) -> bool,
{
    if request_path == "/" {
        return INDEX_PATH;
    }

    let candidate = root.join(request_path.trim_start_matches('/'));
    if exists(&candidate) {
        request_path
    } else {
        INDEX_PATH
    }
}

/// Filesystem existence check used in production (blocking)
pub fn file_exists(path: &Path) -> bool {
    path.exists()
}
