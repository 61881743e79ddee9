//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, SPA fallback
//! resolution, file serving and the headers every response carries.

use crate::config::AppState;
use crate::handler::{resolve, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::header::{REFERER, USER_AGENT};
use hyper::{HeaderMap, Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _) = req.into_parts();
    let method = &parts.method;
    let uri = &parts.uri;

    let (mut response, served_path) = match check_http_method(method) {
        Some(resp) => (resp, None),
        None => {
            let ctx = RequestContext {
                path: uri.path(),
                query: uri.query(),
                is_head: *method == Method::HEAD,
            };
            route_request(&ctx, &state).await
        }
    };

    http::allow_any_origin(&mut response);
    http::set_server_name(&mut response, &state.config.http.server_name);

    if state.access_log_enabled() {
        let mut entry = AccessLogEntry::new(&peer_addr, method, uri, parts.version);
        entry.served_path = served_path.map(ToString::to_string);
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.referer = header_string(&parts.headers, REFERER);
        entry.user_agent = header_string(&parts.headers, USER_AGENT);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Resolve the SPA fallback and serve the result
///
/// Also returns the rewritten path when the fallback replaced the request path.
async fn route_request<'a>(
    ctx: &RequestContext<'a>,
    state: &AppState,
) -> (Response<Full<Bytes>>, Option<&'a str>) {
    let served = resolve::resolve_path(ctx.path, state.root(), resolve::file_exists);
    let response = static_files::serve_path(ctx, state.root(), served).await;
    let rewritten = (served != ctx.path).then_some(served);
    (response, rewritten)
}

fn header_string(headers: &HeaderMap, name: hyper::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
