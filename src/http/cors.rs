//! Response header decoration
//!
//! Headers stamped onto every response after it has been built, whatever
//! its status.

use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, SERVER};
use hyper::Response;

/// Allow cross-origin reads from any origin
pub fn allow_any_origin<B>(response: &mut Response<B>) {
    response
        .headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
}

/// Set the `Server` header, skipped if the configured name is not a valid header value
pub fn set_server_name<B>(response: &mut Response<B>, server_name: &str) {
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(e) => {
            crate::logger::log_warning(&format!("Invalid server name '{server_name}': {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_any_origin_overrides() {
        let mut resp = Response::builder()
            .status(404)
            .header("Access-Control-Allow-Origin", "https://example.com")
            .body(())
            .unwrap();
        allow_any_origin(&mut resp);
        let values: Vec<_> = resp
            .headers()
            .get_all(ACCESS_CONTROL_ALLOW_ORIGIN)
            .iter()
            .collect();
        assert_eq!(values, vec!["*"]);
    }

    #[test]
    fn test_server_name() {
        let mut resp = Response::new(());
        set_server_name(&mut resp, "spa-preview");
        assert_eq!(resp.headers()[SERVER], "spa-preview");

        let mut resp = Response::new(());
        set_server_name(&mut resp, "bad\nname");
        assert!(resp.headers().get(SERVER).is_none());
    }
}
