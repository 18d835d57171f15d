//! Cache-control policy for the static build.

use axum::{
    body::Body,
    http::{HeaderValue, Request, header},
    middleware::Next,
    response::Response,
};

const REVALIDATE_HTML: &str = "no-cache, must-revalidate";
const IMMUTABLE: &str = "public, max-age=31536000, immutable";
const REVALIDATE_ASSET: &str = "public, max-age=0, must-revalidate";

/// Pick the cache-control value for a request path
pub fn policy_for(path: &str) -> &'static str {
    if path == "/" || path.ends_with(".html") {
        REVALIDATE_HTML
    } else if is_fingerprinted_asset(path) {
        IMMUTABLE
    } else {
        REVALIDATE_ASSET
    }
}

/// Middleware: stamp every response with the policy for its path
pub async fn cache_control(req: Request<Body>, next: Next) -> Response {
    let policy = policy_for(req.uri().path());
    let mut res = next.run(req).await;

    res.headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static(policy));
    res
}

/// "pixel_field.<hash>.wasm" style names: a hex segment of 8+ chars between name and extension
fn is_fingerprinted_asset(path: &str) -> bool {
    let file = path.rsplit('/').next().unwrap_or(path);
    let parts: Vec<&str> = file.split('.').collect();

    if parts.len() < 3 {
        return false;
    }

    parts[1..parts.len() - 1]
        .iter()
        .any(|seg| seg.len() >= 8 && seg.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_always_revalidates() {
        assert_eq!(policy_for("/"), REVALIDATE_HTML);
        assert_eq!(policy_for("/index.html"), REVALIDATE_HTML);
    }

    #[test]
    fn test_fingerprinted_assets_are_immutable() {
        assert_eq!(policy_for("/pixel_field.3f9a2c1d.wasm"), IMMUTABLE);
        assert_eq!(policy_for("/assets/app.0123abcd.min.js"), IMMUTABLE);
    }

    #[test]
    fn test_plain_assets_revalidate() {
        assert_eq!(policy_for("/pixel_field.wasm"), REVALIDATE_ASSET);
        assert_eq!(policy_for("/pixel_field.bg.wasm"), REVALIDATE_ASSET);
        assert_eq!(policy_for("/style.abc.css"), REVALIDATE_ASSET);
    }
}
