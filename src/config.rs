//! Runtime Configuration
//!
//! The host page carries the two values a static-hosted frontend cannot know
//! by itself: the backend base URL (`data-api-base` on `<body>`, same-origin
//! when absent) and the logged-in user (`data-user-id`).

use std::cell::OnceCell;

thread_local! {
    static API_BASE: OnceCell<String> = const { OnceCell::new() };
}

/// Backend base URL, resolved once per page load
pub fn api_base() -> String {
    API_BASE.with(|cell| cell.get_or_init(resolve_api_base).clone())
}

fn resolve_api_base() -> String {
    let attr = body_attribute("data-api-base");
    normalize_base(attr.as_deref().unwrap_or(""))
}

/// Id of the logged-in user, injected by the host page
pub fn current_user_id() -> Option<String> {
    body_attribute("data-user-id").filter(|id| !id.is_empty())
}

fn body_attribute(name: &str) -> Option<String> {
    web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.body())
        .and_then(|body| body.get_attribute(name))
}

/// Trim whitespace and any trailing slash so `{base}{path}` joins cleanly
pub fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(""), "");
        assert_eq!(normalize_base("  "), "");
        assert_eq!(normalize_base("https://api.example.com/"), "https://api.example.com");
        assert_eq!(normalize_base("https://api.example.com"), "https://api.example.com");
    }
}
