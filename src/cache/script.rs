//! Browser service worker with the same cache-first semantics as
//! [`MediaCache`](super::MediaCache).

const SW_TEMPLATE: &str = include_str!("../../static/sw.js");

/// Escape a literal for use inside a JavaScript `/.../` regex literal.
fn js_regex_literal(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len() + 2);
    out.push('/');
    for c in literal.chars() {
        if matches!(
            c,
            '\\' | '/' | '^' | '$' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('/');
    out
}

/// Render `sw.js` for a cache generation and the public URL prefix of the
/// optimized tree.
pub fn render_service_worker(generation: &str, url_prefix: &str) -> String {
    // A JSON string is a valid JS string literal.
    let name = serde_json::Value::String(generation.to_string()).to_string();
    SW_TEMPLATE
        .replace("__CACHE_NAME__", &name)
        .replace("__MEDIA_PATTERN__", &js_regex_literal(url_prefix))
}
