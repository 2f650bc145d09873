// File: src/assets.rs
// Purpose: Embedded client script for rusty forms

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use maud::{html, Markup};

/// Client runtime: pending UI, WASM validation and focus management
pub const FORMS_JS: &str = include_str!("../public/forms.js");

/// Canonical URL path for the client runtime
pub const FORMS_JS_PATH: &str = "/_rusty-forms/forms.js";

/// FNV-1a digest of the embedded runtime, so a rebuilt script gets a new URL
pub const FORMS_JS_VERSION: u64 = fnv1a(FORMS_JS.as_bytes());

const fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        i += 1;
    }
    hash
}

/// URL prefix the wasm-pack output is served under
pub const WASM_PATH: &str = "/pkg";

/// Serves the embedded client runtime with aggressive caching
pub async fn serve_forms_js() -> Response {
    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/javascript; charset=utf-8",
            ),
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
        ],
        FORMS_JS,
    )
        .into_response()
}

/// Versioned URL of the client runtime; the cache headers mark it immutable
pub fn forms_js_src() -> String {
    format!("{}?v={:016x}", FORMS_JS_PATH, FORMS_JS_VERSION)
}

/// `<script>` tag for the client runtime
pub fn script_tag() -> Markup {
    html! {
        script type="module" src=(forms_js_src()) {}
    }
}
