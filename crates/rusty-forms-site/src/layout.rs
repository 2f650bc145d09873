// File: src/layout.rs
// Purpose: Page shell and example layout

use crate::assets;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #111827; color: #e5e7eb; }
header { display: flex; gap: 1.5rem; padding: 1rem 2rem; background: #1f2937; }
header a { color: #e5e7eb; text-decoration: none; }
main { max-width: 64rem; margin: 0 auto; padding: 2rem; }
pre { background: #0b1020; padding: 1rem; overflow-x: auto; border-radius: .5rem; }
form { display: flex; flex-direction: column; gap: 1rem; }
form label { display: block; margin-bottom: .25rem; }
form input:not([type=checkbox]), form select { width: 100%; padding: .5rem; border-radius: .25rem; border: 1px solid #4b5563; }
[aria-invalid=true] { border-color: #f87171 !important; }
[role=alert] { color: #f87171; }
button[type=submit] { padding: .5rem 1rem; background: #ec4899; color: white; border: 0; border-radius: .25rem; }
button[disabled] { opacity: .5; }
"#;

/// Full HTML page with the client runtime auto-included
///
/// ```rust,ignore
/// let markup = page("Get Started", html! { h1 { "Hello" } });
/// ```
pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | rusty-forms" }
                style { (PreEscaped(STYLES)) }
                (assets::script_tag())
            }
            body {
                header {
                    a href="/" { strong { "rusty-forms" } }
                    a href="/get-started" { "Get Started" }
                    a href="/examples" { "Examples" }
                }
                main { (body) }
            }
        }
    }
}

/// Static parts of an example page
#[derive(Debug, Clone, Copy)]
pub struct ExampleCopy {
    pub title: &'static str,
    pub description: &'static str,
    pub code: &'static str,
}

/// Example page: heading, code sample, live form and the last action payload
pub fn example(copy: &ExampleCopy, form: Markup, action_data: Option<&str>) -> Markup {
    page(
        copy.title,
        html! {
            h1 { (copy.title) }
            p { (copy.description) }
            section data-example {
                pre { code class="language-rust" { (copy.code) } }
                div { (form) }
            }
            @if let Some(data) = action_data {
                div id="action-data" {
                    h3 { "Action data" }
                    pre { (data) }
                }
            }
        },
    )
}
