// File: src/pages/home.rs
// Purpose: Landing page, get started, examples list, success and 404

use super::{Example, Signup};
use crate::layout::{page, ExampleCopy};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use maud::{html, Markup};
use rusty_forms::{FormAction, FormSchema};

const INDEX_CODE: &str = r#"use rusty_forms::{Form, FormAction, FormSchema, SubmissionRequest};

#[derive(FormSchema)]
#[rename_all("camelCase")]
struct Signup {
    first_name: String,
    #[email]
    email: String,
    #[enum_values("fromAFriend", "google")]
    how_you_found_out_about_us: String,
}

let action = FormAction::new(Signup::schema()).success_target("/success");

// POST
let result = action
    .submit(SubmissionRequest::new(raw), |values, _env| async move {
        tracing::info!(?values, "signed up");
        Ok(None)
    })
    .await;

// GET, or POST with errors
Form::new(action.schema()).result(Some(&result)).render()"#;

const GET_STARTED_CODE: &str = r#"use maud::html;
use rusty_forms::{Form, SchemaDescriptor};

pub fn form(schema: &SchemaDescriptor) -> Form<'_> {
    Form::new(schema)
        .label(|field| html! {
            label.my-label id=(field.label_id()) for=(field.name()) { (field.template.label) }
        })
        .button(|button| html! {
            button.my-button type="submit" { (button.label) }
        })
        .global_errors(|errors| html! {
            @if !errors.is_empty() {
                div.my-errors role="alert" data-global-errors {
                    @for error in errors { p { (error) } }
                }
            }
        })
}"#;

const FEATURES: [(&str, &str); 6] = [
    (
        "100% customizable UI",
        "Replace the label, input, errors or button slot and keep the default markup for everything else.",
    ),
    (
        "Single source of truth",
        "Write your schema once and derive the form, the client checks and the server checks from it.",
    ),
    (
        "Type-safe",
        "Derive the schema from a struct and read validated values back into it.",
    ),
    (
        "Server-side validation",
        "The server always re-validates, so forms keep working with JavaScript disabled.",
    ),
    (
        "Client-side validation",
        "The same validator compiled to WebAssembly runs before the request leaves the browser.",
    ),
    (
        "Focus management",
        "The first invalid field is focused after every failed submission.",
    ),
];

fn hero(copy: &ExampleCopy, form: Markup, action_data: Option<&str>) -> Markup {
    page(
        copy.title,
        html! {
            h1 { (copy.title) }
            section data-example {
                pre { code class="language-rust" { (copy.code) } }
                div {
                    h3 { "This tiny code creates the form below" }
                    h2 { (copy.description) }
                    (form)
                    h4 { "(Go ahead, try it with JS disabled as well)" }
                }
            }
            @if let Some(data) = action_data {
                div id="action-data" {
                    pre { (data) }
                }
            }
            dl {
                @for (title, text) in FEATURES {
                    dt { (title) }
                    dd { (text) }
                }
            }
        },
    )
}

pub fn index() -> anyhow::Result<Example> {
    let copy = ExampleCopy {
        title: "Magically create forms + actions in Rust",
        description: "All type-safe, with client-side + server-side validations, pending UI, and focus management",
        code: INDEX_CODE,
    };
    let action = FormAction::new(Signup::schema()).success_target("/success");
    Ok(Example::new("/", copy, action).layout(hero))
}

pub async fn get_started() -> Html<String> {
    let markup = page(
        "Get Started",
        html! {
            h1 { "Get Started" }
            h2 { "Dependencies" }
            p {
                "Make sure you have " a href="https://github.com/tokio-rs/axum" { "axum" }
                " (or any framework that hands you the request body) and "
                a href="https://maud.lambda.xyz" { "maud" } " in your project."
            }
            h2 { "Installation" }
            pre { "cargo add rusty-forms" }
            h2 { "Basic styles" }
            p {
                "rusty-forms doesn't ship any styles, so you need to configure basic styles for your forms. "
                "Let's create a custom " em { "form" } " function for your project:"
            }
            pre { code class="language-rust" { (GET_STARTED_CODE) } }
            p { "From now on, use your " em { "form" } " function instead of " code { "Form::new" } "." }
            p { "PS: you don't need to customize everything. We'll use standard html tags if you don't." }
        },
    );
    Html(markup.into_string())
}

pub async fn examples(State(state): State<AppState>) -> Html<String> {
    let sections = ["actions", "forms", "schemas"];
    let markup = page(
        "Examples",
        html! {
            h1 { "Examples" }
            @for section in sections {
                h2 { (rusty_forms::start_case(section)) }
                ul {
                    @for example in state.examples().filter(|e| e.section() == Some(section)) {
                        li {
                            a href=(example.path) { (example.copy.title) }
                            " " small { (example.copy.description) }
                        }
                    }
                }
            }
        },
    );
    Html(markup.into_string())
}

pub async fn success() -> Html<String> {
    let markup = page(
        "Success",
        html! {
            h1 { "Form submitted successfully" }
            p { a href="/" { "Back to the form" } }
        },
    );
    Html(markup.into_string())
}

pub async fn not_found() -> impl IntoResponse {
    let markup = page(
        "Not found",
        html! {
            h1 { "404" }
            p { "There's nothing here. Try the " a href="/examples" { "examples" } "." }
        },
    );
    (StatusCode::NOT_FOUND, Html(markup.into_string()))
}
