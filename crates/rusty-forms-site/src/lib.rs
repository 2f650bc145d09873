//! # rusty-forms-site
//!
//! Documentation site for rusty-forms: every example page renders a live
//! form and handles its own submissions.
//!
//! ```rust,ignore
//! let config = Config::load_default()?.with_env_overrides();
//! let app = rusty_forms_site::app(&config)?;
//! axum::serve(listener, app).await?;
//! ```

pub mod assets;
pub mod config;
pub mod layout;
pub mod pages;
pub mod request;
pub mod response;

pub use config::Config;

use axum::{routing::get, Router};
use pages::Example;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    examples: Arc<Vec<Example>>,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            examples: Arc::new(pages::catalogue()?),
        })
    }

    pub fn example(&self, path: &str) -> Option<&Example> {
        self.examples.iter().find(|e| e.path == path)
    }

    pub fn examples(&self) -> impl Iterator<Item = &Example> {
        self.examples.iter()
    }
}

/// Build the router: example pages, static pages, client assets
pub fn app(config: &Config) -> anyhow::Result<Router> {
    let state = AppState::new()?;

    let mut router = Router::new()
        .route("/get-started", get(pages::home::get_started))
        .route("/examples", get(pages::home::examples))
        .route("/success", get(pages::home::success))
        .route(assets::FORMS_JS_PATH, get(assets::serve_forms_js));

    for example in state.examples() {
        router = router.route(
            example.path,
            get(pages::show_example).post(pages::submit_example),
        );
    }

    Ok(router
        .nest_service(assets::WASM_PATH, ServeDir::new(&config.assets.wasm_dir))
        .fallback(pages::home::not_found)
        .with_state(state))
}
