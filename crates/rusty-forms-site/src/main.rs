use anyhow::Context;
use rusty_forms_site::{app, Config};
use tower_livereload::LiveReloadLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load_default()
        .context("Failed to load rusty-forms.toml")?
        .with_env_overrides();

    info!(
        name = %config.project.name,
        version = %config.project.version,
        wasm_dir = %config.assets.wasm_dir,
        "rusty-forms site starting"
    );

    let app = app(&config)?;

    let app = if config.dev.hot_reload {
        info!("hot reload: enabled");
        app.layer(LiveReloadLayer::new())
    } else {
        app
    };

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
