use tariffwatch_api::{ApiConfig, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tariffwatch_observability::init();

    let config = ApiConfig::from_env();
    let state = app::AppState::from_config(&config)?;
    let router = app::build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
