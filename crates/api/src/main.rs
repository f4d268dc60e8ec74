use adminconsole_api::ProxyConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    adminconsole_observability::init();

    let config = ProxyConfig::from_env()?;
    tracing::info!(backend = %config.backend_url, "forwarding to backend");

    let app = adminconsole_api::build_app(config.backend_url);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
