use engine::JsonFileStore;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "convive={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let store = JsonFileStore::new(&settings.server.store_path);
    let engine = engine::Engine::builder().store(store).build();

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting on {addr}");

    server::run_with_listener(engine, listener).await?;
    Ok(())
}
