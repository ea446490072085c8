use anyhow::bail;
use watchlist::{AppState, Config, MovieStore, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,watchlist=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None | Some("serve") => serve(config).await,
        Some("forge") => forge(config).await,
        Some("initdb") => initdb(config, args.any(|arg| arg == "--drop")).await,
        Some(other) => bail!("unknown command `{other}`, expected one of: serve, forge, initdb [--drop]"),
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let store = open_store(&config).await?;
    let app = watchlist::router(AppState::new(store, &config.secret_key));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Fills the store with sample data.
async fn forge(config: Config) -> anyhow::Result<()> {
    let store = open_store(&config).await?;
    store.seed().await?;
    println!("Done.");
    Ok(())
}

async fn initdb(config: Config, drop: bool) -> anyhow::Result<()> {
    let store = MovieStore::new(db::connect(&config.database_url).await?);
    if drop {
        db::reset_schema(store.db()).await?;
    }
    store.create_schema().await?;
    println!("Initialized database.");
    Ok(())
}

async fn open_store(config: &Config) -> anyhow::Result<MovieStore> {
    let store = MovieStore::new(db::connect(&config.database_url).await?);
    store.create_schema().await?;
    Ok(store)
}
