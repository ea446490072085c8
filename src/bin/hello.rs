//! Stateless three-route greeting server.

use axum::{Router, extract::Path, response::Html, routing::get};
use maud::html;
use tower_http::trace::TraceLayer;
use watchlist::config;

fn app() -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/user/{name}", get(user_page))
        .route("/test", get(test_urls))
        .layer(TraceLayer::new_for_http())
}

async fn hello() -> Html<String> {
    Html(
        html! {
            h1 { "Hello Totoro!" }
            img src="https://helloflask.com/totoro.gif" alt="Walking Totoro";
        }
        .into_string(),
    )
}

async fn user_page(Path(name): Path<String>) -> Html<String> {
    Html(html! { "User page: " (name) }.into_string())
}

async fn test_urls() -> &'static str {
    tracing::info!(url = "/", "hello");
    tracing::info!(url = %user_url("greyli"), "user_page");
    tracing::info!(url = %user_url("peter"), "user_page");
    tracing::info!(url = "/test", "test_urls");
    "Test page"
}

fn user_url(name: &str) -> String {
    format!("/user/{}", urlencoding::encode(name))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let addr = config::addr_from_env()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app()).await?;

    Ok(())
}
