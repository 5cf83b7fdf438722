use std::sync::Arc;

use postboard::{Config, Error, PostStore, Server, api};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let variant = config.posts.variant;
    let store = Arc::new(PostStore::seeded());
    info!(?variant, seeded = store.len(), "starting postboard");

    let app = api::router(variant, store)?;
    Server::bind(config.socket_addr().await?).serve(app).await
}
