use axum::{
    Router,
    body::Bytes,
    extract::{Extension, Path},
    response::IntoResponse,
    routing::get,
};
use dotenvy::dotenv;
use http::header;
use std::{env, net::SocketAddr, path::PathBuf, sync::Arc};

use mintstash::StorageError;
use mintstash::consts::{DEFAULT_STORAGE_PORT, storage_root};

#[derive(Debug, Clone)]
struct AppConfig {
    storage_root: PathBuf,
    host: String,
    port: u16,
}

impl AppConfig {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            storage_root: env::var("STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| storage_root()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_STORAGE_PORT.to_string())
                .parse()
                .expect("PORT must be a number"),
        }
    }

    fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid host or port")
    }
}

/// Serves the storage root over HTTP so the URIs handed out by the mock
/// driver resolve in a browser or curl while a test run is inspected.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let config = AppConfig::from_env();
    let root = Arc::new(config.storage_root.clone());

    let app = Router::new()
        .route("/", get(health))
        .route("/{space}/{name}", get(get_file))
        .layer(Extension(root));

    let addr = config.socket_addr();
    tracing::info!(
        "Fixture storage server on {} serving {}",
        addr,
        config.storage_root.display()
    );

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn health() -> &'static str {
    "OK\nmintstash fixture storage"
}

async fn get_file(
    Path((space, name)): Path<(String, String)>,
    Extension(root): Extension<Arc<PathBuf>>,
) -> Result<impl IntoResponse, StorageError> {
    // Same rule as storage-space ids; also keeps traversal out of the root.
    for segment in [&space, &name] {
        if !is_plain_segment(segment) {
            return Err(StorageError::InvalidIdentifier(segment.to_string()));
        }
    }

    let path = root.join(&space).join(&name);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| StorageError::NotFound(format!("/{space}/{name}")))?;

    let content_type = if name.ends_with(".json") {
        mime::APPLICATION_JSON
    } else {
        mime::APPLICATION_OCTET_STREAM
    };

    let mut response = Bytes::from(bytes).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, content_type.as_ref().parse().unwrap());

    Ok(response)
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
        && !segment.contains(char::is_whitespace)
}
