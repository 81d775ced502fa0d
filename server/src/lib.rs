pub mod api;
pub mod config;
pub mod error;
pub mod features;

use std::{future::Future, io};

use machine_learning::LogisticRegression;
use tokio::net::TcpListener;

pub use api::{AppState, router};
pub use config::ServerConfig;
pub use error::ApiErr;

/// Serves predictions of `model` on `listener` until `shutdown` completes.
///
/// # Arguments
/// * `listener` - An already bound listener.
/// * `model` - The model every prediction is made with.
/// * `shutdown` - Resolves when the server should stop accepting connections.
///
/// # Returns
/// An io error if serving fails.
pub async fn run<F>(listener: TcpListener, model: LogisticRegression, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(AppState::new(model));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
