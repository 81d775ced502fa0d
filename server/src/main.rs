use std::{future, io};

use log::{error, info};
use machine_learning::LogisticRegression;
use tokio::{net::TcpListener, signal};

use server::ServerConfig;

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;

    let model = LogisticRegression::load(config.model_path()).inspect_err(|e| {
        error!(
            "failed to load the model at {}: {e}",
            config.model_path().display()
        )
    })?;
    info!(
        "loaded model from {} ({} features)",
        config.model_path().display(),
        model.n_features()
    );

    let listener = TcpListener::bind(config.addr()).await?;
    info!("listening at http://{}", listener.local_addr()?);

    server::run(listener, model, shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {e}");
        future::pending::<()>().await;
    }

    info!("received SIGINT, shutting down");
}
