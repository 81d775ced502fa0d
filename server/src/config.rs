use std::{env, io, path::PathBuf};

const DEFAULT_MODEL_PATH: &str = "model.safetensors";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

/// Immutable settings of the prediction server, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    model_path: PathBuf,
    host: String,
    port: u16,
}

impl ServerConfig {
    /// Reads `MODEL_PATH`, `HOST` and `PORT` from the process environment.
    ///
    /// # Returns
    /// The configuration, or an `InvalidInput` error if `PORT` is not a valid port number.
    pub fn from_env() -> io::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but reading the variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| {
                io::Error::new(io::ErrorKind::InvalidInput, format!("PORT='{raw}': {e}"))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn model_path(&self) -> &PathBuf {
        &self.model_path
    }

    /// The `host:port` pair to bind to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
