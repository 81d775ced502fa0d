//! Helpers to run the real server on an ephemeral port.

use std::{future, net::SocketAddr, time::Duration};

use machine_learning::LogisticRegression;
use ndarray::Array1;
use reqwest::Client;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const N_FEATURES: usize = 30;

/// The valid request body of the reference client.
pub fn sample_features() -> Vec<Value> {
    [
        14.2, 20.3, 92.4, 600.5, 0.1, 0.2, 0.3, 0.1, 0.2, 0.05, 0.3, 1.0, 2.0, 30.0, 0.01, 0.1,
        0.05, 0.01, 0.05, 0.01, 15.0, 25.0, 100.0, 700.0, 0.12, 0.4, 0.6, 0.2, 0.3, 0.08,
    ]
    .into_iter()
    .map(|x| json!(x))
    .collect()
}

/// Labels samples benign (`1`) when their first feature is below 15.
pub fn threshold_model() -> LogisticRegression {
    let mut coef = Array1::zeros(N_FEATURES);
    coef[0] = -1.0;
    LogisticRegression::new(coef, 15.0, [0, 1])
}

pub struct TestServer {
    addr: SocketAddr,
    client: Client,
    _dir: TempDir,
}

impl TestServer {
    /// Writes `model` to disk, loads it back and serves it on `127.0.0.1:0`.
    pub async fn spawn(model: LogisticRegression) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.safetensors");
        model.save(&path).unwrap();
        let model = LogisticRegression::load(&path).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(server::run(listener, model, future::pending()));

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        Self {
            addr,
            client,
            _dir: dir,
        }
    }

    pub async fn get(&self, path: &str) -> (u16, Value) {
        let res = self
            .client
            .get(format!("http://{}{path}", self.addr))
            .send()
            .await
            .unwrap();
        let status = res.status().as_u16();
        (status, res.json().await.unwrap())
    }

    pub async fn predict(&self, body: &Value) -> (u16, Value) {
        self.predict_raw(body.to_string()).await
    }

    pub async fn predict_raw(&self, body: String) -> (u16, Value) {
        let res = self
            .client
            .post(format!("http://{}/predict", self.addr))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        let status = res.status().as_u16();
        (status, res.json().await.unwrap())
    }
}
