//! HTTP client for the simulator's REST API.
//!
//! Requires the `http` feature. Every call is a single JSON request with
//! no retries; failures surface as [`BackendError`].

use crate::backend::{BackendError, BackendResult, NetworkBackend};
use crate::outcome::ConnectionResult;
use crate::snapshot::NetworkSnapshot;
use async_trait::async_trait;
use qnet_core::types::NodeId;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

/// Simulator address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Backend that talks to a running simulator.
///
/// # Example
///
/// ```rust,ignore
/// use qnet_runtime::http::HttpBackend;
///
/// let backend = HttpBackend::new("http://localhost:5000", 30)?;
/// let result = backend.request_entanglement(&"alice".into(), &"bob".into()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout_secs: u64) -> BackendResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    /// Backend for a simulator on the default local port.
    pub fn localhost() -> BackendResult<Self> {
        Self::new(DEFAULT_BASE_URL, 30)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn map_send_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_connect() {
            BackendError::ConnectionFailed(format!(
                "Cannot connect to simulator at {}. Is it running?",
                self.base_url
            ))
        } else if e.is_timeout() {
            BackendError::Timeout(self.timeout_secs)
        } else {
            BackendError::ConnectionFailed(e.to_string())
        }
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> BackendResult<Value> {
        info!(endpoint = path, "POST to simulator");
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        Self::read_body(response).await
    }

    async fn delete(&self, path: &str) -> BackendResult<Value> {
        info!(endpoint = path, "DELETE to simulator");
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        Self::read_body(response).await
    }

    async fn read_body(response: reqwest::Response) -> BackendResult<Value> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        debug!(bytes = body.len(), "simulator response");
        serde_json::from_str(&body).map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl NetworkBackend for HttpBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn add_endpoint(&self, id: &NodeId) -> BackendResult<()> {
        self.post("add_endpoint", &json!({ "id": id })).await?;
        Ok(())
    }

    async fn add_repeater(&self, id: &NodeId) -> BackendResult<()> {
        self.post("add_repeater", &json!({ "id": id })).await?;
        Ok(())
    }

    async fn add_edge(&self, a: &NodeId, b: &NodeId, cost: f64) -> BackendResult<()> {
        self.post("add_edge", &json!({ "node1": a, "node2": b, "cost": cost }))
            .await?;
        Ok(())
    }

    async fn modify_edge(&self, a: &NodeId, b: &NodeId, new_cost: f64) -> BackendResult<()> {
        self.post(
            "modify_edge",
            &json!({ "node1": a, "node2": b, "new_cost": new_cost }),
        )
        .await?;
        Ok(())
    }

    async fn remove_node(&self, id: &NodeId) -> BackendResult<()> {
        self.post("remove_node", &json!({ "id": id })).await?;
        Ok(())
    }

    async fn remove_edge(&self, a: &NodeId, b: &NodeId) -> BackendResult<()> {
        self.post("remove_edge", &json!({ "node1": a, "node2": b })).await?;
        Ok(())
    }

    async fn request_entanglement(&self, e1: &NodeId, e2: &NodeId) -> BackendResult<ConnectionResult> {
        let value = self
            .post(
                "request_entanglement",
                &json!({ "endpoint1": e1, "endpoint2": e2 }),
            )
            .await?;
        serde_json::from_value(value).map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    async fn clear_network(&self) -> BackendResult<()> {
        self.delete("clear_network").await?;
        Ok(())
    }

    async fn import_network(&self, snapshot: &NetworkSnapshot) -> BackendResult<()> {
        self.post("import_network", snapshot).await?;
        Ok(())
    }

    async fn create_epr(&self, a: &NodeId, b: &NodeId) -> BackendResult<Value> {
        self.post("create_epr", &json!({ "node1": a, "node2": b })).await
    }

    async fn measure(&self, node: &NodeId) -> BackendResult<Value> {
        self.post("measure", &json!({ "node": node })).await
    }

    async fn teleport(&self, sender: &NodeId, receiver: &NodeId) -> BackendResult<Value> {
        self.post("teleport", &json!({ "sender": sender, "receiver": receiver }))
            .await
    }

    async fn superdense_coding(
        &self,
        sender: &NodeId,
        receiver: &NodeId,
        message: &str,
    ) -> BackendResult<Value> {
        self.post(
            "superdense_coding",
            &json!({ "sender": sender, "receiver": receiver, "message": message }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let backend = HttpBackend::new("http://localhost:5000/", 5).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(backend.url("add_edge"), "http://localhost:5000/add_edge");
    }

    #[tokio::test]
    async fn unreachable_simulator_is_a_connection_error() {
        // Port 9 (discard) is not expected to run an HTTP server.
        let backend = HttpBackend::new("http://127.0.0.1:9", 2).unwrap();
        let err = backend.clear_network().await.unwrap_err();
        assert!(matches!(
            err,
            BackendError::ConnectionFailed(_) | BackendError::Timeout(_)
        ));
    }
}
