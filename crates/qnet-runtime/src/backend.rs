//! Simulator backend boundary.
//!
//! The quantum network simulator owns the physics; this crate owns the
//! topology view. Every user action that changes the network is mirrored
//! to a [`NetworkBackend`] before it is applied locally.

use crate::outcome::ConnectionResult;
use crate::snapshot::NetworkSnapshot;
use async_trait::async_trait;
use qnet_core::types::{NodeId, NodeKind};
use thiserror::Error;

/// Backend-related errors.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Simulator returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Operation not supported by the {backend} backend: {operation}")]
    Unsupported {
        backend: &'static str,
        operation: &'static str,
    },
}

/// Result type for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

/// The simulator API, one method per endpoint.
#[async_trait]
pub trait NetworkBackend: Send + Sync {
    /// Get the backend name.
    fn name(&self) -> &'static str;

    async fn add_endpoint(&self, id: &NodeId) -> BackendResult<()>;

    async fn add_repeater(&self, id: &NodeId) -> BackendResult<()>;

    async fn add_edge(&self, a: &NodeId, b: &NodeId, cost: f64) -> BackendResult<()>;

    async fn modify_edge(&self, a: &NodeId, b: &NodeId, new_cost: f64) -> BackendResult<()>;

    async fn remove_node(&self, id: &NodeId) -> BackendResult<()>;

    async fn remove_edge(&self, a: &NodeId, b: &NodeId) -> BackendResult<()>;

    /// Ask the simulator to entangle two endpoints and report what happened.
    async fn request_entanglement(&self, e1: &NodeId, e2: &NodeId) -> BackendResult<ConnectionResult>;

    async fn clear_network(&self) -> BackendResult<()>;

    async fn import_network(&self, snapshot: &NetworkSnapshot) -> BackendResult<()>;

    async fn create_epr(&self, a: &NodeId, b: &NodeId) -> BackendResult<serde_json::Value>;

    async fn measure(&self, node: &NodeId) -> BackendResult<serde_json::Value>;

    async fn teleport(&self, sender: &NodeId, receiver: &NodeId) -> BackendResult<serde_json::Value>;

    async fn superdense_coding(
        &self,
        sender: &NodeId,
        receiver: &NodeId,
        message: &str,
    ) -> BackendResult<serde_json::Value>;

    /// Dispatch to the endpoint or repeater call.
    async fn add_node(&self, id: &NodeId, kind: NodeKind) -> BackendResult<()> {
        match kind {
            NodeKind::Endpoint => self.add_endpoint(id).await,
            NodeKind::Repeater => self.add_repeater(id).await,
        }
    }
}

/// Backend selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BackendConfig {
    /// No simulator; topology only.
    #[default]
    Offline,
    /// Simulator REST API. Requires the `http` feature.
    Http { url: String, timeout_secs: u64 },
}

/// Type alias for a boxed backend chosen at runtime.
pub type DynBackend = Box<dyn NetworkBackend>;

/// Create a backend from configuration.
///
/// # Errors
/// Returns an error if the HTTP client cannot be built, or if HTTP was
/// requested in a build without the `http` feature.
pub fn create_backend(config: &BackendConfig) -> BackendResult<DynBackend> {
    match config {
        BackendConfig::Offline => Ok(Box::new(OfflineBackend::new())),

        #[cfg(feature = "http")]
        BackendConfig::Http { url, timeout_secs } => {
            let backend = crate::http::HttpBackend::new(url, *timeout_secs)?;
            Ok(Box::new(backend))
        }

        #[cfg(not(feature = "http"))]
        BackendConfig::Http { .. } => Err(BackendError::Unsupported {
            backend: "http",
            operation: "connect (built without the `http` feature)",
        }),
    }
}

#[async_trait]
impl NetworkBackend for DynBackend {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn add_endpoint(&self, id: &NodeId) -> BackendResult<()> {
        (**self).add_endpoint(id).await
    }

    async fn add_repeater(&self, id: &NodeId) -> BackendResult<()> {
        (**self).add_repeater(id).await
    }

    async fn add_edge(&self, a: &NodeId, b: &NodeId, cost: f64) -> BackendResult<()> {
        (**self).add_edge(a, b, cost).await
    }

    async fn modify_edge(&self, a: &NodeId, b: &NodeId, new_cost: f64) -> BackendResult<()> {
        (**self).modify_edge(a, b, new_cost).await
    }

    async fn remove_node(&self, id: &NodeId) -> BackendResult<()> {
        (**self).remove_node(id).await
    }

    async fn remove_edge(&self, a: &NodeId, b: &NodeId) -> BackendResult<()> {
        (**self).remove_edge(a, b).await
    }

    async fn request_entanglement(&self, e1: &NodeId, e2: &NodeId) -> BackendResult<ConnectionResult> {
        (**self).request_entanglement(e1, e2).await
    }

    async fn clear_network(&self) -> BackendResult<()> {
        (**self).clear_network().await
    }

    async fn import_network(&self, snapshot: &NetworkSnapshot) -> BackendResult<()> {
        (**self).import_network(snapshot).await
    }

    async fn create_epr(&self, a: &NodeId, b: &NodeId) -> BackendResult<serde_json::Value> {
        (**self).create_epr(a, b).await
    }

    async fn measure(&self, node: &NodeId) -> BackendResult<serde_json::Value> {
        (**self).measure(node).await
    }

    async fn teleport(&self, sender: &NodeId, receiver: &NodeId) -> BackendResult<serde_json::Value> {
        (**self).teleport(sender, receiver).await
    }

    async fn superdense_coding(
        &self,
        sender: &NodeId,
        receiver: &NodeId,
        message: &str,
    ) -> BackendResult<serde_json::Value> {
        (**self).superdense_coding(sender, receiver, message).await
    }
}

/// Backend for working without a simulator.
///
/// Topology calls succeed without doing anything. Anything that needs the
/// simulator reports [`BackendError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineBackend;

impl OfflineBackend {
    pub fn new() -> Self {
        Self
    }

    fn unsupported<T>(operation: &'static str) -> BackendResult<T> {
        Err(BackendError::Unsupported {
            backend: "offline",
            operation,
        })
    }
}

#[async_trait]
impl NetworkBackend for OfflineBackend {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn add_endpoint(&self, _id: &NodeId) -> BackendResult<()> {
        Ok(())
    }

    async fn add_repeater(&self, _id: &NodeId) -> BackendResult<()> {
        Ok(())
    }

    async fn add_edge(&self, _a: &NodeId, _b: &NodeId, _cost: f64) -> BackendResult<()> {
        Ok(())
    }

    async fn modify_edge(&self, _a: &NodeId, _b: &NodeId, _new_cost: f64) -> BackendResult<()> {
        Ok(())
    }

    async fn remove_node(&self, _id: &NodeId) -> BackendResult<()> {
        Ok(())
    }

    async fn remove_edge(&self, _a: &NodeId, _b: &NodeId) -> BackendResult<()> {
        Ok(())
    }

    async fn request_entanglement(&self, _e1: &NodeId, _e2: &NodeId) -> BackendResult<ConnectionResult> {
        Self::unsupported("request_entanglement")
    }

    async fn clear_network(&self) -> BackendResult<()> {
        Ok(())
    }

    async fn import_network(&self, _snapshot: &NetworkSnapshot) -> BackendResult<()> {
        Ok(())
    }

    async fn create_epr(&self, _a: &NodeId, _b: &NodeId) -> BackendResult<serde_json::Value> {
        Self::unsupported("create_epr")
    }

    async fn measure(&self, _node: &NodeId) -> BackendResult<serde_json::Value> {
        Self::unsupported("measure")
    }

    async fn teleport(&self, _sender: &NodeId, _receiver: &NodeId) -> BackendResult<serde_json::Value> {
        Self::unsupported("teleport")
    }

    async fn superdense_coding(
        &self,
        _sender: &NodeId,
        _receiver: &NodeId,
        _message: &str,
    ) -> BackendResult<serde_json::Value> {
        Self::unsupported("superdense_coding")
    }
}
