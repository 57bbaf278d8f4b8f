//! qnet Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use qnet_runtime::prelude::*;
//! ```

// Re-export store and queries
pub use crate::topology_impl::PetTopologyStore;
pub use crate::validator::{is_proposal_valid, EdgeValidator, ProposalCheck};

// Re-export interpretation and scheduling
pub use crate::outcome::{interpret, interpret_operations, ConnectionResult, Operation, OperationStatus};
pub use crate::schedule::{compile, ScheduleCompiler, ScheduleTiming};

// Re-export events and the observable network
pub use crate::events::{EventBus, TopologyEvent, TopologyListener};
pub use crate::network::{Network, NetworkStats};

// Re-export snapshots
pub use crate::snapshot::{
    export_snapshot, import_snapshot, load_snapshot, save_snapshot,
    NetworkSnapshot, SnapshotError,
};

// Re-export backends and the manager
pub use crate::backend::{
    create_backend, BackendConfig, BackendError, BackendResult, DynBackend,
    NetworkBackend, OfflineBackend,
};
pub use crate::manager::{ManagerError, ManagerResult, NetworkManager};

// Re-export HTTP backend when feature is enabled
#[cfg(feature = "http")]
pub use crate::http::HttpBackend;

// Re-export core types
pub use qnet_core::prelude::*;
