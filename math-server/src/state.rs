//! Application state

use math_core::{OperationStore, TokenGate};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Append-only operation log
    pub store: Arc<OperationStore>,

    /// Bearer-token gate
    pub gate: Arc<TokenGate>,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state guarded by the built-in token
    pub fn new(store: OperationStore) -> Self {
        Self::with_gate(store, TokenGate::default())
    }

    /// Create application state with a specific gate
    pub fn with_gate(store: OperationStore, gate: TokenGate) -> Self {
        Self {
            store: Arc::new(store),
            gate: Arc::new(gate),
            start_time: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
