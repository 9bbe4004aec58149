/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - gate: GatePolicy, verifier: Arc<dyn TokenVerifier>
 * - Cheap to Clone (Arc inside); no mutable state shared across requests
 */
use std::fmt;
use std::sync::Arc;

use crate::middleware::gate::GatePolicy;
use crate::services::auth::TokenVerifier;

#[derive(Clone)]
pub struct AppState {
    pub gate: GatePolicy,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(gate: GatePolicy, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { gate, verifier }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
