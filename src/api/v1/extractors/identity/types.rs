/*
 * Responsibility
 * - The request-context slot the gate fills for every admitted request
 *
 * Notes
 * - `None` covers every "no identity" case (no header, other scheme, bad/expired token,
 *   verifier timeout). Handlers cannot and should not tell them apart.
 */

use crate::services::auth::IdentityPayload;

/// Identity attached to an admitted request (request extensions).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestIdentity(pub Option<IdentityPayload>);

impl RequestIdentity {
    pub fn payload(&self) -> Option<&IdentityPayload> {
        self.0.as_ref()
    }
}
