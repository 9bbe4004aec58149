/*!
 * Caller identity extractors
 *
 * Responsibility:
 * - Expose the identity resolved by the gate (RequestIdentity) to handlers
 * - axum dependencies stay in core, the context type lives in types
 *
 * Public API:
 * - RequestIdentity
 * - MaybeIdentity
 * - RequireIdentity
 */

mod core;
mod types;

pub use core::{MaybeIdentity, RequireIdentity};
pub use types::RequestIdentity;
