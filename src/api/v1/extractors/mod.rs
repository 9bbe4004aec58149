/*
 * Responsibility
 * - Types/extractors handlers use to read what the gate resolved
 */
pub mod identity;

pub use identity::{MaybeIdentity, RequestIdentity, RequireIdentity};
