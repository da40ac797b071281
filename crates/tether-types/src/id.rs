//! Identifier types for Tether.
//!
//! Identifiers are UUID-based so they stay unique across process
//! boundaries and survive serialization through any transport.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlation token pairing an invocation request with its response.
///
/// Every logical call mints a fresh `InvocationId`; the executor copies
/// it into the response, and the orchestrator uses it, never arrival
/// order, to route the response back to the awaiting caller.
///
/// # Invariants
///
/// - An id is never reused while a call for it is pending.
/// - Ids are opaque: peers must not parse or order them.
///
/// # Serialization
///
/// Serializes transparently as the bare UUID string, which is what the
/// wire messages carry in their `invocationId` field.
///
/// # Example
///
/// ```
/// use tether_types::InvocationId;
///
/// let id = InvocationId::new();
/// println!("Invocation: {}", id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationId(pub Uuid);

#[allow(clippy::new_without_default)] // Default intentionally not implemented - ids are minted by InvocationRequest::new()
impl InvocationId {
    /// Creates a new [`InvocationId`] with a random UUID v4.
    ///
    /// # Example
    ///
    /// ```
    /// use tether_types::InvocationId;
    ///
    /// let id = InvocationId::new();
    /// println!("Invocation ID: {}", id);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

// NOTE: InvocationId intentionally does NOT implement Default.
// Default::default() would mint an id that no pending-call entry knows
// about. Ids are generated by InvocationRequest::new()/try_new().

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "inv:{}", self.0)
    }
}
