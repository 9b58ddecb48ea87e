//! Execution runtime contract
//!
//! The runtime manages the physical connection behind one logical request.
//! The execution layer only decides *when* to discard, disconnect or reuse;
//! pooling and socket lifecycle belong to the runtime implementation.

/// Capability over the physical connection of the current attempt.
pub trait ExecRuntime: Send {
    /// Whether the connection that produced the last response can carry
    /// another exchange.
    fn is_connection_reusable(&self) -> bool;

    /// Mark the connection unusable; it must not return to any pool.
    ///
    /// Invoked after any failure past the point where a response was
    /// obtained, since the connection state can no longer be trusted.
    fn discard_endpoint(&mut self);

    /// Proactively tear the connection down so the next attempt acquires a
    /// fresh one.
    fn disconnect_endpoint(&mut self);
}
