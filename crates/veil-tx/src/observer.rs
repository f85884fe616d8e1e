use crate::events::TransactionEvent;

// TRANSACTION OBSERVER
// ================================================================================================

/// An instrumentation hook invoked by the transaction kernel at defined points during execution.
///
/// Observers are notified of event occurrence and order only; event delivery carries no payload
/// and observers cannot influence kernel control flow.
pub trait TransactionObserver {
    /// Called when the kernel reaches the point identified by `event`.
    fn on_event(&mut self, event: TransactionEvent);
}

/// A [TransactionObserver] which discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultObserver;

impl TransactionObserver for DefaultObserver {
    fn on_event(&mut self, _event: TransactionEvent) {}
}
