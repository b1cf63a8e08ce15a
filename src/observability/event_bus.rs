//! Tokio broadcast bus for store change notifications.

use crate::models::StoreEvent;
use tokio::sync::broadcast;

const DEFAULT_CHANGE_BUS_CAPACITY: usize = 64;

/// Broadcast bus carrying [`StoreEvent`]s to subscribers.
///
/// Each store owns its bus; there is no process-wide registry. Publishing
/// with no subscribers is a no-op. A subscriber that falls too far behind
/// observes a lag error from its receiver; that is the subscriber's
/// concern, not the publisher's.
#[derive(Clone)]
pub struct ChangeBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl ChangeBus {
    /// Creates a new bus with the given buffer capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers (best effort).
    pub fn publish(&self, event: StoreEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribes to the bus.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CHANGE_BUS_CAPACITY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{EventMeta, NoteId};

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let bus = ChangeBus::default();
        bus.publish(StoreEvent::NoteCreated {
            meta: EventMeta::new("notes-app-data"),
            note_id: NoteId::new("n1"),
        });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_receives_event() {
        let bus = ChangeBus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(StoreEvent::CollectionReplaced {
            meta: EventMeta::new("notes-app-data"),
            count: 3,
        });

        let event = rx.try_recv().unwrap();
        assert_eq!(event.event_type(), "replaced");
        assert_eq!(event.key(), "notes-app-data");
    }
}
