//! # Tile Events
//!
//! Notifications from the edit path to outside collaborators (audio,
//! replication, UI).
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │ WorldSession│─────>│   Event     │─────>│  Consumer   │
//! │  (edits)    │      │   Channel   │      │  (poll)     │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! Sending never blocks the edit path. A full channel drops the event.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tessera_world::TileType;

/// Default channel capacity.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Something changed in a live world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileEvent {
    /// A tile was mined out.
    TileMined {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
        /// Material that was removed.
        kind: TileType,
    },

    /// A tile was placed.
    TilePlaced {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
        /// Material that was placed.
        kind: TileType,
    },

    /// A tile was overwritten directly.
    TileSet {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
        /// Previous material.
        from: TileType,
        /// New material.
        to: TileType,
    },

    /// Chunk geometry was invalidated by an edit.
    ChunksInvalidated {
        /// Tile that caused it.
        x: i32,
        /// Tile that caused it.
        y: i32,
        /// Chunks marked dirty.
        count: usize,
    },
}

/// A bounded channel of tile events.
pub struct EventBus {
    sender: Sender<TileEvent>,
    receiver: Receiver<TileEvent>,
}

impl EventBus {
    /// Creates a bus.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Events in flight before new ones are dropped
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender { sender: self.sender.clone() }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver { receiver: self.receiver.clone() }
    }

    /// Creates a connected sender and receiver.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// What happened to a sent event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendStatus {
    /// Queued for the receiver.
    Delivered,
    /// Dropped because the channel was full.
    Dropped,
    /// Dropped because every receiver is gone.
    Disconnected,
}

impl SendStatus {
    /// Returns true if the event was queued.
    #[inline]
    #[must_use]
    pub const fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Returns true if no receiver will ever see another event.
    #[inline]
    #[must_use]
    pub const fn is_disconnected(self) -> bool {
        matches!(self, Self::Disconnected)
    }
}

/// Handle for sending events.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: Sender<TileEvent>,
}

impl EventSender {
    /// Sends without blocking.
    #[inline]
    pub fn send(&self, event: TileEvent) -> SendStatus {
        match self.sender.try_send(event) {
            Ok(()) => SendStatus::Delivered,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(?event, "tile event channel full, dropping event");
                SendStatus::Dropped
            }
            Err(TrySendError::Disconnected(_)) => SendStatus::Disconnected,
        }
    }
}

/// Handle for receiving events.
#[derive(Clone, Debug)]
pub struct EventReceiver {
    receiver: Receiver<TileEvent>,
}

impl EventReceiver {
    /// Takes every pending event.
    #[inline]
    #[must_use]
    pub fn drain(&self) -> Vec<TileEvent> {
        self.receiver.try_iter().collect()
    }

    /// Takes one event, if any.
    #[inline]
    #[must_use]
    pub fn try_recv(&self) -> Option<TileEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns true if events are waiting.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_send_receive() {
        let (sender, receiver) = EventBus::create_pair(8);
        let event = TileEvent::TileMined { x: 3, y: 4, kind: TileType::Stone };

        assert!(sender.send(event).is_delivered());
        assert!(receiver.has_events());
        assert_eq!(receiver.try_recv(), Some(event));
        assert_eq!(receiver.try_recv(), None);
    }

    #[test]
    fn test_full_channel_drops() {
        let (sender, receiver) = EventBus::create_pair(2);
        let statuses: Vec<_> =
            (0..5).map(|x| sender.send(TileEvent::TilePlaced { x, y: 0, kind: TileType::Dirt })).collect();
        assert_eq!(statuses[1], SendStatus::Delivered);
        assert_eq!(statuses[2], SendStatus::Dropped);

        assert_eq!(receiver.pending_count(), 2);
        let events = receiver.drain();
        assert_eq!(events.len(), 2);
        assert!(!receiver.has_events());
    }

    #[test]
    fn test_disconnected_send_fails() {
        let bus = EventBus::new(4);
        let sender = bus.sender();
        drop(bus);

        let status = sender.send(TileEvent::TileMined { x: 0, y: 0, kind: TileType::Dirt });
        assert!(status.is_disconnected());
    }
}
