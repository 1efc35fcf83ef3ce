//! Append-only audit trail.
//!
//! Replaces on-chain event emission. Ordering relative to state writes is
//! part of the observable contract: entries are appended in the exact order
//! the state changes they describe were applied.

use chrono::{DateTime, Utc};
use openbarter_types::Event;
use serde::Serialize;

/// One recorded event with its position and wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recorded {
    /// Zero-based position in the log.
    pub seq: u64,
    /// When the entry was appended.
    pub at: DateTime<Utc>,
    pub event: Event,
}

/// The engine's audit trail. Entries are never mutated or removed.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<Recorded>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an event.
    pub(crate) fn record(&mut self, event: Event) {
        let seq = self.entries.len() as u64;
        tracing::debug!(seq, event = event.name(), "event");
        self.entries.push(Recorded {
            seq,
            at: Utc::now(),
            event,
        });
    }

    /// All recorded entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[Recorded] {
        &self.entries
    }

    /// The recorded events without their envelopes, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.entries.iter().map(|r| &r.event)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openbarter_types::{AccountId, OfferId};

    #[test]
    fn records_in_order_with_sequential_seq() {
        let mut log = EventLog::new();
        log.record(Event::Paused {
            by: AccountId::ZERO,
        });
        log.record(Event::OfferCreated {
            id: OfferId(1),
            asset: None,
            creator: AccountId::ZERO,
        });

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].seq, 0);
        assert_eq!(log.entries()[1].seq, 1);
        assert_eq!(log.entries()[0].event.name(), "Paused");
        assert_eq!(log.entries()[1].event.name(), "OfferCreated");
    }

    #[test]
    fn events_iterator_strips_envelope() {
        let mut log = EventLog::new();
        log.record(Event::Unpaused {
            by: AccountId::ZERO,
        });
        let events: Vec<_> = log.events().collect();
        assert_eq!(
            events,
            vec![&Event::Unpaused {
                by: AccountId::ZERO
            }]
        );
    }
}
