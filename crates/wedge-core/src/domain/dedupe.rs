//! Duplicate-read suppression while a card stays on the reader.
//!
//! A reader answers every poll for as long as a card is presented, so the
//! same UID arrives many times per second.  [`DedupeFilter`] remembers the
//! last emitted UID and forgets it as soon as a poll comes back without one:
//!
//! ```text
//!          Success(new)            Success(same)
//!   Empty ─────────────▶ Holding ◀──────────────┐
//!     ▲                   │  │                  │
//!     │  NoCard / error   │  └──────────────────┘
//!     └───────────────────┘
//! ```
//!
//! Clearing on every failed poll means that lifting a card and putting it
//! back down is a new presentation and is emitted again.

use super::uid::Uid;

/// The two states of the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DedupeState {
    /// No card seen since the last failed poll.
    #[default]
    Empty,
    /// This UID was emitted and is still on the reader.
    Holding(Uid),
}

/// Remembers the UID currently on the reader.
#[derive(Debug, Default)]
pub struct DedupeFilter {
    state: DedupeState,
}

impl DedupeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` unless `uid` is the one currently held.
    pub fn is_new(&self, uid: &Uid) -> bool {
        match &self.state {
            DedupeState::Holding(held) => held != uid,
            DedupeState::Empty => true,
        }
    }

    /// Marks `uid` as emitted.
    pub fn record(&mut self, uid: Uid) {
        self.state = DedupeState::Holding(uid);
    }

    /// Forgets the held UID and returns it, if any.
    pub fn clear(&mut self) -> Option<Uid> {
        match std::mem::take(&mut self.state) {
            DedupeState::Holding(uid) => Some(uid),
            DedupeState::Empty => None,
        }
    }

    pub fn state(&self) -> &DedupeState {
        &self.state
    }

    /// The held UID, if any.
    pub fn current(&self) -> Option<&Uid> {
        match &self.state {
            DedupeState::Holding(uid) => Some(uid),
            DedupeState::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(bytes: &[u8]) -> Uid {
        Uid::from_bytes(bytes)
    }

    #[test]
    fn test_initial_state_is_empty() {
        let filter = DedupeFilter::new();
        assert_eq!(filter.state(), &DedupeState::Empty);
        assert!(filter.current().is_none());
    }

    #[test]
    fn test_any_uid_is_new_when_empty() {
        let filter = DedupeFilter::new();
        assert!(filter.is_new(&uid(&[0x01])));
    }

    #[test]
    fn test_held_uid_is_not_new() {
        // Arrange
        let mut filter = DedupeFilter::new();
        filter.record(uid(&[0x04, 0xA1]));

        // Act / Assert
        assert!(!filter.is_new(&uid(&[0x04, 0xA1])));
        assert!(filter.is_new(&uid(&[0x04, 0xA2])));
    }

    #[test]
    fn test_record_replaces_held_uid() {
        let mut filter = DedupeFilter::new();
        filter.record(uid(&[0x01]));
        filter.record(uid(&[0x02]));
        assert_eq!(filter.current(), Some(&uid(&[0x02])));
    }

    #[test]
    fn test_clear_returns_previous_uid_and_empties() {
        // Arrange
        let mut filter = DedupeFilter::new();
        filter.record(uid(&[0xAA]));

        // Act
        let previous = filter.clear();

        // Assert
        assert_eq!(previous, Some(uid(&[0xAA])));
        assert_eq!(filter.state(), &DedupeState::Empty);
        assert!(filter.is_new(&uid(&[0xAA])));
    }

    #[test]
    fn test_clear_when_empty_is_a_no_op() {
        let mut filter = DedupeFilter::new();
        assert!(filter.clear().is_none());
        assert_eq!(filter.state(), &DedupeState::Empty);
    }
}
