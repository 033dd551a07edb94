//! Focus System - Which segment receives keystrokes
//!
//! Focus is an explicit value rather than terminal state. A field holds an
//! `Option<FocusPin>`; `None` means no segment accepts keystrokes. Navigation
//! is pure and clamped at both ends.
//!
//! # Example
//!
//! ```ignore
//! use spark_otp::state::focus::{self, FocusPin};
//!
//! let focused = Some(FocusPin(3));
//! assert_eq!(focus::next(focused, 4), Some(FocusPin(4)));
//! assert_eq!(focus::next(Some(FocusPin(4)), 4), Some(FocusPin(4)));
//! assert_eq!(focus::previous(None), None);
//! ```

// =============================================================================
// FOCUS PIN
// =============================================================================

/// A focused segment index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FocusPin(pub usize);

impl FocusPin {
    /// Segment index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// The segment to the left, clamped at 0.
    pub fn previous(self) -> FocusPin {
        FocusPin(self.0.saturating_sub(1))
    }

    /// The segment to the right, clamped at `max`.
    pub fn next(self, max: usize) -> FocusPin {
        FocusPin((self.0 + 1).min(max))
    }
}

// =============================================================================
// OPTIONAL FOCUS NAVIGATION
// =============================================================================

/// Step focus left. Without focus there is nothing to move.
pub fn previous(focused: Option<FocusPin>) -> Option<FocusPin> {
    focused.map(FocusPin::previous)
}

/// Step focus right, clamped at `max`. Without focus there is nothing to move.
pub fn next(focused: Option<FocusPin>, max: usize) -> Option<FocusPin> {
    focused.map(|pin| pin.next(max))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_previous_clamps_at_zero() {
        assert_eq!(FocusPin(0).previous(), FocusPin(0));
        assert_eq!(FocusPin(3).previous(), FocusPin(2));
    }

    #[test]
    fn test_next_clamps_at_max() {
        assert_eq!(FocusPin(2).next(4), FocusPin(3));
        assert_eq!(FocusPin(4).next(4), FocusPin(4));
    }

    #[test]
    fn test_navigation_without_focus() {
        assert_eq!(previous(None), None);
        assert_eq!(next(None, 4), None);
        assert_eq!(next(Some(FocusPin(1)), 4), Some(FocusPin(2)));
        assert_eq!(previous(Some(FocusPin(1))), Some(FocusPin(0)));
    }

    proptest! {
        #[test]
        fn navigation_stays_in_bounds(
            max in 0usize..16,
            start in 0usize..16,
            steps in proptest::collection::vec(any::<bool>(), 0..40),
        ) {
            let mut pin = FocusPin(start.min(max));
            for forward in steps {
                pin = if forward { pin.next(max) } else { pin.previous() };
                prop_assert!(pin.index() <= max);
            }
        }
    }
}
