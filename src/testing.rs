use std::cell::Cell;

thread_local! {
    /// The slot and outcome of the last memoized call on this thread.
    static LAST: Cell<Option<(usize, bool)>> = const { Cell::new(None) };
}

/// Whether the last memoized call on this thread was a hit.
pub fn last_was_hit() -> bool {
    LAST.with(|cell| cell.get()).is_some_and(|(_, hit)| hit)
}

/// The slot of the last memoized call on this thread.
pub fn last_slot() -> Option<usize> {
    LAST.with(|cell| cell.get()).map(|(slot, _)| slot)
}

/// Records the outcome of a call at `slot`.
pub(crate) fn register(slot: usize, hit: bool) {
    LAST.with(|cell| cell.set(Some((slot, hit))))
}
