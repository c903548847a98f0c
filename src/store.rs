use std::any::Any;
use std::cell::RefCell;
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

use crate::deps::Recorded;
use crate::fingerprint::Fingerprint;

/// Holds the memoized values of one rendering target.
///
/// Entries are addressed by slot: the position of a memoized call within a
/// rendering pass. The store lives as long as its owner, typically the
/// rendering target, and so do the entries in it.
///
/// The store is only ever borrowed for the duration of a lookup or an
/// insertion, never while a computation runs.
#[derive(Default)]
pub struct Store {
    /// Maps from slots to memoized results.
    slots: RefCell<Vec<Option<Entry>>>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.borrow().iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.slots.borrow_mut().clear();
    }

    /// Look for a reusable value at a slot.
    ///
    /// The entry must exist, carry the same fingerprint and dependencies and
    /// hold a value of type `T`.
    pub(crate) fn lookup<T>(
        &self,
        slot: usize,
        fingerprint: Fingerprint,
        deps: &Recorded,
    ) -> Option<T>
    where
        T: Clone + 'static,
    {
        let value = {
            let slots = self.slots.borrow();
            let entry = slots.get(slot)?.as_ref()?;
            if entry.fingerprint != fingerprint || !entry.deps.matches(deps) {
                return None;
            }
            Rc::clone(&entry.value)
        };

        // `T::clone` may memoize into this store, so it runs unborrowed.
        value.downcast_ref::<T>().cloned()
    }

    /// Insert an entry, replacing whatever was at the slot.
    pub(crate) fn insert(&self, slot: usize, entry: Entry) {
        let mut slots = self.slots.borrow_mut();
        if slot >= slots.len() {
            slots.resize_with(slot + 1, || None);
        }
        slots[slot] = Some(entry);
    }
}

impl Debug for Store {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Store").field("len", &self.len()).finish()
    }
}

/// A memoized result.
pub(crate) struct Entry {
    /// The dependencies the value was computed with.
    deps: Recorded,
    /// The fingerprint of the computation that produced the value.
    fingerprint: Fingerprint,
    /// The computation's output.
    value: Rc<dyn Any>,
}

impl Entry {
    /// Create a new entry.
    pub fn new<T: 'static>(
        deps: Recorded,
        fingerprint: Fingerprint,
        value: T,
    ) -> Self {
        Self { deps, fingerprint, value: Rc::new(value) }
    }
}
