use std::cell::Cell;
use std::fmt::{self, Debug, Formatter};
use std::panic::Location;

use crate::deps::{Dependencies, Recorded};
use crate::fingerprint::Fingerprint;
use crate::host::{Host, HostError};
use crate::store::Entry;

/// Memoizes the computations of one rendering pass.
///
/// Create a fresh memoizer at the start of every pass and bind it to the
/// rendering target's [`Host`]. Each memoized call takes the next slot of the
/// host's store, so the n-th call of one pass is compared against the n-th
/// call of the previous pass.
///
/// ```
/// use rememo::{Memoizer, Store};
///
/// let target = Store::new();
/// let (a, b) = (1, 2);
///
/// for _ in 0..3 {
///     let memo = Memoizer::new(&target);
///     let sum = memo.memoize(|| a + b, (a, b));
///     assert_eq!(sum, 3);
/// }
/// ```
///
/// # Call order
/// Slots are positional. If a memoized call is skipped in one pass, all later
/// calls of that pass shift by one slot and are compared against the entries
/// of other call sites. Fingerprints catch most of these mix-ups, but calls
/// that share a fingerprint are silently misattributed. Keep memoized calls
/// unconditional, or give conditional ones their own host.
pub struct Memoizer<H> {
    /// Where the entries live.
    host: H,
    /// The slot of the next call.
    next: Cell<usize>,
    /// Whether memoization is enabled.
    enabled: bool,
}

impl<H: Host> Memoizer<H> {
    /// Create a memoizer for a new pass over `host`.
    ///
    /// This neither resolves nor modifies the host.
    pub fn new(host: H) -> Self {
        Self { host, next: Cell::new(0), enabled: true }
    }

    /// Enable or disable memoization.
    ///
    /// A disabled memoizer runs every computation and stores nothing. It
    /// still takes up slots so that re-enabling it does not shift any calls.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// The number of memoized calls made so far.
    pub fn calls(&self) -> usize {
        self.next.get()
    }

    /// Executes a computation or reuses its value from the previous pass.
    ///
    /// The value is reused if this call's slot holds a value produced by the
    /// same call site with identical dependencies. Otherwise, `func` runs
    /// exactly once and its value replaces the slot's entry.
    ///
    /// # Panics
    /// Panics if the host cannot be resolved to a store. Panics in `func`
    /// propagate and leave the slot untouched.
    #[track_caller]
    pub fn memoize<T, F, D>(&self, func: F, deps: D) -> T
    where
        T: Clone + 'static,
        F: FnOnce() -> T,
        D: Dependencies,
    {
        self.memoize_with(Fingerprint::of_location(Location::caller()), func, deps)
    }

    /// Like [`memoize`](Self::memoize), but for computations that can fail.
    ///
    /// Errors from `func` are returned unchanged and nothing is stored. An
    /// unresolvable host is reported through `E`.
    #[track_caller]
    pub fn try_memoize<T, E, F, D>(&self, func: F, deps: D) -> Result<T, E>
    where
        T: Clone + 'static,
        E: From<HostError>,
        F: FnOnce() -> Result<T, E>,
        D: Dependencies,
    {
        self.try_memoize_with(Fingerprint::of_location(Location::caller()), func, deps)
    }

    /// Like [`memoize`](Self::memoize), but with an explicit fingerprint.
    #[track_caller]
    pub fn memoize_with<T, F, D>(&self, fingerprint: Fingerprint, func: F, deps: D) -> T
    where
        T: Clone + 'static,
        F: FnOnce() -> T,
        D: Dependencies,
    {
        match self.try_memoize_with(fingerprint, || Ok::<_, HostError>(func()), deps) {
            Ok(value) => value,
            Err(err) => panic!("rememo: {err}"),
        }
    }

    /// Like [`try_memoize`](Self::try_memoize), but with an explicit
    /// fingerprint.
    pub fn try_memoize_with<T, E, F, D>(
        &self,
        fingerprint: Fingerprint,
        func: F,
        deps: D,
    ) -> Result<T, E>
    where
        T: Clone + 'static,
        E: From<HostError>,
        F: FnOnce() -> Result<T, E>,
        D: Dependencies,
    {
        // Take the slot before anything can fail so that later calls keep
        // their positions.
        let slot = self.next.get();
        self.next.set(slot + 1);

        let store = self.host.resolve().inspect_err(|err| {
            log::debug!("rememo: slot {slot}: {err}");
        })?;

        let deps = Recorded::of(&deps);

        // Early bypass if memoization is disabled.
        if !self.enabled {
            let value = func()?;

            #[cfg(feature = "testing")]
            crate::testing::register(slot, false);

            return Ok(value);
        }

        // Check if there is a reusable value.
        if let Some(value) = store.lookup::<T>(slot, fingerprint, &deps) {
            log::trace!("rememo: slot {slot}: hit");

            #[cfg(feature = "testing")]
            crate::testing::register(slot, true);

            return Ok(value);
        }

        log::trace!("rememo: slot {slot}: miss");

        // The store is not borrowed here, so the computation may itself
        // memoize into the same store.
        let value = func()?;
        store.insert(slot, Entry::new(deps, fingerprint, value.clone()));

        #[cfg(feature = "testing")]
        crate::testing::register(slot, false);

        Ok(value)
    }
}

impl<H: Debug> Debug for Memoizer<H> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Memoizer")
            .field("host", &self.host)
            .field("calls", &self.next.get())
            .field("enabled", &self.enabled)
            .finish()
    }
}
