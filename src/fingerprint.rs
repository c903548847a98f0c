use std::fmt::{self, Debug, Formatter};
use std::hash::Hash;
use std::panic::Location;

use crate::hash::hash;

/// A coarse signature of a memoized computation.
///
/// Slots are identified by position only, so the fingerprint is what tells two
/// different computations apart when they end up at the same slot. A stored
/// value is only reused when the fingerprint of the new computation equals the
/// stored one.
///
/// There are three ways to obtain one:
/// - [`of_location`](Self::of_location): the source location that issued the
///   call. This is what [`Memoizer::memoize`](crate::Memoizer::memoize) uses.
/// - [`of_source`](Self::of_source): the source text of the computation. This
///   is what the [`memo!`](crate::memo) macro uses.
/// - [`of_key`](Self::of_key): any hashable value chosen by the caller.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Fingerprint(u128);

impl Fingerprint {
    /// Fingerprint a source location.
    #[inline]
    pub fn of_location(location: &Location<'_>) -> Self {
        Self(hash(&(0u8, location.file(), location.line(), location.column())))
    }

    /// Fingerprint the source text of a computation.
    ///
    /// Two computations with the same text are considered the same, even if
    /// they capture different surroundings.
    #[inline]
    pub fn of_source(text: &str) -> Self {
        Self(hash(&(1u8, text)))
    }

    /// Fingerprint an explicit, caller-chosen key.
    #[inline]
    pub fn of_key<K: Hash + ?Sized>(key: &K) -> Self {
        Self(hash(&(2u8, hash(key))))
    }
}

impl Debug for Fingerprint {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Fingerprint({:032x})", self.0)
    }
}
