//! Call-site memoization for re-invoked rendering functions.
//!
//! Immediate-mode rendering code runs from top to bottom on every state
//! change. This crate lets such code skip expensive steps whose inputs did not
//! change since the last run, without naming any cache keys: a value is
//! identified by the position of its memoized call within the pass.
//!
//! ```
//! use std::rc::Rc;
//!
//! use rememo::{Memoizer, Store};
//!
//! /// The rendering target. Its store outlives individual passes.
//! struct Chart {
//!     memo: Store,
//! }
//!
//! fn render(chart: &Chart, data: &Rc<[f64]>, width: f64) -> Vec<f64> {
//!     let memo = Memoizer::new(&chart.memo);
//!     let max = memo.memoize(
//!         || data.iter().copied().fold(0.0, f64::max),
//!         (data.clone(),),
//!     );
//!     memo.memoize(
//!         || data.iter().map(|v| v / max * width).collect(),
//!         (data.clone(), width),
//!     )
//! }
//!
//! let chart = Chart { memo: Store::new() };
//! let data: Rc<[f64]> = Rc::from([1.0, 2.0, 4.0]);
//! let first = render(&chart, &data, 100.0);
//! let second = render(&chart, &data, 100.0); // Reuses both values.
//! assert_eq!(first, second);
//! ```
//!
//! Entries are attached to a [`Host`], typically the rendering target itself,
//! and live exactly as long as it does. A fresh [`Memoizer`] is created for
//! every pass. Because identity is positional, the memoized calls of a pass
//! must run in the same order on every pass.

mod deps;
mod fingerprint;
mod hash;
mod host;
mod memoize;
mod store;
#[cfg(feature = "testing")]
mod testing;

pub use crate::deps::{ByValue, Dependencies, Dependency, Recorded};
pub use crate::fingerprint::Fingerprint;
pub use crate::host::{Binding, Host, HostError, Resolved};
pub use crate::memoize::Memoizer;
pub use crate::store::Store;

#[cfg(feature = "macros")]
pub use rememo_macros::{memo, try_memo};

/// These are implementation details. Do not rely on them!
#[doc(hidden)]
pub mod internal {
    #[cfg(feature = "testing")]
    pub use crate::testing::{last_slot, last_was_hit};
}
