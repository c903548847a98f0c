use std::any::Any;
use std::fmt::{self, Debug, Formatter};
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::hash::hash;

/// A single value a computation declares itself sensitive to.
///
/// Comparison is shallow. Plain values compare by value, reference-counted
/// pointers by identity: two `Rc`s are the same dependency only if they point
/// to the same allocation, no matter what they contain. Wrap a value in
/// [`ByValue`] to compare it by its full contents instead.
pub trait Dependency {
    /// A 128-bit identity for this value.
    fn identity(&self) -> u128;

    /// An owner that must stay alive while an entry compares against this
    /// dependency's identity.
    ///
    /// Identities derived from addresses are only meaningful while the
    /// allocation is alive, so pointer types hand out a clone of themselves.
    fn pin(&self) -> Option<Box<dyn Any>> {
        None
    }
}

macro_rules! by_value {
    ($($ty:ty),* $(,)?) => {
        $(impl Dependency for $ty {
            #[inline]
            fn identity(&self) -> u128 {
                hash(self)
            }
        })*
    };
}

by_value! {
    (), bool, char, str, String,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
}

/// Hands out identities for NaN, which is never equal to anything.
static NAN_IDENTITY: AtomicU64 = AtomicU64::new(0);

macro_rules! by_float_value {
    ($($ty:ty),*) => {
        $(impl Dependency for $ty {
            /// Both zeros share one identity. Every NaN gets a fresh one, so
            /// a NaN dependency never matches.
            fn identity(&self) -> u128 {
                if self.is_nan() {
                    let fresh = NAN_IDENTITY.fetch_add(1, Ordering::Relaxed);
                    hash(&(stringify!($ty), "nan", fresh))
                } else if *self == 0.0 {
                    hash(&(0.0 as $ty).to_bits())
                } else {
                    hash(&self.to_bits())
                }
            }
        })*
    };
}

by_float_value! { f32, f64 }

impl<T: Dependency + ?Sized> Dependency for &T {
    #[inline]
    fn identity(&self) -> u128 {
        (**self).identity()
    }

    fn pin(&self) -> Option<Box<dyn Any>> {
        (**self).pin()
    }
}

impl<T: Dependency> Dependency for Option<T> {
    fn identity(&self) -> u128 {
        hash(&self.as_ref().map(T::identity))
    }

    fn pin(&self) -> Option<Box<dyn Any>> {
        self.as_ref().and_then(T::pin)
    }
}

impl<T: ?Sized + 'static> Dependency for Rc<T> {
    #[inline]
    fn identity(&self) -> u128 {
        hash(&(Rc::as_ptr(self).cast::<()>() as usize))
    }

    fn pin(&self) -> Option<Box<dyn Any>> {
        Some(Box::new(Rc::clone(self)))
    }
}

impl<T: ?Sized + 'static> Dependency for Arc<T> {
    #[inline]
    fn identity(&self) -> u128 {
        hash(&(Arc::as_ptr(self).cast::<()>() as usize))
    }

    fn pin(&self) -> Option<Box<dyn Any>> {
        Some(Box::new(Arc::clone(self)))
    }
}

/// Compares the wrapped value by its contents.
///
/// Useful for collections and structs that are rebuilt on every pass but
/// usually hold the same data.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ByValue<T>(pub T);

impl<T: Hash> Dependency for ByValue<T> {
    #[inline]
    fn identity(&self) -> u128 {
        hash(&self.0)
    }
}

impl<T: Debug> Debug for ByValue<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An ordered list of dependencies.
///
/// This is implemented for tuples of up to twelve [`Dependency`] values and
/// for arrays, slices and vectors of a single dependency type.
pub trait Dependencies {
    /// Record every element, in order.
    fn record(&self, recorder: &mut Recorded);
}

/// The recorded state of a dependency list.
#[derive(Default)]
pub struct Recorded {
    /// The identity of each element, in order.
    identities: Vec<u128>,
    /// Owners that keep address-based identities valid.
    pinned: Vec<Box<dyn Any>>,
}

impl Recorded {
    /// Record a dependency list.
    pub(crate) fn of<D: Dependencies + ?Sized>(deps: &D) -> Self {
        let mut recorded = Self::default();
        deps.record(&mut recorded);
        recorded
    }

    /// Append one element.
    #[inline]
    pub fn push<T: Dependency + ?Sized>(&mut self, dep: &T) {
        self.identities.push(dep.identity());
        self.pinned.extend(dep.pin());
    }

    /// The number of recorded elements.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Whether no element was recorded.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Whether both lists have the same length and are identical at every
    /// position.
    pub(crate) fn matches(&self, other: &Self) -> bool {
        self.identities == other.identities
    }
}

impl Debug for Recorded {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Recorded")
            .field("identities", &self.identities)
            .field("pinned", &self.pinned.len())
            .finish()
    }
}

impl<T: Dependency> Dependencies for [T] {
    fn record(&self, recorder: &mut Recorded) {
        for dep in self {
            recorder.push(dep);
        }
    }
}

impl<T: Dependency, const N: usize> Dependencies for [T; N] {
    fn record(&self, recorder: &mut Recorded) {
        self.as_slice().record(recorder);
    }
}

impl<T: Dependency> Dependencies for Vec<T> {
    fn record(&self, recorder: &mut Recorded) {
        self.as_slice().record(recorder);
    }
}

impl<D: Dependencies + ?Sized> Dependencies for &D {
    fn record(&self, recorder: &mut Recorded) {
        (**self).record(recorder);
    }
}

macro_rules! tuple_dependencies {
    ($($param:tt $idx:tt),*) => {
        #[allow(unused_variables)]
        impl<$($param: Dependency),*> Dependencies for ($($param,)*) {
            fn record(&self, recorder: &mut Recorded) {
                $(recorder.push(&self.$idx);)*
            }
        }
    };
}

tuple_dependencies! {}
tuple_dependencies! { A 0 }
tuple_dependencies! { A 0, B 1 }
tuple_dependencies! { A 0, B 1, C 2 }
tuple_dependencies! { A 0, B 1, C 2, D 3 }
tuple_dependencies! { A 0, B 1, C 2, D 3, E 4 }
tuple_dependencies! { A 0, B 1, C 2, D 3, E 4, F 5 }
tuple_dependencies! { A 0, B 1, C 2, D 3, E 4, F 5, G 6 }
tuple_dependencies! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7 }
tuple_dependencies! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8 }
tuple_dependencies! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9 }
tuple_dependencies! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10 }
tuple_dependencies! { A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11 }
