use std::cell::RefCell;
use std::fmt::{self, Debug, Display, Formatter};
use std::ops::Deref;
use std::rc::{Rc, Weak};

use crate::store::Store;

/// Something memoized values can be attached to.
///
/// A host is either the [`Store`] itself or a handle that leads to one, like a
/// selection wrapping an underlying node. Resolution happens on every memoized
/// call, so a handle may lead to a different store from one call to the next.
/// Handles that resolve to the same store share its entries.
pub trait Host {
    /// Find the store to read from and write to.
    fn resolve(&self) -> Result<Resolved<'_>, HostError>;
}

/// A store found through [`Host::resolve`].
pub enum Resolved<'a> {
    /// A store that lives at least as long as the host.
    Borrowed(&'a Store),
    /// A store that had to be upgraded from a weak handle.
    Shared(Rc<Store>),
}

impl Deref for Resolved<'_> {
    type Target = Store;

    #[inline]
    fn deref(&self) -> &Store {
        match self {
            Self::Borrowed(store) => store,
            Self::Shared(store) => store,
        }
    }
}

impl Debug for Resolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        (**self).fmt(f)
    }
}

/// A host that cannot provide a store.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HostError {
    /// The host was never bound to a store, or has been unbound.
    Unbound,
    /// The store the host pointed to has been dropped.
    Detached,
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad(match self {
            Self::Unbound => "host is not bound to a store",
            Self::Detached => "host's store has been dropped",
        })
    }
}

impl std::error::Error for HostError {}

impl Host for Store {
    #[inline]
    fn resolve(&self) -> Result<Resolved<'_>, HostError> {
        Ok(Resolved::Borrowed(self))
    }
}

impl<H: Host + ?Sized> Host for &H {
    #[inline]
    fn resolve(&self) -> Result<Resolved<'_>, HostError> {
        (**self).resolve()
    }
}

impl<H: Host + ?Sized> Host for Box<H> {
    #[inline]
    fn resolve(&self) -> Result<Resolved<'_>, HostError> {
        (**self).resolve()
    }
}

impl<H: Host + ?Sized> Host for Rc<H> {
    #[inline]
    fn resolve(&self) -> Result<Resolved<'_>, HostError> {
        (**self).resolve()
    }
}

impl Host for Weak<Store> {
    fn resolve(&self) -> Result<Resolved<'_>, HostError> {
        self.upgrade().map(Resolved::Shared).ok_or(HostError::Detached)
    }
}

impl<H: Host> Host for Option<H> {
    fn resolve(&self) -> Result<Resolved<'_>, HostError> {
        self.as_ref().ok_or(HostError::Unbound)?.resolve()
    }
}

/// A rebindable handle to a store.
///
/// The binding does not keep its store alive. Once the store is dropped,
/// memoized calls through the binding fail with [`HostError::Detached`].
#[derive(Default)]
pub struct Binding {
    target: RefCell<Option<Weak<Store>>>,
}

impl Binding {
    /// Create an unbound handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle bound to `store`.
    pub fn to(store: &Rc<Store>) -> Self {
        let binding = Self::new();
        binding.bind(store);
        binding
    }

    /// Point the handle at a different store.
    pub fn bind(&self, store: &Rc<Store>) {
        *self.target.borrow_mut() = Some(Rc::downgrade(store));
    }

    /// Detach the handle from its store.
    pub fn unbind(&self) {
        self.target.borrow_mut().take();
    }
}

impl Host for Binding {
    fn resolve(&self) -> Result<Resolved<'_>, HostError> {
        let target = self.target.borrow();
        let weak = target.as_ref().ok_or(HostError::Unbound)?;
        weak.upgrade().map(Resolved::Shared).ok_or(HostError::Detached)
    }
}

impl Debug for Binding {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let state = match self.resolve() {
            Ok(_) => "bound",
            Err(HostError::Unbound) => "unbound",
            Err(HostError::Detached) => "detached",
        };
        write!(f, "Binding({state})")
    }
}
