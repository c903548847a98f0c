use std::cell::Cell;
use std::rc::Rc;

use rememo::{Binding, Host, HostError, Memoizer, Resolved, Store};

/// A node of a retained scene graph.
#[derive(Default)]
struct Node {
    memo: Store,
}

/// A handle selecting a node, created fresh for every pass.
struct Selection<'a> {
    node: &'a Node,
    resolutions: &'a Cell<usize>,
}

impl Host for Selection<'_> {
    fn resolve(&self) -> Result<Resolved<'_>, HostError> {
        self.resolutions.set(self.resolutions.get() + 1);
        Ok(Resolved::Borrowed(&self.node.memo))
    }
}

fn area(memo: &Memoizer<impl Host>, w: u32, h: u32, runs: &Cell<usize>) -> u32 {
    memo.memoize(
        || {
            runs.set(runs.get() + 1);
            w * h
        },
        (w, h),
    )
}

/// Test that fresh selections of the same node share entries.
#[test]
fn test_selection_shares_node() {
    let node = Node::default();
    let resolutions = Cell::new(0);
    let runs = Cell::new(0);

    for (w, h) in [(1, 2), (1, 2), (2, 2), (2, 2)] {
        let before = resolutions.get();
        let memo = Memoizer::new(Selection { node: &node, resolutions: &resolutions });
        assert_eq!(resolutions.get(), before);
        assert_eq!(area(&memo, w, h, &runs), w * h);
    }

    assert_eq!(runs.get(), 2);
    assert_eq!(resolutions.get(), 4);
    assert_eq!(node.memo.len(), 1);
}

/// Test that the host is resolved on every call.
#[test]
fn test_resolved_per_call() {
    let node = Node::default();
    let resolutions = Cell::new(0);
    let runs = Cell::new(0);

    let memo = Memoizer::new(Selection { node: &node, resolutions: &resolutions });
    assert_eq!(resolutions.get(), 0);
    area(&memo, 1, 1, &runs);
    area(&memo, 2, 2, &runs);
    area(&memo, 3, 3, &runs);
    assert_eq!(resolutions.get(), 3);
    assert_eq!(node.memo.len(), 3);
}

/// Test that a rebound handle leads to the new store.
#[test]
fn test_binding_rebinds() {
    let first = Rc::new(Store::new());
    let second = Rc::new(Store::new());
    let binding = Binding::to(&first);
    let runs = Cell::new(0);

    area(&Memoizer::new(&binding), 2, 3, &runs);
    area(&Memoizer::new(&binding), 2, 3, &runs);
    assert_eq!(runs.get(), 1);

    binding.bind(&second);
    area(&Memoizer::new(&binding), 2, 3, &runs);
    assert_eq!(runs.get(), 2);
    assert!(!rememo::internal::last_was_hit());

    binding.bind(&first);
    area(&Memoizer::new(&binding), 2, 3, &runs);
    assert_eq!(runs.get(), 2);
    assert!(rememo::internal::last_was_hit());

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
}

/// Test that rebinding within one pass takes effect at the next call.
#[test]
fn test_binding_rebinds_mid_pass() {
    let first = Rc::new(Store::new());
    let second = Rc::new(Store::new());
    let binding = Binding::to(&first);
    let runs = Cell::new(0);

    let memo = Memoizer::new(&binding);
    area(&memo, 1, 1, &runs);
    binding.bind(&second);
    area(&memo, 2, 2, &runs);

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
}

/// Test weak and shared handles.
#[test]
fn test_weak_and_shared() {
    let store = Rc::new(Store::new());
    let runs = Cell::new(0);

    area(&Memoizer::new(Rc::clone(&store)), 4, 4, &runs);
    area(&Memoizer::new(Rc::downgrade(&store)), 4, 4, &runs);
    assert_eq!(runs.get(), 1);

    let weak = Rc::downgrade(&store);
    drop(store);
    let memo = Memoizer::new(weak);
    let result: Result<u32, HostError> = memo.try_memoize(|| Ok(1), ());
    assert_eq!(result, Err(HostError::Detached));
}

/// Test that a failed resolution still takes up a slot.
#[test]
fn test_failed_resolution_takes_slot() {
    let binding = Binding::new();
    let memo = Memoizer::new(&binding);
    let result: Result<u32, HostError> = memo.try_memoize(|| Ok(1), ());
    assert_eq!(result, Err(HostError::Unbound));
    assert_eq!(memo.calls(), 1);

    let store = Rc::new(Store::new());
    binding.bind(&store);
    let result: Result<u32, HostError> = memo.try_memoize(|| Ok(2), ());
    assert_eq!(result, Ok(2));
    assert_eq!(rememo::internal::last_slot(), Some(1));
}

/// Test that an unusable host fails loudly.
#[test]
#[should_panic(expected = "rememo: host's store has been dropped")]
fn test_detached_panics() {
    let store = Rc::new(Store::new());
    let binding = Binding::to(&store);
    drop(store);
    let runs = Cell::new(0);
    area(&Memoizer::new(&binding), 1, 1, &runs);
}

/// Test that an unbound host never runs the computation.
#[test]
fn test_unbound_skips_computation() {
    let memo = Memoizer::new(None::<Store>);
    let runs = Cell::new(0);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        area(&memo, 1, 1, &runs);
    }));
    assert!(result.is_err());
    assert_eq!(runs.get(), 0);
}
