use std::cell::Cell;

use quickcheck_macros::quickcheck;
use rememo::{Memoizer, Store};

/// Runs one pass with a single call site and returns the computed value.
fn pass(target: &Store, deps: &[i64], runs: &Cell<usize>) -> i64 {
    let memo = Memoizer::new(target);
    memo.memoize(
        || {
            runs.set(runs.get() + 1);
            deps.iter().fold(0i64, |acc, d| acc.wrapping_mul(31).wrapping_add(*d))
        },
        deps,
    )
}

/// The first pass always computes and later identical passes never do.
#[quickcheck]
fn prop_cold_miss_then_hits(deps: Vec<i64>, repeats: u8) -> bool {
    let target = Store::new();
    let runs = Cell::new(0);
    let first = pass(&target, &deps, &runs);
    let stable = (0..repeats % 16).all(|_| pass(&target, &deps, &runs) == first);
    stable && runs.get() == 1
}

/// Changing one element recomputes exactly once.
#[quickcheck]
fn prop_single_change_recomputes_once(deps: Vec<i64>, index: usize, delta: i64) -> bool {
    if deps.is_empty() || delta == 0 {
        return true;
    }

    let target = Store::new();
    let runs = Cell::new(0);
    pass(&target, &deps, &runs);

    let mut changed = deps.clone();
    let i = index % changed.len();
    changed[i] = changed[i].wrapping_add(delta);

    let fresh = Cell::new(0);
    let expected = pass(&Store::new(), &changed, &fresh);
    let recomputed = pass(&target, &changed, &runs);
    let reused = pass(&target, &changed, &runs);

    recomputed == expected && reused == expected && runs.get() == 2
}

/// Call sites only react to their own dependencies.
#[quickcheck]
fn prop_call_sites_are_independent(passes: Vec<(u8, u8)>) -> bool {
    let target = Store::new();
    let a_runs = Cell::new(0);
    let b_runs = Cell::new(0);
    let mut expected = (0, 0);
    let mut last: Option<(u8, u8)> = None;

    for &(a, b) in &passes {
        let memo = Memoizer::new(&target);
        let a_sq = memo.memoize(
            || {
                a_runs.set(a_runs.get() + 1);
                a as u32 * a as u32
            },
            (a,),
        );
        let b_sq = memo.memoize(
            || {
                b_runs.set(b_runs.get() + 1);
                b as u32 * b as u32
            },
            (b,),
        );

        if last.is_none_or(|(la, _)| la != a) {
            expected.0 += 1;
        }
        if last.is_none_or(|(_, lb)| lb != b) {
            expected.1 += 1;
        }
        last = Some((a, b));

        if a_sq != a as u32 * a as u32 || b_sq != b as u32 * b as u32 {
            return false;
        }
    }

    (a_runs.get(), b_runs.get()) == expected
}
