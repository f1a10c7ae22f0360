//! Process-wide unique identities for GL objects and contexts.
//!
//! Native names are handed out by the driver and may be reused once an object
//! is deleted. A [`Uid`] never is, which makes the (name, uid) pair on a handle
//! a versioned reference: the name addresses the native object, the uid proves
//! it is still the same generation. Uids are also what the binding cache and
//! the ownership checks compare, so a recycled name can never alias a dead
//! object inside this layer.

use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_UID: AtomicU64 = AtomicU64::new(1);

/// A process-wide unique id. Never zero, never reused within a process.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid(NonZeroU64);

impl Uid {
    /// Allocates the next id. Callable from any thread; handle creation on
    /// concurrent threads cannot observe duplicates.
    pub fn next() -> Uid {
        let raw = NEXT_UID.fetch_add(1, Ordering::Relaxed);
        // The counter starts at 1; a u64 does not exhaust in a process lifetime.
        Uid(NonZeroU64::new(raw).expect("uid counter wrapped"))
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use more_asserts::assert_gt;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn uids_are_strictly_increasing() {
        let a = Uid::next();
        let b = Uid::next();
        let c = Uid::next();
        assert_gt!(b, a);
        assert_gt!(c, b);
    }

    #[test]
    fn uids_are_unique_across_threads() {
        const PER_THREAD: usize = 1000;

        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| (0..PER_THREAD).map(|_| Uid::next()).collect::<Vec<_>>()))
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for uid in handle.join().unwrap() {
                assert!(seen.insert(uid), "duplicate uid {uid}");
            }
        }
        assert_eq!(seen.len(), 8 * PER_THREAD);
    }
}
