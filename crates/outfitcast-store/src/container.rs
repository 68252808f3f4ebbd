//! Shared snapshot/mutate/subscribe core behind every store.

use parking_lot::RwLock;
use tokio::sync::broadcast;

const CHANGE_CAPACITY: usize = 16;

/// State behind a lock plus a broadcast of every post-mutation snapshot.
///
/// Mutations run under the write lock and are visible to the next
/// [`snapshot`](Self::snapshot) as soon as [`update`](Self::update) returns.
#[derive(Debug)]
pub struct Container<S: Clone> {
    state: RwLock<S>,
    changes: broadcast::Sender<S>,
}

impl<S: Clone> Container<S> {
    pub fn new(initial: S) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            state: RwLock::new(initial),
            changes,
        }
    }

    pub fn snapshot(&self) -> S {
        self.state.read().clone()
    }

    /// Read a projection without cloning the whole state.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.read())
    }

    /// Apply `f` and publish the resulting snapshot.
    pub fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> (R, S) {
        let (result, snapshot) = {
            let mut state = self.state.write();
            let result = f(&mut state);
            (result, state.clone())
        };
        // No subscribers is not an error
        let _ = self.changes.send(snapshot.clone());
        (result, snapshot)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<S> {
        self.changes.subscribe()
    }
}
