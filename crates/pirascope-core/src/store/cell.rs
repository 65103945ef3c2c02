// ── Reactive state cell ──
//
// One cell per store. Every mutation swaps in a fresh `Arc<S>` snapshot
// and wakes subscribers.

use std::sync::Arc;

use tokio::sync::watch;

use crate::stream::StateStream;

pub(crate) struct StateCell<S: Clone + Send + Sync + 'static> {
    snapshot: watch::Sender<Arc<S>>,
}

impl<S: Clone + Send + Sync + 'static> StateCell<S> {
    pub(crate) fn new(initial: S) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(initial));
        Self { snapshot }
    }

    /// Current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<S> {
        self.snapshot.borrow().clone()
    }

    /// Read a projection of the current state without cloning all of it.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.snapshot.borrow())
    }

    /// Apply a mutation and broadcast the new snapshot.
    pub(crate) fn update(&self, f: impl FnOnce(&mut S)) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| f(Arc::make_mut(snap)));
    }

    pub(crate) fn subscribe(&self) -> StateStream<S> {
        StateStream::new(self.snapshot.subscribe())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Counter {
        hits: u32,
        label: Option<String>,
    }

    #[test]
    fn update_replaces_snapshot() {
        let cell = StateCell::new(Counter::default());
        let before = cell.snapshot();

        cell.update(|c| c.hits += 1);
        cell.update(|c| c.label = Some("x".into()));

        assert_eq!(before.hits, 0);
        assert_eq!(cell.read(|c| c.hits), 1);
        assert_eq!(cell.snapshot().label.as_deref(), Some("x"));
        assert!(!Arc::ptr_eq(&before, &cell.snapshot()));
    }

    #[tokio::test]
    async fn subscriber_sees_changes() {
        let cell = StateCell::new(Counter::default());
        let mut stream = cell.subscribe();
        assert_eq!(stream.current().hits, 0);

        cell.update(|c| c.hits = 5);
        let next = stream.changed().await.unwrap();
        assert_eq!(next.hits, 5);
        assert_eq!(stream.latest().hits, 5);
    }
}
