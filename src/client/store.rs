// SPDX-License-Identifier: MIT

//! Event-queue store
//!
//! A `Store` owns one state value inside a tokio task. Events are queued on an
//! unbounded channel and folded through a [`Reducer`] strictly in dispatch
//! order; every new state is published on a watch channel so that renderers
//! can subscribe to it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

use super::error::StoreError;

/// A pure state-transition function
pub trait Reducer: Send + Sync + 'static {
    type State: Clone + Send + Sync + 'static;
    type Event: std::fmt::Debug + Send + 'static;

    /// Produce the next state. Must not mutate `state`; an `Err` leaves the
    /// store on the previous state.
    fn reduce(&self, state: &Self::State, event: Self::Event) -> Result<Self::State, StoreError>;
}

enum Command<E> {
    Dispatch(E),
    Flush(oneshot::Sender<()>),
}

/// Handle to a running store. Cheap to clone; the task stops when the last
/// handle is dropped.
pub struct Store<R: Reducer> {
    tx: mpsc::UnboundedSender<Command<R::Event>>,
    state: watch::Receiver<R::State>,
    dropped: Arc<AtomicU64>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            state: self.state.clone(),
            dropped: self.dropped.clone(),
        }
    }
}

impl<R: Reducer> Store<R> {
    /// Spawn the store task. Must be called from within a tokio runtime.
    pub fn new(reducer: R, initial: R::State) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Command<R::Event>>();
        let (state_tx, state_rx) = watch::channel(initial);
        let dropped = Arc::new(AtomicU64::new(0));
        let task_dropped = dropped.clone();

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Command::Dispatch(event) => {
                        log::debug!("Reducing {:?}", event);
                        let result = {
                            let current = state_tx.borrow();
                            reducer.reduce(&current, event)
                        };
                        match result {
                            Ok(next) => {
                                state_tx.send_replace(next);
                            }
                            Err(e) => {
                                task_dropped.fetch_add(1, Ordering::SeqCst);
                                log::error!("Dropped event: {}", e);
                            }
                        }
                    }
                    Command::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
            log::debug!("Store queue closed");
        });

        Self {
            tx,
            state: state_rx,
            dropped,
        }
    }

    /// Queue an event. Never blocks.
    pub fn dispatch(&self, event: R::Event) -> Result<(), StoreError> {
        self.tx
            .send(Command::Dispatch(event))
            .map_err(|_| StoreError::Closed)
    }

    /// Wait until every event dispatched before this call has been reduced
    pub async fn flush(&self) -> Result<(), StoreError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(Command::Flush(ack_tx))
            .map_err(|_| StoreError::Closed)?;
        ack_rx.await.map_err(|_| StoreError::Closed)
    }

    /// Latest published state
    pub fn state(&self) -> R::State {
        self.state.borrow().clone()
    }

    /// Number of events the reducer has rejected so far
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::SeqCst)
    }

    /// Receiver that wakes on every state change
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::error::EditError;
    use crate::workbench::workflows::types::WorkflowId;

    struct Counter;

    #[derive(Debug)]
    enum CounterEvent {
        Add(i64),
        Fail,
    }

    impl Reducer for Counter {
        type State = i64;
        type Event = CounterEvent;

        fn reduce(&self, state: &i64, event: CounterEvent) -> Result<i64, StoreError> {
            match event {
                CounterEvent::Add(n) => Ok(state + n),
                CounterEvent::Fail => Err(EditError::NoPendingEdit { id: WorkflowId(0) }.into()),
            }
        }
    }

    #[tokio::test]
    async fn test_events_applied_in_order() {
        let store = Store::new(Counter, 0);
        store.dispatch(CounterEvent::Add(2)).unwrap();
        store.dispatch(CounterEvent::Add(3)).unwrap();
        store.flush().await.unwrap();
        assert_eq!(store.state(), 5);
    }

    #[tokio::test]
    async fn test_rejected_event_keeps_state() {
        let store = Store::new(Counter, 10);
        store.dispatch(CounterEvent::Fail).unwrap();
        store.dispatch(CounterEvent::Add(1)).unwrap();
        store.flush().await.unwrap();
        assert_eq!(store.state(), 11);
        assert_eq!(store.dropped(), 1);
    }

    #[tokio::test]
    async fn test_subscribe_sees_changes() {
        let store = Store::new(Counter, 0);
        let mut rx = store.subscribe();

        store.dispatch(CounterEvent::Add(4)).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 4);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = Store::new(Counter, 0);
        let other = store.clone();
        other.dispatch(CounterEvent::Add(7)).unwrap();
        store.flush().await.unwrap();
        assert_eq!(store.state(), 7);
    }
}
