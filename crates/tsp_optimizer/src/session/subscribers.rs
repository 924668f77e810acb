use fxhash::FxHashMap;
use tokio::sync::mpsc::{
    self, Receiver, Sender,
    error::{TryRecvError, TrySendError},
};
use tracing::{debug, trace};

use crate::problem::route::Route;

/// Receiving end of the routes published by a session.
///
/// The queue is bounded: while it is full, new routes are dropped for this
/// subscriber only. It closes once the session is over.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    receiver: Receiver<Route>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub async fn recv(&mut self) -> Option<Route> {
        self.receiver.recv().await
    }

    /// Must not be called from within an async runtime.
    pub fn blocking_recv(&mut self) -> Option<Route> {
        self.receiver.blocking_recv()
    }

    pub fn try_recv(&mut self) -> Result<Route, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Routes waiting in the queue.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

/// Fan-out registry of subscriber queues.
pub(crate) struct Subscribers {
    capacity: usize,
    next_id: u64,
    senders: FxHashMap<u64, Sender<Route>>,
    closed: bool,
}

impl Subscribers {
    pub fn new(capacity: usize) -> Self {
        Subscribers {
            capacity: capacity.max(1),
            next_id: 0,
            senders: FxHashMap::default(),
            closed: false,
        }
    }

    /// Registers a new queue. Once closed, the returned queue is already closed.
    pub fn subscribe(&mut self) -> Subscription {
        let (sender, receiver) = mpsc::channel(self.capacity);
        let id = self.next_id;
        self.next_id += 1;

        if !self.closed {
            self.senders.insert(id, sender);
        }

        Subscription { id, receiver }
    }

    pub fn unsubscribe(&mut self, id: u64) -> bool {
        self.senders.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    /// Hands `route` to every subscriber without waiting. Full queues miss the
    /// route, subscribers that went away are removed.
    pub fn publish(&mut self, route: &Route) {
        let mut dropped = 0;

        self.senders
            .retain(|id, sender| match sender.try_send(route.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    dropped += 1;
                    true
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(subscriber = id, "subscriber is gone, removing it");
                    false
                }
            });

        if dropped > 0 {
            trace!(dropped, "route dropped for lagging subscribers");
        }
    }

    /// Closes every queue, later subscriptions are closed from the start.
    pub fn close(&mut self) {
        self.closed = true;
        self.senders.clear();
    }
}
