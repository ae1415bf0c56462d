//! Event publishing/subscription abstraction (mechanics only).
//!
//! The quote controller never touches the presentation layer directly. It publishes
//! [`QuoteEvent`](crate::QuoteEvent)s to a bus handed to it at construction time, and
//! whatever renders the catalog subscribes to that bus.
//!
//! ## Delivery
//!
//! - **Broadcast**: each subscriber gets a copy of every message published after it subscribed
//! - **Ordered per publisher**: messages from the single controller arrive in publish order
//! - **No persistence**: events published before a subscription exists are not replayed

use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// A subscription to an event stream.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// while let Ok(event) = subscription.try_recv() {
///     render(event);
/// }
/// ```
///
/// Subscriptions are meant for single-threaded consumption.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain everything currently queued without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// `publish()` can fail (e.g. internal lock poisoning). Callers decide whether that
/// matters; the quote controller logs and carries on, since a missed notification must
/// never roll back a basket change.
///
/// The trait requires `Send + Sync` so a bus can be shared behind an `Arc`.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
