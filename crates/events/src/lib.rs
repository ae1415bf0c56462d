//! Session events and the pub/sub mechanics that deliver them to the presentation layer.

pub mod bus;
pub mod event;
pub mod in_memory_bus;
pub mod quote;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use quote::QuoteEvent;
