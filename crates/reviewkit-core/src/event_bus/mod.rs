//! # Event Bus Module
//!
//! Publish/subscribe bus through which the review session announces
//! committed changes (comments, versions, status, viewport resets, assist
//! results) to whatever renders them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reviewkit_core::event_bus::{EventBus, EventCategory, EventFilter, ReviewEvent};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Annotation]),
//!     |event| tracing::info!("{}", event.description()),
//! );
//!
//! // ... later
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
