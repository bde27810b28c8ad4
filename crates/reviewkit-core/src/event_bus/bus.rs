//! Event Bus implementation.
//!
//! Provides the core EventBus struct and a process-global instance.
//! Review sessions own their own bus by default so that two surfaces on
//! the same page do not hear each other.

use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{EventCategory, ReviewEvent};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &ReviewEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Box<dyn Fn(ReviewEvent) + Send + Sync>;

/// Configuration for the event bus
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Channel capacity for broadcast.
    pub channel_capacity: usize,
    /// Whether to keep event history.
    pub enable_history: bool,
    /// Maximum number of events to retain in history.
    pub max_history_size: usize,
    /// How long to retain events in history.
    pub history_retention: Duration,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            enable_history: false,
            max_history_size: 500,
            history_retention: Duration::from_secs(300),
        }
    }
}

type Handlers = HashMap<SubscriptionId, (EventFilter, EventHandler)>;

/// Fan-out point for one review surface (or the whole process).
pub struct EventBus {
    sender: broadcast::Sender<ReviewEvent>,
    handlers: Arc<RwLock<Handlers>>,
    recent: Arc<RwLock<VecDeque<(Instant, ReviewEvent)>>>,
    config: EventBusConfig,
}

impl EventBus {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            sender,
            handlers: Arc::new(RwLock::new(HashMap::new())),
            recent: Arc::new(RwLock::new(VecDeque::new())),
            config,
        }
    }

    /// Publish an event to all subscribers
    ///
    /// Synchronous handlers run on the calling thread, in no particular
    /// order. Returns the number of async receivers that got the event.
    /// Publishing with nobody listening is not an error.
    pub fn publish(&self, event: ReviewEvent) -> usize {
        tracing::trace!("publish: {}", event.description());

        if self.config.enable_history {
            self.record(&event);
        }

        self.handlers
            .read()
            .values()
            .filter(|(filter, _)| filter.matches(&event))
            .for_each(|(_, handler)| handler(event.clone()));

        // Err only means no receiver is alive.
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe to events with a synchronous handler
    ///
    /// The handler must not subscribe or unsubscribe on this bus.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(ReviewEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().insert(id, (filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Async consumers get every event; lagging ones lose the oldest.
    pub fn receiver(&self) -> broadcast::Receiver<ReviewEvent> {
        self.sender.subscribe()
    }

    /// Unsubscribe from events
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.write().remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Synchronous handlers currently registered.
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Events published at or after `since`, oldest first. Empty unless
    /// history is enabled.
    pub fn history(&self, since: Option<Instant>) -> Vec<ReviewEvent> {
        self.recent
            .read()
            .iter()
            .filter(|(at, _)| since.map_or(true, |since| *at >= since))
            .map(|(_, event)| event.clone())
            .collect()
    }

    pub fn clear_history(&self) {
        self.recent.write().clear();
    }

    /// Get the current configuration
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    fn record(&self, event: &ReviewEvent) {
        let now = Instant::now();
        let mut recent = self.recent.write();
        recent.push_back((now, event.clone()));

        let retention = self.config.history_retention;
        while let Some((at, _)) = recent.front() {
            let expired = now.duration_since(*at) > retention;
            if !expired && recent.len() <= self.config.max_history_size {
                break;
            }
            recent.pop_front();
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.config)
            .finish()
    }
}

static EVENT_BUS: OnceLock<EventBus> = OnceLock::new();

/// Process-wide bus for hosts that run a single review surface.
pub fn event_bus() -> &'static EventBus {
    EVENT_BUS.get_or_init(EventBus::new)
}
