use async_trait::async_trait;
use tokio::sync::mpsc;

/// Buffer size for a single subscription's delivery queue.
pub const SUBSCRIPTION_BUFFER: usize = 256;

/// Errors that can occur when talking to the message bus.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// Failed to reach the bus at all.
    #[error("Bus connection error: {0}")]
    Connection(String),

    /// A publish was attempted and did not go through.
    #[error("Bus publish error: {0}")]
    Publish(String),

    /// A subscription could not be established.
    #[error("Bus subscribe error: {0}")]
    Subscribe(String),
}

/// Topic-based publish/subscribe transport.
///
/// Delivery is best-effort on every implementation: a publish with no
/// subscribers succeeds and the message is gone, and a slow subscriber may
/// observe drops. Callers that need durability keep their own records.
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Publish a payload on a topic.
    async fn publish(&self, topic: &str, payload: &str) -> Result<(), BusError>;

    /// Subscribe to a topic. Each received payload arrives on the returned
    /// channel; dropping the receiver ends the subscription.
    async fn subscribe(&self, topic: &str) -> Result<mpsc::Receiver<String>, BusError>;

    /// Whether the transport is currently reachable.
    async fn healthy(&self) -> bool;
}
