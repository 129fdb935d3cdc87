//! In-process fan-out bus backed by `tokio::sync::broadcast` channels.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc, Mutex};

use crate::bus::{BusError, MessageBus, SUBSCRIPTION_BUFFER};

/// Buffer capacity of each topic's broadcast channel.
///
/// When the buffer is full the oldest un-consumed messages are dropped and
/// slow receivers observe a `RecvError::Lagged`.
const TOPIC_CAPACITY: usize = 1024;

/// Process-local [`MessageBus`] where every topic is a broadcast channel.
///
/// Designed to be shared via `Arc<InMemoryBus>`. If a topic has no active
/// subscribers, published messages are silently dropped — the same
/// fire-and-forget semantics as the production transport.
#[derive(Default)]
pub struct InMemoryBus {
    topics: Mutex<HashMap<String, broadcast::Sender<String>>>,
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    async fn sender_for(&self, topic: &str) -> broadcast::Sender<String> {
        let mut topics = self.topics.lock().await;
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(TOPIC_CAPACITY).0)
            .clone()
    }
}

#[async_trait]
impl MessageBus for InMemoryBus {
    async fn publish(&self, topic: &str, payload: &str) -> Result<(), BusError> {
        let sender = self.sender_for(topic).await;
        // Ignore the SendError — it only means there are zero receivers.
        let _ = sender.send(payload.to_string());
        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> Result<mpsc::Receiver<String>, BusError> {
        let mut source = self.sender_for(topic).await.subscribe();
        let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);
        let topic = topic.to_string();

        tokio::spawn(async move {
            loop {
                match source.recv().await {
                    Ok(payload) => {
                        if tx.send(payload).await.is_err() {
                            // Subscriber dropped its receiver.
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(topic = %topic, skipped, "Bus subscriber lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Ok(rx)
    }

    async fn healthy(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = InMemoryBus::new();
        let mut rx = bus.subscribe("updates").await.unwrap();

        bus.publish("updates", "hello").await.unwrap();

        let received = rx.recv().await.expect("should receive the message");
        assert_eq!(received, "hello");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_message() {
        let bus = InMemoryBus::new();
        let mut rx1 = bus.subscribe("updates").await.unwrap();
        let mut rx2 = bus.subscribe("updates").await.unwrap();

        bus.publish("updates", "fan-out").await.unwrap();

        assert_eq!(rx1.recv().await.unwrap(), "fan-out");
        assert_eq!(rx2.recv().await.unwrap(), "fan-out");
    }

    #[tokio::test]
    async fn publish_with_no_subscribers_succeeds() {
        let bus = InMemoryBus::new();
        bus.publish("orphan", "dropped").await.unwrap();
    }

    #[tokio::test]
    async fn topics_are_isolated() {
        let bus = InMemoryBus::new();
        let mut jobs = bus.subscribe("jobs").await.unwrap();
        let mut updates = bus.subscribe("updates").await.unwrap();

        bus.publish("jobs", "job-payload").await.unwrap();
        bus.publish("updates", "update-payload").await.unwrap();

        assert_eq!(jobs.recv().await.unwrap(), "job-payload");
        assert_eq!(updates.recv().await.unwrap(), "update-payload");
    }

    #[tokio::test]
    async fn messages_arrive_in_publish_order() {
        let bus = InMemoryBus::new();
        let mut rx = bus.subscribe("ordered").await.unwrap();

        for i in 0..5 {
            bus.publish("ordered", &format!("msg-{i}")).await.unwrap();
        }
        for i in 0..5 {
            assert_eq!(rx.recv().await.unwrap(), format!("msg-{i}"));
        }
    }
}
