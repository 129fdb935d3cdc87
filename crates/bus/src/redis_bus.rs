//! Redis pub/sub transport.
//!
//! Publishes through a [`ConnectionManager`] (auto-reconnecting multiplexed
//! connection); each subscription holds its own pub/sub connection because
//! Redis dedicates a connection to SUBSCRIBE mode.

use async_trait::async_trait;
use futures::StreamExt;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::mpsc;

use crate::bus::{BusError, MessageBus, SUBSCRIPTION_BUFFER};

/// Redis-backed [`MessageBus`].
pub struct RedisBus {
    client: redis::Client,
    publisher: ConnectionManager,
}

impl RedisBus {
    /// Connect to Redis at `url` (e.g. `redis://localhost:6379`).
    ///
    /// Establishes the shared publish connection eagerly so startup fails
    /// fast on a bad address.
    pub async fn connect(url: &str) -> Result<Self, BusError> {
        let client = redis::Client::open(url)
            .map_err(|e| BusError::Connection(format!("Invalid Redis URL {url}: {e}")))?;

        let publisher = client
            .get_connection_manager()
            .await
            .map_err(|e| BusError::Connection(format!("Failed to connect to Redis at {url}: {e}")))?;

        tracing::info!(%url, "Connected to Redis bus");

        Ok(Self { client, publisher })
    }
}

#[async_trait]
impl MessageBus for RedisBus {
    async fn publish(&self, topic: &str, payload: &str) -> Result<(), BusError> {
        let mut conn = self.publisher.clone();
        let _: () = conn
            .publish(topic, payload)
            .await
            .map_err(|e| BusError::Publish(e.to_string()))?;
        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> Result<mpsc::Receiver<String>, BusError> {
        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(|e| BusError::Subscribe(e.to_string()))?;
        pubsub
            .subscribe(topic)
            .await
            .map_err(|e| BusError::Subscribe(e.to_string()))?;

        let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);
        let topic = topic.to_string();

        tokio::spawn(async move {
            let mut stream = pubsub.on_message();
            while let Some(msg) = stream.next().await {
                let payload: String = match msg.get_payload() {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::warn!(topic = %topic, error = %e, "Dropping undecodable bus message");
                        continue;
                    }
                };
                if tx.send(payload).await.is_err() {
                    // Subscriber dropped its receiver.
                    break;
                }
            }
            tracing::info!(topic = %topic, "Redis subscription ended");
        });

        Ok(rx)
    }

    async fn healthy(&self) -> bool {
        let mut conn = self.publisher.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .is_ok()
    }
}
