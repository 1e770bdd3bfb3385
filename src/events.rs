use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info};

/// Events emitted by the cart lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    CartItemAdded { item_id: i64, product_id: i64 },
    CartItemQuantityChanged { item_id: i64, quantity: i32 },
    CartItemRemoved { item_id: i64 },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging on failure instead of propagating it.
    /// Event delivery is best-effort and never fails the request.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            error!("Failed to publish event: {}", e);
        }
    }
}

/// Consumes events from the channel until every sender is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match event {
            Event::CartItemAdded {
                item_id,
                product_id,
            } => {
                info!(item_id, product_id, "cart item added");
            }
            Event::CartItemQuantityChanged { item_id, quantity } => {
                info!(item_id, quantity, "cart item quantity changed");
            }
            Event::CartItemRemoved { item_id } => {
                info!(item_id, "cart item removed");
            }
        }
    }

    info!("Event channel closed; stopping event processing loop");
}
